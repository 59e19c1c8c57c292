use alloc::vec::Vec;
use core::{cmp::Ordering, fmt};

use crate::{Comparator, InvariantViolation, Natural, Navigable, NavigableMut, Result, TreeMap};

/// An ordered set: a [`TreeMap`] whose values are `()`.
///
/// The inherent navigation methods return keys. The [`Navigable`] versions,
/// used by views and generic code, return `(&K, &())` entries.
#[derive(Clone)]
pub struct TreeSet<K, C = Natural> {
    map: TreeMap<K, (), C>,
}

impl<K: Ord> TreeSet<K> {
    /// Creates an empty set ordered by the keys' `Ord` implementation.
    pub const fn new() -> Self {
        Self { map: TreeMap::new() }
    }
}

impl<K: Ord> Default for TreeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> TreeSet<K, C> {
    /// Creates an empty set ordered by `comparator`.
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            map: TreeMap::with_comparator(comparator),
        }
    }

    /// Returns the number of keys.
    #[inline]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the set holds no keys.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Borrowing traversal of the keys in ascending order.
    ///
    /// [`Navigable::iter`] is the cursor over cloned `(K, ())` entries.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    /// Copies the keys into a vector, in ascending order.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }
}

impl<K, C: Comparator<K>> TreeSet<K, C> {
    /// Adds a key.
    ///
    /// # Returns
    ///
    /// * `bool` - True if the key was not already present
    pub fn add(&mut self, key: K) -> bool {
        self.map.insert(key, ()).is_none()
    }

    /// Removes a key.
    ///
    /// # Returns
    ///
    /// * `bool` - True if the key was present
    pub fn remove(&mut self, key: &K) -> bool {
        self.map.remove(key).is_some()
    }

    /// Returns true if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Least key, `Err(Error::Empty)` when empty.
    pub fn first(&self) -> Result<&K> {
        Navigable::first(&self.map).map(|(k, _)| k)
    }

    /// Greatest key, `Err(Error::Empty)` when empty.
    pub fn last(&self) -> Result<&K> {
        Navigable::last(&self.map).map(|(k, _)| k)
    }

    /// Greatest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<&K> {
        self.map.floor(key).map(|(k, _)| k)
    }

    /// Greatest key strictly less than `key`.
    pub fn lower(&self, key: &K) -> Option<&K> {
        self.map.lower(key).map(|(k, _)| k)
    }

    /// Least key greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Option<&K> {
        self.map.ceiling(key).map(|(k, _)| k)
    }

    /// Least key strictly greater than `key`.
    pub fn higher(&self, key: &K) -> Option<&K> {
        self.map.higher(key).map(|(k, _)| k)
    }

    /// Removes and returns the least key.
    pub fn poll_first(&mut self) -> Result<K> {
        self.map.poll_first().map(|(k, _)| k)
    }

    /// Removes and returns the greatest key.
    pub fn poll_last(&mut self) -> Result<K> {
        self.map.poll_last().map(|(k, _)| k)
    }

    /// Keeps only the keys for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.map.retain(|k, _| keep(k));
    }

    /// See [`TreeMap::verify_invariants`].
    pub fn verify_invariants(&self) -> core::result::Result<usize, InvariantViolation> {
        self.map.verify_invariants()
    }
}

impl<K, C: Comparator<K>> Navigable for TreeSet<K, C> {
    type Key = K;
    type Value = ();

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.map.compare(a, b)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn get_entry(&self, key: &K) -> Option<(&K, &())> {
        self.map.get_entry(key)
    }

    fn first_entry(&self) -> Option<(&K, &())> {
        self.map.first_entry()
    }

    fn last_entry(&self) -> Option<(&K, &())> {
        self.map.last_entry()
    }

    fn seek_below(&self, key: &K, inclusive: bool) -> Option<(&K, &())> {
        self.map.seek_below(key, inclusive)
    }

    fn seek_above(&self, key: &K, inclusive: bool) -> Option<(&K, &())> {
        self.map.seek_above(key, inclusive)
    }
}

impl<K, C: Comparator<K>> NavigableMut for TreeSet<K, C> {
    fn insert(&mut self, key: K, value: ()) -> Result<Option<()>> {
        NavigableMut::insert(&mut self.map, key, value)
    }

    fn remove_entry(&mut self, key: &K) -> Option<(K, ())> {
        self.map.remove_entry(key)
    }

    fn poll_first(&mut self) -> Result<(K, ())> {
        NavigableMut::poll_first(&mut self.map)
    }

    fn poll_last(&mut self) -> Result<(K, ())> {
        NavigableMut::poll_last(&mut self.map)
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, C: Comparator<K> + Default> FromIterator<K> for TreeSet<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::with_comparator(C::default());
        set.extend(iter);
        set
    }
}

impl<K, C: Comparator<K>> Extend<K> for TreeSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for TreeSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, FloatOrder};
    use alloc::{format, vec::Vec};

    #[test]
    fn test_set_creation() {
        let set = TreeSet::<i32>::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.first(), Err(Error::Empty));
        assert_eq!(set.last(), Err(Error::Empty));
    }

    #[test]
    fn test_add_remove_contains() {
        let mut set = TreeSet::new();
        assert!(set.add(5));
        assert!(set.add(3));
        assert!(!set.add(5));
        assert_eq!(set.len(), 2);

        assert!(set.contains(&3));
        assert!(set.remove(&3));
        assert!(!set.remove(&3));
        assert!(!set.contains(&3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_key_navigation() {
        let set: TreeSet<i32> = [8, 16, 32, 64, 96, 128, 192, 256, 384, 512].into_iter().collect();
        assert_eq!(set.floor(&128), Some(&128));
        assert_eq!(set.ceiling(&129), Some(&192));
        assert_eq!(set.lower(&128), Some(&96));
        assert_eq!(set.higher(&128), Some(&192));
        assert_eq!(set.first(), Ok(&8));
        assert_eq!(set.last(), Ok(&512));
    }

    #[test]
    fn test_poll_and_retain() {
        let mut set: TreeSet<u32> = (1..=10).collect();
        assert_eq!(set.poll_first(), Ok(1));
        assert_eq!(set.poll_last(), Ok(10));
        set.retain(|k| k % 2 == 0);
        assert_eq!(set.to_vec(), [2, 4, 6, 8]);
        assert!(set.verify_invariants().is_ok());

        set.clear();
        assert_eq!(set.poll_first(), Err(Error::Empty));
    }

    #[test]
    fn test_extend_ignores_duplicates() {
        let mut set: TreeSet<char> = "hello".chars().collect();
        set.extend("world".chars());
        assert_eq!(format!("{set:?}"), "{'d', 'e', 'h', 'l', 'o', 'r', 'w'}");
    }

    #[test]
    fn test_keys_borrow_and_iter_clones() {
        let set: TreeSet<i32> = [3, 1, 2].into_iter().collect();
        let borrowed: Vec<&i32> = set.keys().collect();
        assert_eq!(borrowed, [&1, &2, &3]);

        let cloned: Vec<(i32, ())> = set.iter().collect();
        assert_eq!(cloned, [(1, ()), (2, ()), (3, ())]);
        assert_eq!(set.iter_rev().map(|(k, _)| k).collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[test]
    fn test_float_keys() {
        let mut set = TreeSet::with_comparator(FloatOrder);
        for x in [2.5, f64::NAN, -1.0, f64::INFINITY] {
            set.add(x);
        }
        assert_eq!(set.first(), Ok(&-1.0));
        assert!(set.last().is_ok_and(|x| x.is_nan()));
        assert_eq!(set.lower(&f64::NAN), Some(&f64::INFINITY));
    }
}
