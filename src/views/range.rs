use core::{cmp::Ordering, fmt, ops::Bound};
use log::debug;

use crate::{Error, Navigable, NavigableMut, Result};

/// A live window over a [`Navigable`] container.
///
/// The view copies nothing. Reads and writes go to the wrapped container after
/// a bounds check, so changes made through either side are seen by the other.
/// Wrapping `&T` gives a read-only view and `&mut T` a writable one.
///
/// Navigation is clamped to the window: asking for the floor of a key above
/// the window answers with the window's last entry, and so on.
/// [`len`](Navigable::len) walks the window every time it is called.
pub struct Range<N: Navigable> {
    /// The wrapped container
    inner: N,
    /// Lower edge of the window
    lower: Bound<N::Key>,
    /// Upper edge of the window
    upper: Bound<N::Key>,
}

impl<N: Navigable> Range<N> {
    /// Creates a view of `inner` restricted to `lower..upper`.
    ///
    /// # Arguments
    ///
    /// * `inner` - The container to wrap
    /// * `lower` - Lower edge of the window
    /// * `upper` - Upper edge of the window
    ///
    /// # Returns
    ///
    /// * `Err(Error::InvalidRange)` - If `upper` compares below `lower`, or
    ///   either edge lies outside a window `inner` already imposes
    pub fn new(inner: N, lower: Bound<N::Key>, upper: Bound<N::Key>) -> Result<Self> {
        if let (Some(from), Some(to)) = (bound_key(&lower), bound_key(&upper)) {
            if inner.compare(to, from) == Ordering::Less {
                debug!("rejected range: upper bound below lower bound");
                return Err(Error::InvalidRange);
            }
        }

        let admitted = |edge: &Bound<N::Key>| match edge {
            Bound::Unbounded => true,
            Bound::Included(key) => inner.admits(key, true),
            Bound::Excluded(key) => inner.admits(key, false),
        };
        if !admitted(&lower) || !admitted(&upper) {
            debug!("rejected range: bounds outside the enclosing view");
            return Err(Error::InvalidRange);
        }

        Ok(Self {
            inner,
            lower,
            upper,
        })
    }

    /// Lower edge of the window.
    pub fn lower_bound(&self) -> Bound<&N::Key> {
        self.lower.as_ref()
    }

    /// Upper edge of the window.
    pub fn upper_bound(&self) -> Bound<&N::Key> {
        self.upper.as_ref()
    }

    /// The wrapped container.
    pub fn get_ref(&self) -> &N {
        &self.inner
    }

    /// Unwraps the view, returning the wrapped container.
    pub fn into_inner(self) -> N {
        self.inner
    }

    /// Returns true if `key` lies inside the window.
    pub fn in_bounds(&self, key: &N::Key) -> bool {
        !self.too_low(key) && !self.too_high(key)
    }

    fn too_low(&self, key: &N::Key) -> bool {
        match &self.lower {
            Bound::Unbounded => false,
            Bound::Included(lo) => self.inner.compare(key, lo) == Ordering::Less,
            Bound::Excluded(lo) => self.inner.compare(key, lo) != Ordering::Greater,
        }
    }

    fn too_high(&self, key: &N::Key) -> bool {
        match &self.upper {
            Bound::Unbounded => false,
            Bound::Included(hi) => self.inner.compare(key, hi) == Ordering::Greater,
            Bound::Excluded(hi) => self.inner.compare(key, hi) != Ordering::Less,
        }
    }
}

impl<N: Navigable> Navigable for Range<N> {
    type Key = N::Key;
    type Value = N::Value;

    #[inline]
    fn compare(&self, a: &N::Key, b: &N::Key) -> Ordering {
        self.inner.compare(a, b)
    }

    /// Counts the window, O(window size × log n).
    fn len(&self) -> usize {
        let mut count = 0;
        let mut entry = self.first_entry();
        while let Some((key, _)) = entry {
            count += 1;
            entry = self.seek_above(key, false);
        }
        count
    }

    fn get_entry(&self, key: &N::Key) -> Option<(&N::Key, &N::Value)> {
        if self.in_bounds(key) {
            self.inner.get_entry(key)
        } else {
            None
        }
    }

    fn first_entry(&self) -> Option<(&N::Key, &N::Value)> {
        let entry = match &self.lower {
            Bound::Unbounded => self.inner.first_entry(),
            Bound::Included(lo) => self.inner.seek_above(lo, true),
            Bound::Excluded(lo) => self.inner.seek_above(lo, false),
        };
        entry.filter(|(key, _)| !self.too_high(key))
    }

    fn last_entry(&self) -> Option<(&N::Key, &N::Value)> {
        let entry = match &self.upper {
            Bound::Unbounded => self.inner.last_entry(),
            Bound::Included(hi) => self.inner.seek_below(hi, true),
            Bound::Excluded(hi) => self.inner.seek_below(hi, false),
        };
        entry.filter(|(key, _)| !self.too_low(key))
    }

    fn seek_below(&self, key: &N::Key, inclusive: bool) -> Option<(&N::Key, &N::Value)> {
        let entry = if self.too_high(key) {
            self.last_entry()
        } else {
            self.inner.seek_below(key, inclusive)
        };
        entry.filter(|(key, _)| !self.too_low(key))
    }

    fn seek_above(&self, key: &N::Key, inclusive: bool) -> Option<(&N::Key, &N::Value)> {
        let entry = if self.too_low(key) {
            self.first_entry()
        } else {
            self.inner.seek_above(key, inclusive)
        };
        entry.filter(|(key, _)| !self.too_high(key))
    }

    fn admits(&self, key: &N::Key, inclusive: bool) -> bool {
        let above_lower = match &self.lower {
            Bound::Unbounded => true,
            Bound::Included(lo) => self.inner.compare(key, lo) != Ordering::Less,
            Bound::Excluded(lo) => match self.inner.compare(key, lo) {
                Ordering::Greater => true,
                Ordering::Equal => !inclusive,
                Ordering::Less => false,
            },
        };
        let below_upper = match &self.upper {
            Bound::Unbounded => true,
            Bound::Included(hi) => self.inner.compare(key, hi) != Ordering::Greater,
            Bound::Excluded(hi) => match self.inner.compare(key, hi) {
                Ordering::Less => true,
                Ordering::Equal => !inclusive,
                Ordering::Greater => false,
            },
        };
        above_lower && below_upper && self.inner.admits(key, inclusive)
    }

    fn is_empty(&self) -> bool {
        self.first_entry().is_none()
    }
}

impl<N> NavigableMut for Range<N>
where
    N: NavigableMut,
    N::Key: Clone,
{
    fn insert(&mut self, key: N::Key, value: N::Value) -> Result<Option<N::Value>> {
        if !self.in_bounds(&key) {
            debug!("rejected insert outside the range view");
            return Err(Error::OutOfRange);
        }
        self.inner.insert(key, value)
    }

    fn remove_entry(&mut self, key: &N::Key) -> Option<(N::Key, N::Value)> {
        if self.in_bounds(key) {
            self.inner.remove_entry(key)
        } else {
            None
        }
    }

    fn poll_first(&mut self) -> Result<(N::Key, N::Value)> {
        let key = self.first()?.0.clone();
        self.inner.remove_entry(&key).ok_or(Error::Empty)
    }

    fn poll_last(&mut self) -> Result<(N::Key, N::Value)> {
        let key = self.last()?.0.clone();
        self.inner.remove_entry(&key).ok_or(Error::Empty)
    }
}

impl<N> fmt::Debug for Range<N>
where
    N: Navigable,
    N::Key: fmt::Debug,
    N::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        let mut entry = self.first_entry();
        while let Some((key, value)) = entry {
            map.entry(key, value);
            entry = self.seek_above(key, false);
        }
        map.finish()
    }
}

fn bound_key<K>(bound: &Bound<K>) -> Option<&K> {
    match bound {
        Bound::Included(key) | Bound::Excluded(key) => Some(key),
        Bound::Unbounded => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TreeMap, TreeSet};
    use alloc::{format, vec::Vec};

    fn hundred() -> TreeSet<i32> {
        (1..100).collect()
    }

    fn keys<N: Navigable<Key = i32>>(view: &N) -> Vec<i32>
    where
        N::Value: Clone,
    {
        view.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_half_open_window() {
        let set = hundred();
        let view = set.range(10, true, 50, false).unwrap();
        assert_eq!(keys(&view), (10..50).collect::<Vec<_>>());
        assert_eq!(view.len(), 40);
        assert!(!view.contains_key(&50));
        assert!(view.contains_key(&10));
    }

    #[test]
    fn test_insert_through_window() {
        let mut set: TreeSet<i32> = (1..100).filter(|k| k % 5 != 0).collect();
        {
            let mut view = set.range_mut(10, true, 50, false).unwrap();
            assert_eq!(view.insert(9, ()), Err(Error::OutOfRange));
            assert_eq!(view.insert(50, ()), Err(Error::OutOfRange));
            assert_eq!(view.insert(25, ()), Ok(None));
            assert!(view.contains_key(&25));
        }
        assert!(set.contains(&25));
        assert!(!set.contains(&50));
    }

    #[test]
    fn test_remove_outside_window_is_absent() {
        let mut set = hundred();
        let mut view = set.range_mut(10, true, 50, false).unwrap();
        assert_eq!(view.remove(&5), None);
        assert_eq!(view.remove(&20), Some(()));
        drop(view);
        assert!(set.contains(&5));
        assert!(!set.contains(&20));
    }

    #[test]
    fn test_invalid_ranges() {
        let set = hundred();
        assert!(matches!(set.range(50, true, 10, true), Err(Error::InvalidRange)));
        assert!(set.range(10, false, 10, false).is_ok());

        let view = set.range(10, true, 50, false).unwrap();
        assert!(matches!(view.range(5, true, 20, true), Err(Error::InvalidRange)));
        assert!(matches!(view.range(20, true, 50, true), Err(Error::InvalidRange)));
        assert!(view.range(20, true, 50, false).is_ok());
        assert!(matches!(view.tail(60, true), Err(Error::InvalidRange)));
    }

    #[test]
    fn test_nested_window_intersects() {
        let set = hundred();
        let outer = set.range(10, true, 50, false).unwrap();
        let inner = outer.head(20, true).unwrap();
        assert_eq!(keys(&inner), (10..=20).collect::<Vec<_>>());
        assert_eq!(inner.len(), 11);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let set = hundred();
        let view = set.range(10, false, 50, true).unwrap();
        let key = |e: Option<(&i32, &())>| e.map(|(k, _)| *k);

        assert_eq!(view.first().map(|(k, _)| *k), Ok(11));
        assert_eq!(view.last().map(|(k, _)| *k), Ok(50));
        assert_eq!(key(view.floor(&90)), Some(50));
        assert_eq!(key(view.lower(&51)), Some(50));
        assert_eq!(key(view.ceiling(&1)), Some(11));
        assert_eq!(key(view.higher(&10)), Some(11));
        assert_eq!(key(view.floor(&10)), None);
        assert_eq!(key(view.higher(&50)), None);
        assert_eq!(key(view.lower(&11)), None);
    }

    #[test]
    fn test_empty_window() {
        let set: TreeSet<i32> = [1, 2, 8, 9].into_iter().collect();
        let view = set.range(3, true, 7, true).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert_eq!(view.first(), Err(Error::Empty));
        assert_eq!(view.floor(&100), None);
        assert_eq!(view.ceiling(&-100), None);
    }

    #[test]
    fn test_window_is_live() {
        let mut tree: TreeMap<i32, &str> = TreeMap::new();
        tree.put(1, "a");
        tree.put(5, "e");
        {
            let view = tree.tail(3, true).unwrap();
            assert_eq!(view.len(), 1);
        }
        tree.put(4, "d");
        tree.put(2, "b");
        let view = tree.tail(3, true).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(format!("{view:?}"), "{4: \"d\", 5: \"e\"}");
    }

    #[test]
    fn test_poll_and_clear_window() {
        let mut set = hundred();
        {
            let mut view = set.range_mut(10, true, 20, true).unwrap();
            assert_eq!(view.poll_first(), Ok((10, ())));
            assert_eq!(view.poll_last(), Ok((20, ())));
            view.clear();
            assert!(view.is_empty());
            assert_eq!(view.poll_first(), Err(Error::Empty));
        }
        assert_eq!(set.len(), 99 - 11);
        assert!(set.contains(&9));
        assert!(set.contains(&21));
        assert!(set.verify_invariants().is_ok());
    }

    #[test]
    fn test_range_of_reversed_view() {
        let set = hundred();
        let reversed = set.reversed();
        assert!(reversed.range(10, true, 50, true).is_err());

        let view = reversed.range(50, true, 10, true).unwrap();
        let collected = keys(&view);
        assert_eq!(collected.first(), Some(&50));
        assert_eq!(collected.last(), Some(&10));
        assert_eq!(collected.len(), 41);
    }
}
