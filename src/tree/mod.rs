use alloc::vec::Vec;
use core::{cmp::Ordering, fmt, iter::FusedIterator};

use crate::{Comparator, Error, Natural, Navigable, NavigableMut, Result};

mod balance;
mod navigation;
pub(crate) mod node;
mod verify;

use node::{NIL, NodeStore};

/// An ordered map backed by a Red-Black tree.
///
/// Insertion, removal, lookup and every navigation query run in O(log n).
/// Nodes live in an index arena with a free list and carry no parent link;
/// rebalancing walks the path recorded on the way down from the root.
///
/// Key features:
/// - Map and set behaviour from one engine (a set is `TreeMap<K, ()>`)
/// - Pluggable ordering through [`Comparator`], natural order by default
/// - Live range and reverse views through [`Navigable`] and [`NavigableMut`]
#[derive(Clone)]
pub struct TreeMap<K, V, C = Natural> {
    /// Arena owning every node of the tree
    store: NodeStore<K, V>,

    /// Index of the root node in the store
    /// Equal to NIL when tree is empty
    root: usize,

    /// Number of entries currently stored
    len: usize,

    /// Ordering of the keys
    comparator: C,
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates an empty map ordered by the keys' `Ord` implementation.
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> TreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    ///
    /// # Arguments
    ///
    /// * `comparator` - Any [`Comparator`], including closures
    ///   `Fn(&K, &K) -> Ordering`
    ///
    /// # Returns
    ///
    /// * `Self` - The empty map
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            store: NodeStore::new(),
            root: NIL,
            len: 0,
            comparator,
        }
    }

    /// Returns the comparator ordering this map.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.store.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Returns true if some entry maps to `value`.
    ///
    /// This is a linear scan over all entries, O(n), unlike the key lookups.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.entries().any(|(_, v)| v == value)
    }

    /// Borrowing in-order traversal of all entries.
    pub fn entries(&self) -> Entries<'_, K, V> {
        let mut entries = Entries {
            store: &self.store,
            stack: Vec::new(),
            remaining: self.len,
        };
        entries.push_left_spine(self.root);
        entries
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries().map(|(k, _)| k)
    }

    /// Values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries().map(|(_, v)| v)
    }

    /// Arena indices of the live nodes in ascending key order.
    fn in_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root;
        while current != NIL || !stack.is_empty() {
            while current != NIL {
                stack.push(current);
                current = self.store[current].left;
            }
            if let Some(idx) = stack.pop() {
                order.push(idx);
                current = self.store[idx].right;
            }
        }
        order
    }

    /// Takes all entries out in ascending order, leaving the map empty.
    fn drain_sorted(&mut self) -> Vec<(K, V)> {
        let drained = self
            .in_order()
            .into_iter()
            .map(|idx| {
                let node = self.store.release(idx);
                (node.key, node.value)
            })
            .collect();
        self.clear();
        drained
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Returns a reference to the value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entry_at(self.find_node(key)).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.find_node(key) {
            NIL => None,
            idx => Some(&mut self.store[idx].value),
        }
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.find_node(key))
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key) != NIL
    }

    /// Keeps only the entries for which `keep` returns true.
    ///
    /// `keep` sees every entry before anything is removed, so a panicking
    /// predicate leaves the map whole. The tree is rebuilt only when some
    /// entry is rejected.
    ///
    /// # Arguments
    ///
    /// * `keep` - Predicate called once per entry in ascending key order
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let order = self.in_order();
        let mut verdicts = Vec::with_capacity(order.len());
        for idx in order {
            let node = &mut self.store[idx];
            verdicts.push(keep(&node.key, &mut node.value));
        }
        if verdicts.iter().all(|&kept| kept) {
            return;
        }

        for ((key, value), kept) in self.drain_sorted().into_iter().zip(verdicts) {
            if kept {
                self.insert(key, value);
            }
        }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> Navigable for TreeMap<K, V, C> {
    type Key = K;
    type Value = V;

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.comparator.compare(a, b)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn get_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.get_key_value(key)
    }

    fn first_entry(&self) -> Option<(&K, &V)> {
        self.entry_at(self.find_minimum(self.root))
    }

    fn last_entry(&self) -> Option<(&K, &V)> {
        self.entry_at(self.find_maximum(self.root))
    }

    fn seek_below(&self, key: &K, inclusive: bool) -> Option<(&K, &V)> {
        self.entry_at(self.seek_below_node(key, inclusive))
    }

    fn seek_above(&self, key: &K, inclusive: bool) -> Option<(&K, &V)> {
        self.entry_at(self.seek_above_node(key, inclusive))
    }
}

impl<K, V, C: Comparator<K>> NavigableMut for TreeMap<K, V, C> {
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(TreeMap::insert(self, key, value))
    }

    fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        TreeMap::remove_entry(self, key)
    }

    fn poll_first(&mut self) -> Result<(K, V)> {
        self.pop_first().ok_or(Error::Empty)
    }

    fn poll_last(&mut self) -> Result<(K, V)> {
        self.pop_last().ok_or(Error::Empty)
    }

    fn clear(&mut self) {
        TreeMap::clear(self);
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for TreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::with_comparator(C::default());
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Borrowing in-order iterator over a [`TreeMap`], see [`TreeMap::entries`].
#[derive(Debug, Clone)]
pub struct Entries<'a, K, V> {
    store: &'a NodeStore<K, V>,
    stack: Vec<usize>,
    remaining: usize,
}

impl<K, V> Entries<'_, K, V> {
    fn push_left_spine(&mut self, mut idx: usize) {
        while idx != NIL {
            self.stack.push(idx);
            idx = self.store[idx].left;
        }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let store = self.store;
        let node = &store[idx];
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

impl<K, V> FusedIterator for Entries<'_, K, V> {}
