use alloc::vec::Vec;
use core::cmp::Ordering;

use super::TreeMap;
use super::node::NIL;
use crate::Comparator;

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    pub(crate) fn find_node(&self, key: &K) -> usize {
        let mut current = self.root;

        while current != NIL {
            let node = &self.store[current];
            match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return current,
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        NIL
    }

    pub(crate) fn find_minimum(&self, mut node: usize) -> usize {
        while node != NIL {
            let left = self.store[node].left;
            if left == NIL {
                break;
            }
            node = left;
        }
        node
    }

    pub(crate) fn find_maximum(&self, mut node: usize) -> usize {
        while node != NIL {
            let right = self.store[node].right;
            if right == NIL {
                break;
            }
            node = right;
        }
        node
    }

    /// Greatest entry below `key` (or equal to it when `inclusive`).
    ///
    /// Descends once, remembering the last entry passed on its smaller side.
    pub(crate) fn seek_below_node(&self, key: &K, inclusive: bool) -> usize {
        let mut fallback = NIL;
        let mut current = self.root;

        while current != NIL {
            let node = &self.store[current];
            match self.comparator.compare(key, &node.key) {
                Ordering::Greater => {
                    fallback = current;
                    current = node.right;
                }
                Ordering::Less => current = node.left,
                Ordering::Equal if inclusive => return current,
                Ordering::Equal if node.left != NIL => return self.find_maximum(node.left),
                Ordering::Equal => return fallback,
            }
        }
        fallback
    }

    /// Least entry above `key` (or equal to it when `inclusive`).
    pub(crate) fn seek_above_node(&self, key: &K, inclusive: bool) -> usize {
        let mut fallback = NIL;
        let mut current = self.root;

        while current != NIL {
            let node = &self.store[current];
            match self.comparator.compare(key, &node.key) {
                Ordering::Less => {
                    fallback = current;
                    current = node.left;
                }
                Ordering::Greater => current = node.right,
                Ordering::Equal if inclusive => return current,
                Ordering::Equal if node.right != NIL => return self.find_minimum(node.right),
                Ordering::Equal => return fallback,
            }
        }
        fallback
    }

    /// Removes the leftmost entry in a single descent.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        if self.root == NIL {
            return None;
        }
        let mut path = Vec::new();
        let mut current = self.root;
        while self.store[current].left != NIL {
            path.push(current);
            current = self.store[current].left;
        }
        Some(self.delete_node(current, path))
    }

    /// Removes the rightmost entry in a single descent.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        if self.root == NIL {
            return None;
        }
        let mut path = Vec::new();
        let mut current = self.root;
        while self.store[current].right != NIL {
            path.push(current);
            current = self.store[current].right;
        }
        Some(self.delete_node(current, path))
    }

    #[inline]
    pub(crate) fn entry_at(&self, idx: usize) -> Option<(&K, &V)> {
        if idx == NIL {
            None
        } else {
            let node = &self.store[idx];
            Some((&node.key, &node.value))
        }
    }
}
