use alloc::vec::Vec;
use core::{cmp::Ordering, mem};
use log::trace;

use super::TreeMap;
use super::node::{Color, NIL, Node};
use crate::Comparator;

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Inserts a key-value pair, returning the previous value for an equal key.
    ///
    /// Replacing the value of an existing key leaves the tree shape untouched.
    /// The stored key is kept, not replaced by `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert
    /// * `value` - The value to associate with `key`
    ///
    /// # Returns
    ///
    /// * `Option<V>` - The previous value, or `None` if the key was absent
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut path = Vec::new();
        let mut current = self.root;
        let mut attach_left = false;

        while current != NIL {
            let node = &self.store[current];
            match self.comparator.compare(&key, &node.key) {
                Ordering::Equal => {
                    return Some(mem::replace(&mut self.store[current].value, value));
                }
                Ordering::Less => {
                    attach_left = true;
                    path.push(current);
                    current = node.left;
                }
                Ordering::Greater => {
                    attach_left = false;
                    path.push(current);
                    current = node.right;
                }
            }
        }

        let new_idx = self.store.allocate(Node::new(key, value));
        match path.last() {
            None => self.root = new_idx,
            Some(&parent) if attach_left => self.store[parent].left = new_idx,
            Some(&parent) => self.store[parent].right = new_idx,
        }
        self.len += 1;

        self.fix_insertion_violations(new_idx, path);

        #[cfg(test)]
        debug_assert!(
            self.verify_invariants().is_ok(),
            "RB tree invariants violated after insertion"
        );

        None
    }

    /// Same as [`insert`](Self::insert).
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key, returning the stored key and its value if present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let mut path = Vec::new();
        let mut current = self.root;

        while current != NIL {
            let node = &self.store[current];
            match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return Some(self.delete_node(current, path)),
                Ordering::Less => {
                    path.push(current);
                    current = node.left;
                }
                Ordering::Greater => {
                    path.push(current);
                    current = node.right;
                }
            }
        }
        None
    }

    /// Unlinks and frees `target`, whose ancestors from the root are `path`.
    pub(crate) fn delete_node(&mut self, mut target: usize, mut path: Vec<usize>) -> (K, V) {
        if self.store[target].left != NIL && self.store[target].right != NIL {
            // Trade places with the in-order predecessor, which has no right child.
            path.push(target);
            let mut predecessor = self.store[target].left;
            while self.store[predecessor].right != NIL {
                path.push(predecessor);
                predecessor = self.store[predecessor].right;
            }
            self.store.swap_entries(target, predecessor);
            target = predecessor;
        }

        let node = &self.store[target];
        let child = if node.left != NIL { node.left } else { node.right };
        let removed_color = node.color;
        let parent = path.last().copied().unwrap_or(NIL);
        let child_is_left = parent != NIL && self.store[parent].left == target;

        self.replace_child(parent, target, child);
        let removed = self.store.release(target);
        self.len -= 1;

        if removed_color == Color::Black {
            self.fix_deletion_violations(child, child_is_left, path);
        }

        #[cfg(test)]
        debug_assert!(
            self.verify_invariants().is_ok(),
            "RB tree invariants violated after removal"
        );

        (removed.key, removed.value)
    }

    /// Points `parent`'s link to `old` at `new`; a NIL parent means the root.
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
        } else if self.store[parent].left == old {
            self.store[parent].left = new;
        } else {
            self.store[parent].right = new;
        }
    }

    /// Single right rotation: `pivot`'s left child takes its place under `parent`.
    ///
    /// Returns the new subtree root.
    pub(crate) fn rotate_left_left(&mut self, parent: usize, pivot: usize) -> usize {
        let child = self.store[pivot].left;
        trace!("rotate right at {pivot}");
        self.store[pivot].left = self.store[child].right;
        self.store[child].right = pivot;
        self.replace_child(parent, pivot, child);
        child
    }

    /// Single left rotation: `pivot`'s right child takes its place under `parent`.
    ///
    /// Returns the new subtree root.
    pub(crate) fn rotate_right_right(&mut self, parent: usize, pivot: usize) -> usize {
        let child = self.store[pivot].right;
        trace!("rotate left at {pivot}");
        self.store[pivot].right = self.store[child].left;
        self.store[child].left = pivot;
        self.replace_child(parent, pivot, child);
        child
    }

    /// Double rotation lifting the right child of `pivot`'s left child.
    pub(crate) fn rotate_left_right(&mut self, parent: usize, pivot: usize) -> usize {
        let child = self.store[pivot].left;
        self.rotate_right_right(pivot, child);
        self.rotate_left_left(parent, pivot)
    }

    /// Double rotation lifting the left child of `pivot`'s right child.
    pub(crate) fn rotate_right_left(&mut self, parent: usize, pivot: usize) -> usize {
        let child = self.store[pivot].right;
        self.rotate_left_left(pivot, child);
        self.rotate_right_right(parent, pivot)
    }

    /// Restores the color invariant after `node` was linked as a red leaf.
    ///
    /// `path` holds the ancestors of `node`, root first.
    fn fix_insertion_violations(&mut self, mut node: usize, mut path: Vec<usize>) {
        while let Some(&parent) = path.last() {
            if self.store.is_black(parent) {
                break;
            }
            // A red parent is never the root, so there is a grandparent.
            let Some(&grandparent) = path.iter().rev().nth(1) else {
                break;
            };

            let parent_is_left = self.store[grandparent].left == parent;
            let uncle = if parent_is_left {
                self.store[grandparent].right
            } else {
                self.store[grandparent].left
            };

            if self.store.is_red(uncle) {
                trace!("insert fixup: recolor at {grandparent}");
                self.store.set_color(parent, Color::Black);
                self.store.set_color(uncle, Color::Black);
                self.store.set_color(grandparent, Color::Red);
                node = grandparent;
                path.truncate(path.len() - 2);
                continue;
            }

            let node_is_left = self.store[parent].left == node;
            path.truncate(path.len() - 2);
            let above = path.last().copied().unwrap_or(NIL);

            let top = match (parent_is_left, node_is_left) {
                (true, true) => self.rotate_left_left(above, grandparent),
                (true, false) => self.rotate_left_right(above, grandparent),
                (false, true) => self.rotate_right_left(above, grandparent),
                (false, false) => self.rotate_right_right(above, grandparent),
            };
            self.store.set_color(top, Color::Black);
            self.store.set_color(grandparent, Color::Red);
            break;
        }
        self.store.set_color(self.root, Color::Black);
    }

    /// Repairs black height after a black entry was spliced out.
    ///
    /// `node` is the entry that took its place (possibly NIL), `is_left` its
    /// side under its parent and `path` its ancestors, root first.
    fn fix_deletion_violations(&mut self, mut node: usize, mut is_left: bool, mut path: Vec<usize>) {
        while node != self.root && self.store.is_black(node) {
            let Some(&parent) = path.last() else {
                break;
            };
            let mut sibling = self.sibling(parent, is_left);

            if self.store.is_red(sibling) {
                trace!("delete fixup: red sibling {sibling}");
                self.store.set_color(sibling, Color::Black);
                self.store.set_color(parent, Color::Red);
                let above = path.iter().rev().nth(1).copied().unwrap_or(NIL);
                if is_left {
                    self.rotate_right_right(above, parent);
                } else {
                    self.rotate_left_left(above, parent);
                }
                // The old sibling now sits between `above` and `parent`.
                let at = path.len() - 1;
                path.insert(at, sibling);
                sibling = self.sibling(parent, is_left);
            }

            let (near, far) = if is_left {
                (self.store.left(sibling), self.store.right(sibling))
            } else {
                (self.store.right(sibling), self.store.left(sibling))
            };

            if self.store.is_black(near) && self.store.is_black(far) {
                trace!("delete fixup: push double black up from {parent}");
                self.store.set_color(sibling, Color::Red);
                node = parent;
                path.pop();
                if let Some(&up) = path.last() {
                    is_left = self.store[up].left == node;
                }
                continue;
            }

            if self.store.is_black(far) {
                trace!("delete fixup: red near nephew {near}");
                self.store.set_color(near, Color::Black);
                self.store.set_color(sibling, Color::Red);
                if is_left {
                    self.rotate_left_left(parent, sibling);
                } else {
                    self.rotate_right_right(parent, sibling);
                }
                sibling = near;
            }

            let far = if is_left {
                self.store.right(sibling)
            } else {
                self.store.left(sibling)
            };
            self.store.set_color(sibling, self.store.color(parent));
            self.store.set_color(parent, Color::Black);
            self.store.set_color(far, Color::Black);
            let above = path.iter().rev().nth(1).copied().unwrap_or(NIL);
            if is_left {
                self.rotate_right_right(above, parent);
            } else {
                self.rotate_left_left(above, parent);
            }
            node = self.root;
        }

        self.store.set_color(node, Color::Black);
    }

    #[inline]
    fn sibling(&self, parent: usize, is_left: bool) -> usize {
        if is_left {
            self.store.right(parent)
        } else {
            self.store.left(parent)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::TreeMap;
    use alloc::vec::Vec;

    fn keys(tree: &TreeMap<i32, i32>) -> Vec<i32> {
        tree.keys().copied().collect()
    }

    #[test]
    fn test_insert_replaces_value_without_growing() {
        let mut tree = TreeMap::new();
        assert_eq!(tree.insert(1, 10), None);
        assert_eq!(tree.insert(1, 11), Some(10));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&1), Some(&11));
    }

    #[test]
    fn test_rotation_cases_on_insert() {
        // ascending, descending and zig-zag insertions hit all four shapes
        for order in [[1, 2, 3], [3, 2, 1], [1, 3, 2], [3, 1, 2]] {
            let mut tree = TreeMap::new();
            for k in order {
                tree.insert(k, k);
            }
            assert_eq!(tree.verify_invariants(), Ok(2));
            assert_eq!(keys(&tree), [1, 2, 3]);
        }
    }

    #[test]
    fn test_red_uncle_propagates_to_root() {
        let mut tree = TreeMap::new();
        for k in 1..=15 {
            tree.insert(k, k);
            assert!(tree.verify_invariants().is_ok());
        }
        assert_eq!(keys(&tree), (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn test_remove_leaf_internal_and_root() {
        let mut tree = TreeMap::new();
        for k in [5, 2, 8, 1, 3, 7, 9] {
            tree.insert(k, k * 10);
        }

        assert_eq!(tree.remove(&1), Some(10));
        assert_eq!(tree.remove(&5), Some(50));
        assert_eq!(tree.remove(&8), Some(80));
        assert_eq!(tree.remove(&100), None);
        assert!(tree.verify_invariants().is_ok());
        assert_eq!(keys(&tree), [2, 3, 7, 9]);

        for k in [2, 3, 7, 9] {
            assert!(tree.remove(&k).is_some());
            assert!(tree.verify_invariants().is_ok());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.store.live(), 0);
    }

    #[test]
    fn test_remove_entry_returns_stored_key() {
        let mut tree = TreeMap::new();
        tree.insert(4, 'd');
        tree.insert(2, 'b');
        tree.insert(6, 'f');
        assert_eq!(tree.remove_entry(&4), Some((4, 'd')));
        assert_eq!(tree.remove_entry(&4), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_sliding_window_stress() {
        let mut tree = TreeMap::new();
        let inputs = [10, 105, 112, 109, 115, 119, 123, 121, 118, 125, 101, 99, 130];

        for (i, &value) in inputs.iter().enumerate() {
            if i >= 5 {
                let removed = tree.remove(&inputs[i - 5]);
                assert!(removed.is_some(), "Failed to remove {} at step {}", inputs[i - 5], i);
            }
            assert!(tree.insert(value, i).is_none());
            assert!(tree.len() <= 5, "Tree exceeded window at step {}", i);
            assert!(tree.verify_invariants().is_ok());
        }
    }

    #[test]
    fn test_reverse_order_removal() {
        let mut tree = TreeMap::new();
        for k in 0..200 {
            tree.insert(k, ());
        }
        for k in (0..200).rev() {
            assert_eq!(tree.remove(&k), Some(()));
            assert!(tree.verify_invariants().is_ok());
        }
        assert!(tree.is_empty());
    }
}
