use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Sentinel index standing for an absent child or an empty root.
pub(crate) const NIL: usize = usize::MAX;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from root to leaves have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Red node - must have black children, cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

/// A node in the Red-Black tree holding one entry and its two child links.
///
/// There is no parent link. Code that needs ancestors records the path taken
/// from the root instead.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// The key, never modified while the node is linked into the tree
    pub(crate) key: K,

    /// The mapped value, `()` for sets
    pub(crate) value: V,

    /// Index of left child node in the store (NIL if no left child)
    pub(crate) left: usize,

    /// Index of right child node in the store (NIL if no right child)
    pub(crate) right: usize,

    /// Color of this node (Red or Black) used for Red-Black tree balancing
    pub(crate) color: Color,
}

impl<K, V> Node<K, V> {
    /// New nodes are red leaves.
    #[inline]
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: NIL,
            right: NIL,
            color: Color::Red,
        }
    }
}

/// Growable arena of nodes addressed by index.
///
/// Freed slots are recycled through a LIFO free list, so indices stay stable
/// for as long as a node is linked.
#[derive(Debug, Clone)]
pub(crate) struct NodeStore<K, V> {
    /// Node slots, `None` once released
    slots: Vec<Option<Node<K, V>>>,

    /// Stack of released slot indices available for reuse
    free_list: Vec<usize>,
}

impl<K, V> NodeStore<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn allocate(&mut self, node: Node<K, V>) -> usize {
        match self.free_list.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx].is_none());
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn release(&mut self, idx: usize) -> Node<K, V> {
        match self.slots.get_mut(idx).and_then(Option::take) {
            Some(node) => {
                self.free_list.push(idx);
                node
            }
            None => unreachable!("released node {idx} is not live"),
        }
    }

    /// Exchanges key and value of two live nodes, leaving links and colors.
    pub(crate) fn swap_entries(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi);
        match (head[lo].as_mut(), tail[0].as_mut()) {
            (Some(x), Some(y)) => {
                core::mem::swap(&mut x.key, &mut y.key);
                core::mem::swap(&mut x.value, &mut y.value);
            }
            _ => unreachable!("swapped nodes {a} and {b} must both be live"),
        }
    }

    #[inline]
    pub(crate) fn color(&self, idx: usize) -> Color {
        if idx == NIL {
            Color::Black
        } else {
            self[idx].color
        }
    }

    #[inline]
    pub(crate) fn set_color(&mut self, idx: usize, color: Color) {
        if idx != NIL {
            self[idx].color = color;
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, idx: usize) -> bool {
        self.color(idx) == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self, idx: usize) -> bool {
        self.color(idx) == Color::Black
    }

    #[inline]
    pub(crate) fn left(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self[idx].left }
    }

    #[inline]
    pub(crate) fn right(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self[idx].right }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }

    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}

impl<K, V> Index<usize> for NodeStore<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, idx: usize) -> &Node<K, V> {
        match self.slots.get(idx) {
            Some(Some(node)) => node,
            _ => unreachable!("node {idx} is not live"),
        }
    }
}

impl<K, V> IndexMut<usize> for NodeStore<K, V> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        match self.slots.get_mut(idx) {
            Some(Some(node)) => node,
            _ => unreachable!("node {idx} is not live"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_reuses_released_slots() {
        let mut store = NodeStore::new();
        let a = store.allocate(Node::new(1, 'a'));
        let b = store.allocate(Node::new(2, 'b'));
        assert_eq!(store.live(), 2);

        let node = store.release(a);
        assert_eq!((node.key, node.value), (1, 'a'));
        assert_eq!(store.live(), 1);

        let c = store.allocate(Node::new(3, 'c'));
        assert_eq!(c, a);
        assert_eq!(store[b].key, 2);
        assert_eq!(store[c].key, 3);
    }

    #[test]
    fn test_nil_reads_as_black_leaf() {
        let store = NodeStore::<u8, ()>::new();
        assert!(store.is_black(NIL));
        assert_eq!(store.left(NIL), NIL);
        assert_eq!(store.right(NIL), NIL);
    }

    #[test]
    fn test_swap_entries_keeps_links() {
        let mut store = NodeStore::new();
        let a = store.allocate(Node::new(1, "one"));
        let b = store.allocate(Node::new(2, "two"));
        store[a].left = b;
        store.set_color(b, Color::Black);

        store.swap_entries(a, b);
        assert_eq!((store[a].key, store[a].value), (2, "two"));
        assert_eq!((store[b].key, store[b].value), (1, "one"));
        assert_eq!(store[a].left, b);
        assert!(store.is_black(b));
        assert!(store.is_red(a));
    }

    #[test]
    #[should_panic(expected = "is not live")]
    fn test_released_index_is_fatal() {
        let mut store = NodeStore::new();
        let a = store.allocate(Node::new(1, ()));
        store.release(a);
        let _ = store[a].key;
    }
}
