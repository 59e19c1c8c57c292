use log::warn;

use crate::{Error, Navigable, NavigableMut, Result};

/// A cursor walking a [`Navigable`] container in its order.
///
/// The cursor remembers the last key it produced and steps with
/// [`higher`](Navigable::higher) and [`floor`](Navigable::floor), so it holds
/// no snapshot and costs O(log n) per step. Items are cloned out of the
/// container. Descending iteration is this same cursor over a
/// [`Reversed`](crate::Reversed) view.
///
/// Over a writable container, [`remove`](Iter::remove) deletes the element
/// most recently returned by [`next`](Iterator::next) or [`prev`](Iter::prev).
/// Modifying the container by other means while iterating is not supported:
/// later steps may skip or repeat elements, and a removal whose element has
/// vanished fails with [`Error::ConcurrentModification`].
pub struct Iter<N: Navigable> {
    /// The container being walked
    container: N,
    /// Key just before the cursor, `None` before the first element
    position: Option<N::Key>,
    /// Key eligible for `remove`, consumed by it
    removable: Option<N::Key>,
}

impl<N: Navigable> Iter<N> {
    /// Positions a new cursor before the first element of `container`.
    pub const fn new(container: N) -> Self {
        Self {
            container,
            position: None,
            removable: None,
        }
    }

    /// The container being walked.
    pub const fn get_ref(&self) -> &N {
        &self.container
    }
}

impl<N> Iter<N>
where
    N: Navigable,
    N::Key: Clone,
    N::Value: Clone,
{
    /// Steps back, returning the element before the cursor.
    ///
    /// After `next` returned an element, `prev` returns the same element.
    pub fn prev(&mut self) -> Option<(N::Key, N::Value)> {
        let (key, value) = match &self.position {
            None => None,
            Some(position) => self.container.seek_below(position, true),
        }
        .map(|(k, v)| (k.clone(), v.clone()))?;

        self.position = self
            .container
            .seek_below(&key, false)
            .map(|(k, _)| k.clone());
        self.removable = Some(key.clone());
        Some((key, value))
    }
}

impl<N: NavigableMut> Iter<N> {
    /// Removes the element last returned by `next` or `prev`.
    ///
    /// # Returns
    ///
    /// * `Ok(N::Value)` - The removed value
    /// * `Err(Error::IllegalState)` - If nothing was returned since the last
    ///   removal
    /// * `Err(Error::ConcurrentModification)` - If the element is already gone
    pub fn remove(&mut self) -> Result<N::Value> {
        let key = self.removable.take().ok_or(Error::IllegalState)?;
        match self.container.remove_entry(&key) {
            Some((_, value)) => Ok(value),
            None => {
                warn!("iterator element vanished before removal");
                Err(Error::ConcurrentModification)
            }
        }
    }
}

impl<N> Iterator for Iter<N>
where
    N: Navigable,
    N::Key: Clone,
    N::Value: Clone,
{
    type Item = (N::Key, N::Value);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = match &self.position {
            None => self.container.first_entry(),
            Some(position) => self.container.seek_above(position, false),
        }
        .map(|(k, v)| (k.clone(), v.clone()))?;

        self.position = Some(key.clone());
        self.removable = Some(key.clone());
        Some((key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TreeMap, TreeSet};
    use alloc::vec::Vec;

    #[test]
    fn test_forward_and_backward() {
        let set: TreeSet<i32> = [3, 1, 2].into_iter().collect();
        let mut it = set.iter();
        assert_eq!(it.prev(), None);
        assert_eq!(it.next(), Some((1, ())));
        assert_eq!(it.next(), Some((2, ())));
        assert_eq!(it.prev(), Some((2, ())));
        assert_eq!(it.prev(), Some((1, ())));
        assert_eq!(it.prev(), None);
        assert_eq!(it.next(), Some((1, ())));
    }

    #[test]
    fn test_descending_is_reversed_forward() {
        let tree: TreeMap<i32, i32> = (0..10).map(|k| (k, k * k)).collect();
        let down: Vec<(i32, i32)> = tree.iter_rev().collect();
        let mut up: Vec<(i32, i32)> = tree.iter().collect();
        up.reverse();
        assert_eq!(down, up);
    }

    #[test]
    fn test_remove_requires_pending_element() {
        let mut tree: TreeMap<i32, i32> = (0..3).map(|k| (k, k)).collect();
        let mut it = tree.cursor();
        assert_eq!(it.remove(), Err(Error::IllegalState));
        assert_eq!(it.next(), Some((0, 0)));
        assert_eq!(it.remove(), Ok(0));
        assert_eq!(it.remove(), Err(Error::IllegalState));
        assert_eq!(it.next(), Some((1, 1)));
        drop(it);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_remove_every_element() {
        let mut tree: TreeMap<u32, u32> = (0..64).map(|k| (k * 37 % 64, k)).collect();
        let mut it = tree.cursor();
        let mut produced = 0;
        while it.next().is_some() {
            it.remove().unwrap();
            produced += 1;
        }
        drop(it);
        assert_eq!(produced, 64);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_while_descending() {
        let mut tree: TreeMap<i32, ()> = (0..10).map(|k| (k, ())).collect();
        let mut it = tree.cursor_rev();
        while let Some((key, _)) = it.next() {
            if key % 2 == 1 {
                it.remove().unwrap();
            }
        }
        drop(it);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [0, 2, 4, 6, 8]);
        assert!(tree.verify_invariants().is_ok());
    }

    #[test]
    fn test_prev_after_remove() {
        let mut tree: TreeMap<i32, ()> = (0..5).map(|k| (k, ())).collect();
        let mut it = tree.cursor();
        it.next();
        it.next();
        it.next();
        assert_eq!(it.remove(), Ok(()));
        assert_eq!(it.prev(), Some((1, ())));
        assert_eq!(it.next(), Some((1, ())));
        assert_eq!(it.next(), Some((3, ())));
    }

    #[test]
    fn test_external_removal_is_reported() {
        let mut tree: TreeMap<i32, ()> = (0..5).map(|k| (k, ())).collect();
        let mut it = Iter::new(&mut tree);
        it.next();
        it.container.remove(&0);
        assert_eq!(it.remove(), Err(Error::ConcurrentModification));
    }
}
