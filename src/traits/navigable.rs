use core::{cmp::Ordering, ops::Bound};

use crate::{Error, Iter, Range, Result, Reversed};

/// An ordered container that answers navigation queries.
///
/// Implemented by [`TreeMap`](crate::TreeMap), [`TreeSet`](crate::TreeSet),
/// [`Range`] and [`Reversed`], and forwarded through `&T` and `&mut T`, so
/// views compose over trees and over other views alike.
///
/// Implementors provide the seven required methods. Everything else, including
/// the view constructors, is derived from them.
pub trait Navigable {
    /// Key type, ordered by [`compare`](Self::compare).
    type Key;
    /// Mapped value type, `()` for sets.
    type Value;

    /// The order of this container. Reversed views report the reversed order.
    fn compare(&self, a: &Self::Key, b: &Self::Key) -> Ordering;

    /// Number of entries visible through this container.
    ///
    /// O(1) for trees. Range views count their window on every call.
    fn len(&self) -> usize;

    /// The stored entry for `key`, if visible.
    fn get_entry(&self, key: &Self::Key) -> Option<(&Self::Key, &Self::Value)>;

    /// The least entry, or `None` when empty.
    fn first_entry(&self) -> Option<(&Self::Key, &Self::Value)>;

    /// The greatest entry, or `None` when empty.
    fn last_entry(&self) -> Option<(&Self::Key, &Self::Value)>;

    /// The greatest entry less than `key`, or equal to it when `inclusive`.
    fn seek_below(&self, key: &Self::Key, inclusive: bool)
    -> Option<(&Self::Key, &Self::Value)>;

    /// The least entry greater than `key`, or equal to it when `inclusive`.
    fn seek_above(&self, key: &Self::Key, inclusive: bool)
    -> Option<(&Self::Key, &Self::Value)>;

    /// Whether `key` may bound a range view taken from this container.
    ///
    /// Unrestricted containers admit every key. A range view admits keys
    /// inside its window, and an exclusive bound (`inclusive == false`) may
    /// also sit exactly on one of its own exclusive edges.
    fn admits(&self, key: &Self::Key, inclusive: bool) -> bool {
        let _ = (key, inclusive);
        true
    }

    /// Returns true if there are no entries.
    fn is_empty(&self) -> bool {
        self.first_entry().is_none()
    }

    /// The value stored for `key`.
    fn get(&self, key: &Self::Key) -> Option<&Self::Value> {
        self.get_entry(key).map(|(_, v)| v)
    }

    /// Returns true if `key` is present.
    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get_entry(key).is_some()
    }

    /// Returns true if some entry maps to `value`.
    ///
    /// Walks the entries one by one: O(n log n) through the navigation
    /// primitives, never the O(log n) of a key lookup.
    fn contains_value(&self, value: &Self::Value) -> bool
    where
        Self::Value: PartialEq,
    {
        let mut entry = self.first_entry();
        while let Some((key, v)) = entry {
            if v == value {
                return true;
            }
            entry = self.seek_above(key, false);
        }
        false
    }

    /// The least entry.
    ///
    /// # Returns
    ///
    /// * `Err(Error::Empty)` - If the container is empty
    fn first(&self) -> Result<(&Self::Key, &Self::Value)> {
        self.first_entry().ok_or(Error::Empty)
    }

    /// The greatest entry.
    ///
    /// # Returns
    ///
    /// * `Err(Error::Empty)` - If the container is empty
    fn last(&self) -> Result<(&Self::Key, &Self::Value)> {
        self.last_entry().ok_or(Error::Empty)
    }

    /// The greatest entry less than or equal to `key`.
    fn floor(&self, key: &Self::Key) -> Option<(&Self::Key, &Self::Value)> {
        self.seek_below(key, true)
    }

    /// The greatest entry strictly less than `key`.
    fn lower(&self, key: &Self::Key) -> Option<(&Self::Key, &Self::Value)> {
        self.seek_below(key, false)
    }

    /// The least entry greater than or equal to `key`.
    fn ceiling(&self, key: &Self::Key) -> Option<(&Self::Key, &Self::Value)> {
        self.seek_above(key, true)
    }

    /// The least entry strictly greater than `key`.
    fn higher(&self, key: &Self::Key) -> Option<(&Self::Key, &Self::Value)> {
        self.seek_above(key, false)
    }

    /// Read-only view of the entries between `from` and `to`.
    ///
    /// # Arguments
    ///
    /// * `from` - Lower bound of the window
    /// * `from_inclusive` - Whether `from` itself is in the window
    /// * `to` - Upper bound of the window
    /// * `to_inclusive` - Whether `to` itself is in the window
    ///
    /// # Returns
    ///
    /// * `Err(Error::InvalidRange)` - If `to` compares below `from`, or the
    ///   bounds reach outside an enclosing range view
    fn range(
        &self,
        from: Self::Key,
        from_inclusive: bool,
        to: Self::Key,
        to_inclusive: bool,
    ) -> Result<Range<&Self>>
    where
        Self: Sized,
    {
        Range::new(
            self,
            bound(from, from_inclusive),
            bound(to, to_inclusive),
        )
    }

    /// Read-only view of the entries below `to`.
    fn head(&self, to: Self::Key, inclusive: bool) -> Result<Range<&Self>>
    where
        Self: Sized,
    {
        Range::new(self, Bound::Unbounded, bound(to, inclusive))
    }

    /// Read-only view of the entries above `from`.
    fn tail(&self, from: Self::Key, inclusive: bool) -> Result<Range<&Self>>
    where
        Self: Sized,
    {
        Range::new(self, bound(from, inclusive), Bound::Unbounded)
    }

    /// Read-only view in the opposite order.
    fn reversed(&self) -> Reversed<&Self>
    where
        Self: Sized,
    {
        Reversed::new(self)
    }

    /// Ascending iterator over cloned entries.
    fn iter(&self) -> Iter<&Self>
    where
        Self: Sized,
    {
        Iter::new(self)
    }

    /// Descending iterator: the ascending iterator of [`reversed`](Self::reversed).
    fn iter_rev(&self) -> Iter<Reversed<&Self>>
    where
        Self: Sized,
    {
        Iter::new(self.reversed())
    }
}

/// A [`Navigable`] container that can be modified.
pub trait NavigableMut: Navigable {
    /// Inserts `key` with `value`, returning the value it replaced.
    ///
    /// # Returns
    ///
    /// * `Err(Error::OutOfRange)` - If a range view does not cover `key`;
    ///   nothing is modified
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Result<Option<Self::Value>>;

    /// Removes `key`, returning the stored key and value.
    ///
    /// Keys a view does not cover are reported as absent.
    fn remove_entry(&mut self, key: &Self::Key) -> Option<(Self::Key, Self::Value)>;

    /// Removes and returns the least entry.
    ///
    /// # Returns
    ///
    /// * `Err(Error::Empty)` - If the container is empty
    fn poll_first(&mut self) -> Result<(Self::Key, Self::Value)>;

    /// Removes and returns the greatest entry.
    ///
    /// # Returns
    ///
    /// * `Err(Error::Empty)` - If the container is empty
    fn poll_last(&mut self) -> Result<(Self::Key, Self::Value)>;

    /// Removes `key`, returning its value.
    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes every visible entry. A range view only clears its window.
    fn clear(&mut self) {
        while self.poll_first().is_ok() {}
    }

    /// Writable view of the entries between `from` and `to`.
    ///
    /// Same bounds rules as [`Navigable::range`].
    fn range_mut(
        &mut self,
        from: Self::Key,
        from_inclusive: bool,
        to: Self::Key,
        to_inclusive: bool,
    ) -> Result<Range<&mut Self>>
    where
        Self: Sized,
    {
        Range::new(
            self,
            bound(from, from_inclusive),
            bound(to, to_inclusive),
        )
    }

    /// Writable view of the entries below `to`.
    fn head_mut(&mut self, to: Self::Key, inclusive: bool) -> Result<Range<&mut Self>>
    where
        Self: Sized,
    {
        Range::new(self, Bound::Unbounded, bound(to, inclusive))
    }

    /// Writable view of the entries above `from`.
    fn tail_mut(&mut self, from: Self::Key, inclusive: bool) -> Result<Range<&mut Self>>
    where
        Self: Sized,
    {
        Range::new(self, bound(from, inclusive), Bound::Unbounded)
    }

    /// Writable view in the opposite order.
    fn reversed_mut(&mut self) -> Reversed<&mut Self>
    where
        Self: Sized,
    {
        Reversed::new(self)
    }

    /// Ascending iterator whose [`remove`](Iter::remove) writes through.
    fn cursor(&mut self) -> Iter<&mut Self>
    where
        Self: Sized,
    {
        Iter::new(self)
    }

    /// Descending counterpart of [`cursor`](Self::cursor).
    fn cursor_rev(&mut self) -> Iter<Reversed<&mut Self>>
    where
        Self: Sized,
    {
        Iter::new(self.reversed_mut())
    }
}

fn bound<K>(key: K, inclusive: bool) -> Bound<K> {
    if inclusive {
        Bound::Included(key)
    } else {
        Bound::Excluded(key)
    }
}

macro_rules! forward_navigable {
    ($($ref:tt)+) => {
        impl<N: Navigable + ?Sized> Navigable for $($ref)+ N {
            type Key = N::Key;
            type Value = N::Value;

            #[inline]
            fn compare(&self, a: &N::Key, b: &N::Key) -> Ordering {
                (**self).compare(a, b)
            }

            #[inline]
            fn len(&self) -> usize {
                (**self).len()
            }

            #[inline]
            fn get_entry(&self, key: &N::Key) -> Option<(&N::Key, &N::Value)> {
                (**self).get_entry(key)
            }

            #[inline]
            fn first_entry(&self) -> Option<(&N::Key, &N::Value)> {
                (**self).first_entry()
            }

            #[inline]
            fn last_entry(&self) -> Option<(&N::Key, &N::Value)> {
                (**self).last_entry()
            }

            #[inline]
            fn seek_below(&self, key: &N::Key, inclusive: bool) -> Option<(&N::Key, &N::Value)> {
                (**self).seek_below(key, inclusive)
            }

            #[inline]
            fn seek_above(&self, key: &N::Key, inclusive: bool) -> Option<(&N::Key, &N::Value)> {
                (**self).seek_above(key, inclusive)
            }

            #[inline]
            fn admits(&self, key: &N::Key, inclusive: bool) -> bool {
                (**self).admits(key, inclusive)
            }

            #[inline]
            fn is_empty(&self) -> bool {
                (**self).is_empty()
            }
        }
    };
}

forward_navigable!(&);
forward_navigable!(&mut);

impl<N: NavigableMut + ?Sized> NavigableMut for &mut N {
    #[inline]
    fn insert(&mut self, key: N::Key, value: N::Value) -> Result<Option<N::Value>> {
        (**self).insert(key, value)
    }

    #[inline]
    fn remove_entry(&mut self, key: &N::Key) -> Option<(N::Key, N::Value)> {
        (**self).remove_entry(key)
    }

    #[inline]
    fn poll_first(&mut self) -> Result<(N::Key, N::Value)> {
        (**self).poll_first()
    }

    #[inline]
    fn poll_last(&mut self) -> Result<(N::Key, N::Value)> {
        (**self).poll_last()
    }

    #[inline]
    fn clear(&mut self) {
        (**self).clear()
    }
}
