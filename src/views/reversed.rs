use core::{cmp::Ordering, fmt};

use crate::{Navigable, NavigableMut, Result};

/// A live view of a [`Navigable`] container in the opposite order.
///
/// Edge queries and iteration are mirrored; storage is not. Inserting through
/// the view inserts into the wrapped container. Wrapping a [`Range`](crate::Range)
/// keeps its bounds and inverts its order.
#[derive(Clone, Copy)]
pub struct Reversed<N> {
    inner: N,
}

impl<N> Reversed<N> {
    /// Wraps `inner`.
    pub const fn new(inner: N) -> Self {
        Self { inner }
    }

    /// The wrapped container.
    pub const fn get_ref(&self) -> &N {
        &self.inner
    }

    /// Unwraps the view. Reversing twice and unwrapping gives back the
    /// original container.
    pub fn into_inner(self) -> N {
        self.inner
    }
}

impl<N: Navigable> Navigable for Reversed<N> {
    type Key = N::Key;
    type Value = N::Value;

    #[inline]
    fn compare(&self, a: &N::Key, b: &N::Key) -> Ordering {
        self.inner.compare(b, a)
    }

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn get_entry(&self, key: &N::Key) -> Option<(&N::Key, &N::Value)> {
        self.inner.get_entry(key)
    }

    #[inline]
    fn first_entry(&self) -> Option<(&N::Key, &N::Value)> {
        self.inner.last_entry()
    }

    #[inline]
    fn last_entry(&self) -> Option<(&N::Key, &N::Value)> {
        self.inner.first_entry()
    }

    #[inline]
    fn seek_below(&self, key: &N::Key, inclusive: bool) -> Option<(&N::Key, &N::Value)> {
        self.inner.seek_above(key, inclusive)
    }

    #[inline]
    fn seek_above(&self, key: &N::Key, inclusive: bool) -> Option<(&N::Key, &N::Value)> {
        self.inner.seek_below(key, inclusive)
    }

    #[inline]
    fn admits(&self, key: &N::Key, inclusive: bool) -> bool {
        self.inner.admits(key, inclusive)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<N: NavigableMut> NavigableMut for Reversed<N> {
    #[inline]
    fn insert(&mut self, key: N::Key, value: N::Value) -> Result<Option<N::Value>> {
        self.inner.insert(key, value)
    }

    #[inline]
    fn remove_entry(&mut self, key: &N::Key) -> Option<(N::Key, N::Value)> {
        self.inner.remove_entry(key)
    }

    #[inline]
    fn poll_first(&mut self) -> Result<(N::Key, N::Value)> {
        self.inner.poll_last()
    }

    #[inline]
    fn poll_last(&mut self) -> Result<(N::Key, N::Value)> {
        self.inner.poll_first()
    }

    #[inline]
    fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<N> fmt::Debug for Reversed<N>
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
