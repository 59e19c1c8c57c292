use core::cmp::Ordering;

use super::TreeMap;
use super::node::{Color, NIL};
use crate::{Comparator, InvariantViolation};

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Checks every red-black invariant in one walk over the tree.
    ///
    /// This is a diagnostic for tests; no tree operation depends on it.
    /// The crate's own unit tests also run it after every insertion and removal.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The black height, counting absent children as black
    /// * `Err(InvariantViolation)` - The first violation found
    pub fn verify_invariants(&self) -> Result<usize, InvariantViolation> {
        if self.store.is_red(self.root) {
            return Err(InvariantViolation::RedRoot);
        }

        let (black_height, found) = self.verify_subtree(self.root, None, None)?;
        if found != self.len {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len,
                found,
            });
        }
        Ok(black_height)
    }

    /// Returns the black height and entry count of the subtree at `idx`,
    /// whose keys must lie strictly between `lower` and `upper`.
    fn verify_subtree(
        &self,
        idx: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(usize, usize), InvariantViolation> {
        if idx == NIL {
            return Ok((1, 0));
        }

        let node = &self.store[idx];
        let below_lower =
            lower.is_some_and(|lo| self.comparator.compare(lo, &node.key) != Ordering::Less);
        let above_upper =
            upper.is_some_and(|hi| self.comparator.compare(&node.key, hi) != Ordering::Less);
        if below_lower || above_upper {
            return Err(InvariantViolation::Unordered);
        }

        if node.color == Color::Red
            && (self.store.is_red(node.left) || self.store.is_red(node.right))
        {
            return Err(InvariantViolation::RedChildOfRed);
        }

        let (left, left_count) = self.verify_subtree(node.left, lower, Some(&node.key))?;
        let (right, right_count) = self.verify_subtree(node.right, Some(&node.key), upper)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { left, right });
        }

        let own = usize::from(node.color == Color::Black);
        Ok((left + own, left_count + right_count + 1))
    }
}
