//! Error types for navigable containers and their views.
//!
//! Lookups of absent keys are not errors; they return `None`. The variants of
//! [`Error`] cover the remaining recoverable failures, each reported to the
//! immediate caller and never retried internally.
//!
//! [`InvariantViolation`] is different in kind: it means the balancing engine
//! itself is broken. It is only produced by
//! [`TreeMap::verify_invariants`](crate::TreeMap::verify_invariants).

use thiserror::Error;

/// Errors raised by trees, views and iterators.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `first`, `last`, `poll_first` or `poll_last` on an empty container.
    #[error("container is empty")]
    Empty,

    /// A range view whose upper bound compares below its lower bound, or a
    /// nested range that reaches outside the view it was taken from.
    #[error("invalid range bounds")]
    InvalidRange,

    /// An insertion through a range view with a key outside its window.
    /// The backing container is left unmodified.
    #[error("key is outside the range of this view")]
    OutOfRange,

    /// `remove` on an iterator with no pending element, either because
    /// nothing has been produced yet or because it was already removed.
    #[error("iterator has no element to remove")]
    IllegalState,

    /// The element an iterator was about to remove is gone, meaning the
    /// container was modified by something other than the iterator.
    #[error("container was modified outside the iterator")]
    ConcurrentModification,
}

/// Red-black invariant violations found by
/// [`TreeMap::verify_invariants`](crate::TreeMap::verify_invariants).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An entry is on the wrong side of one of its ancestors.
    #[error("binary search tree order violated")]
    Unordered,

    /// The root entry is red.
    #[error("root entry is red")]
    RedRoot,

    /// A red entry has a red child.
    #[error("red entry has a red child")]
    RedChildOfRed,

    /// Two root-to-leaf paths disagree on their black count.
    #[error("black height differs between paths: {left} vs {right}")]
    BlackHeightMismatch {
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },

    /// The cached entry count differs from the number of reachable entries.
    #[error("tree reports {expected} entries but {found} are reachable")]
    LengthMismatch {
        /// The count the tree reports.
        expected: usize,
        /// The count actually reachable from the root.
        found: usize,
    },
}

/// A `Result` alias using the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::Empty.to_string(), "container is empty");
        assert_eq!(
            InvariantViolation::BlackHeightMismatch { left: 2, right: 3 }.to_string(),
            "black height differs between paths: 2 vs 3"
        );
    }
}
