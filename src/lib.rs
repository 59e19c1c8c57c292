#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

extern crate alloc;

mod compare;
pub use compare::{Comparator, FloatOrder, Natural};

mod error;
pub use error::{Error, InvariantViolation, Result};

mod traits;
pub use traits::{Navigable, NavigableMut};

mod tree;
pub use tree::{Entries, TreeMap};

mod set;
pub use set::TreeSet;

mod views;
pub use views::{Range, Reversed};

mod iter;
pub use iter::Iter;
