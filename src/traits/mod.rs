mod navigable;
pub use navigable::{Navigable, NavigableMut};
