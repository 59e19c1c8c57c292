mod range;
pub use range::Range;

mod reversed;
pub use reversed::Reversed;
