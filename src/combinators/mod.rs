//! Sequence operators
//!
//! Every operator takes one or more sequences plus a callback and returns a
//! new `Seq` without pulling anything. Work happens only when a cursor of the
//! result is advanced, and then only as far as the consumer asks.
//!
//! The sorts are the exception: each cursor of a sorted sequence buffers
//! its whole upstream before yielding the first item.

mod basic;
mod distinct;
mod interleave;
mod sort;
mod window;

pub use sort::{AutoSortKey, NumericKey, SortOrder};
pub use window::WindowMode;
