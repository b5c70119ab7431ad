//! Sequence handle
//!
//! A `Seq<T>` never changes after construction. Every call to
//! [`Seq::cursor`] starts a new, independent walk; cursors are single-use
//! and owned by whoever advances them.
//!
//! Representation is a sealed tag so fast paths (size, random access,
//! re-wrapping) are decided by `match`, not by inspecting runtime types.

mod apply;
mod query;
mod repr;

pub use apply::{ApplyFailure, ApplyReport};
pub use repr::SliceCursor;

pub(crate) use repr::Repr;

use std::fmt;
use std::sync::Arc;

/// Stateful, advance-only walk over a sequence
pub type Cursor<T> = Box<dyn Iterator<Item = T> + Send>;

/// Bound shared by every item type
///
/// Items are cloned out of shared buffers and may be handed to cursors on
/// other threads.
pub trait Item: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Item for T {}

/// Immutable, replayable handle over a (possibly infinite) ordered collection
pub struct Seq<T: Item> {
    pub(crate) repr: Repr<T>,
}

impl<T: Item> Seq<T> {
    /// Sequence with no items
    pub fn empty() -> Self {
        Self { repr: Repr::Empty }
    }

    /// Sequence backed by a fixed buffer
    pub fn from_vec(items: Vec<T>) -> Self {
        if items.is_empty() {
            return Self::empty();
        }
        Self {
            repr: Repr::Materialized(items.into()),
        }
    }

    /// Single-item sequence
    pub fn once(item: T) -> Self {
        Self::from_vec(vec![item])
    }

    /// Sequence whose cursors come from `factory`
    ///
    /// `factory` is called once per cursor, so it must be able to start over.
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::lazy(move || Box::new(factory().into_iter()))
    }

    /// Treat an absent upstream as empty
    pub fn or_empty(seq: Option<Seq<T>>) -> Self {
        seq.unwrap_or_else(Self::empty)
    }

    /// Start a fresh cursor
    pub fn cursor(&self) -> Cursor<T> {
        self.repr.cursor()
    }

    /// True when the sequence is backed by a fixed buffer (or is empty)
    pub fn is_materialized(&self) -> bool {
        matches!(self.repr, Repr::Empty | Repr::Materialized(_))
    }

    pub(crate) fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> Cursor<T> + Send + Sync + 'static,
    {
        Self {
            repr: Repr::Lazy(Arc::new(factory)),
        }
    }

    /// Known to be empty without running anything
    pub(crate) fn is_known_empty(&self) -> bool {
        match &self.repr {
            Repr::Empty => true,
            Repr::Materialized(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl<T: Item> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
        }
    }
}

impl<T: Item> Default for Seq<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Item> From<Vec<T>> for Seq<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Item> FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Item> IntoIterator for &Seq<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

impl<T: Item> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq").field("repr", &self.repr).finish()
    }
}
