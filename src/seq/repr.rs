//! Sealed sequence representation

use std::fmt;
use std::sync::Arc;

use super::{Cursor, Item};
use crate::memo::Memo;

pub(crate) type CursorFactory<T> = Arc<dyn Fn() -> Cursor<T> + Send + Sync>;

/// Tagged backing of a `Seq`
pub(crate) enum Repr<T: Item> {
    /// No items, no work
    Empty,

    /// Fixed-size buffer; size and random access are O(1)
    Materialized(Arc<[T]>),

    /// Wrapper that records its first complete traversal
    Memoized(Arc<Memo<T>>),

    /// Arbitrary cursor factory (composed operators end up here)
    Lazy(CursorFactory<T>),
}

impl<T: Item> Repr<T> {
    pub(crate) fn cursor(&self) -> Cursor<T> {
        match self {
            Repr::Empty => Box::new(std::iter::empty()),
            Repr::Materialized(items) => Box::new(SliceCursor::new(Arc::clone(items))),
            Repr::Memoized(memo) => memo.cursor(),
            Repr::Lazy(factory) => factory(),
        }
    }
}

impl<T: Item> Clone for Repr<T> {
    fn clone(&self) -> Self {
        match self {
            Repr::Empty => Repr::Empty,
            Repr::Materialized(items) => Repr::Materialized(Arc::clone(items)),
            Repr::Memoized(memo) => Repr::Memoized(Arc::clone(memo)),
            Repr::Lazy(factory) => Repr::Lazy(Arc::clone(factory)),
        }
    }
}

impl<T: Item> fmt::Debug for Repr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repr::Empty => f.write_str("Empty"),
            Repr::Materialized(items) => f
                .debug_struct("Materialized")
                .field("len", &items.len())
                .finish(),
            Repr::Memoized(memo) => f
                .debug_struct("Memoized")
                .field("cached", &memo.published().is_some())
                .finish(),
            Repr::Lazy(_) => f.write_str("Lazy"),
        }
    }
}

/// Cursor over a shared, fixed buffer
#[derive(Debug)]
pub struct SliceCursor<T> {
    items: Arc<[T]>,
    pos: usize,
}

impl<T> SliceCursor<T> {
    /// Cursor positioned before the first item
    pub fn new(items: Arc<[T]>) -> Self {
        Self { items, pos: 0 }
    }
}

impl<T: Clone> Iterator for SliceCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.pos)?.clone();
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.pos = self.pos.saturating_add(n);
        self.next()
    }
}

impl<T: Clone> ExactSizeIterator for SliceCursor<T> {}
