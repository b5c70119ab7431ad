//! Size, membership and positional queries
//!
//! Each query drives a fresh cursor unless the representation already knows
//! the answer (fixed buffer, published replay buffer).

use super::{Item, Repr, Seq};

impl<T: Item> Seq<T> {
    /// Number of items
    ///
    /// Drives a cursor to completion unless the size is already known.
    /// Never returns on an infinite sequence.
    pub fn count(&self) -> usize {
        match &self.repr {
            Repr::Empty => 0,
            Repr::Materialized(items) => items.len(),
            Repr::Memoized(memo) => memo.len(),
            Repr::Lazy(_) => self.cursor().count(),
        }
    }

    /// True when the first cursor advance yields nothing
    pub fn is_empty(&self) -> bool {
        match &self.repr {
            Repr::Empty => true,
            Repr::Materialized(items) => items.is_empty(),
            _ => self.cursor().next().is_none(),
        }
    }

    /// Stops at the first equal item
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.cursor().any(|candidate| &candidate == item)
    }

    /// Item at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<T> {
        match &self.repr {
            Repr::Empty => None,
            Repr::Materialized(items) => items.get(index).cloned(),
            Repr::Memoized(memo) => memo.get(index),
            Repr::Lazy(_) => self.cursor().nth(index),
        }
    }

    /// First item
    pub fn head(&self) -> Option<T> {
        self.get(0)
    }

    /// Last item. Never returns on an infinite sequence.
    pub fn last(&self) -> Option<T> {
        match &self.repr {
            Repr::Empty => None,
            Repr::Materialized(items) => items.last().cloned(),
            Repr::Memoized(memo) => match memo.published() {
                Some(items) => items.last().cloned(),
                None => self.cursor().last(),
            },
            Repr::Lazy(_) => self.cursor().last(),
        }
    }

    /// Index of the first item matching `predicate`
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(T) -> bool,
    {
        self.cursor().position(predicate)
    }

    /// Collect every item. Never returns on an infinite sequence.
    pub fn to_vec(&self) -> Vec<T> {
        match &self.repr {
            Repr::Materialized(items) => items.to_vec(),
            _ => self.cursor().collect(),
        }
    }

    /// Fixed-buffer copy of this sequence
    ///
    /// Returns `self` unchanged when it is already materialized.
    /// Never returns on an infinite sequence.
    pub fn materialize(&self) -> Seq<T> {
        if self.is_materialized() {
            return self.clone();
        }
        Seq::from_vec(self.to_vec())
    }
}
