//! Cache on first full traversal
//!
//! A memoized sequence starts out as a pass-through. Each cursor that runs
//! against the upstream records what it yields; the first one to reach the
//! end publishes its record as the replay buffer. Publication goes through a
//! write-once cell, so exactly one record wins even when cursors finish on
//! different threads. Later cursors read the buffer and never touch the
//! upstream again.
//!
//! Cursors already in flight when the buffer lands keep their own state.
//! A cursor dropped before the end publishes nothing.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::seq::{Cursor, Item, Repr, Seq, SliceCursor};

/// Shared state behind a memoized `Seq`
pub(crate) struct Memo<T: Item> {
    upstream: Seq<T>,
    buffer: OnceCell<Arc<[T]>>,
}

impl<T: Item> Memo<T> {
    pub(crate) fn new(upstream: Seq<T>) -> Self {
        Self {
            upstream,
            buffer: OnceCell::new(),
        }
    }

    /// Replay buffer, once some cursor has finished
    pub(crate) fn published(&self) -> Option<&Arc<[T]>> {
        self.buffer.get()
    }

    /// Offer a complete record; returns whether it became the replay buffer
    fn publish(&self, record: Vec<T>) -> bool {
        let len = record.len();
        match self.buffer.set(Arc::from(record)) {
            Ok(()) => {
                debug!(len, "memoized sequence published replay buffer");
                true
            }
            Err(_) => {
                trace!(len, "replay buffer already published; discarding record");
                false
            }
        }
    }

    pub(crate) fn cursor(self: &Arc<Self>) -> Cursor<T> {
        match self.published() {
            Some(items) => Box::new(SliceCursor::new(Arc::clone(items))),
            None => Box::new(Recording {
                memo: Arc::clone(self),
                upstream: Some(self.upstream.cursor()),
                record: Vec::new(),
            }),
        }
    }

    /// Item count; a full count on an unpublished memo publishes it
    pub(crate) fn len(self: &Arc<Self>) -> usize {
        match self.published() {
            Some(items) => items.len(),
            None => self.cursor().count(),
        }
    }

    /// Random access through the buffer when available, linear otherwise
    pub(crate) fn get(&self, index: usize) -> Option<T> {
        match self.published() {
            Some(items) => items.get(index).cloned(),
            None => self.upstream.get(index),
        }
    }
}

/// Cursor that drives the upstream and keeps a private record
struct Recording<T: Item> {
    memo: Arc<Memo<T>>,
    /// `None` once the upstream is exhausted
    upstream: Option<Cursor<T>>,
    record: Vec<T>,
}

impl<T: Item> Iterator for Recording<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let upstream = self.upstream.as_mut()?;
        match upstream.next() {
            Some(item) => {
                self.record.push(item.clone());
                Some(item)
            }
            None => {
                self.upstream = None;
                self.memo.publish(std::mem::take(&mut self.record));
                None
            }
        }
    }
}

impl<T: Item> Seq<T> {
    /// Wrap so the first complete traversal is cached for every later one
    ///
    /// Fixed buffers and already-memoized sequences come back unchanged.
    pub fn memoize(&self) -> Seq<T> {
        match &self.repr {
            Repr::Empty | Repr::Materialized(_) | Repr::Memoized(_) => self.clone(),
            Repr::Lazy(_) => Seq {
                repr: Repr::Memoized(Arc::new(Memo::new(self.clone()))),
            },
        }
    }

    /// True when the next cursor will be served from a fixed buffer
    pub fn is_cached(&self) -> bool {
        match &self.repr {
            Repr::Empty | Repr::Materialized(_) => true,
            Repr::Memoized(memo) => memo.published().is_some(),
            Repr::Lazy(_) => false,
        }
    }
}
