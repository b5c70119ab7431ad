//! Round-robin merge of several sequences

use std::collections::VecDeque;
use std::sync::Arc;

use crate::seq::{Cursor, Item, Seq};

/// Rotates through live cursors; exhausted ones drop out of the ring
struct Interleave<T> {
    ring: VecDeque<Cursor<T>>,
}

impl<T> Iterator for Interleave<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while let Some(mut cursor) = self.ring.pop_front() {
            if let Some(item) = cursor.next() {
                self.ring.push_back(cursor);
                return Some(item);
            }
        }
        None
    }
}

impl<T: Item> Seq<T> {
    /// One item from each source in turn, skipping exhausted sources
    pub fn interleave(sources: Vec<Seq<T>>) -> Seq<T> {
        let sources: Vec<Seq<T>> = sources
            .into_iter()
            .filter(|s| !s.is_known_empty())
            .collect();
        if sources.is_empty() {
            return Seq::empty();
        }
        let sources: Arc<[Seq<T>]> = sources.into();
        Seq::lazy(move || {
            Box::new(Interleave {
                ring: sources.iter().map(Seq::cursor).collect(),
            })
        })
    }

    /// `self` interleaved with `others`, starting with `self`
    pub fn interleave_with(&self, others: &[Seq<T>]) -> Seq<T> {
        let mut sources = Vec::with_capacity(others.len() + 1);
        sources.push(self.clone());
        sources.extend(others.iter().cloned());
        Seq::interleave(sources)
    }
}
