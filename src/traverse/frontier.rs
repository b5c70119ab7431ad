//! Traversal frontier
//!
//! A double-ended list of live branch cursors plus the seen-set of the
//! current run. Where new branches are inserted is the only difference
//! between breadth-first (back) and depth-first (front).

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use tracing::trace;

use super::TraversalOrder;
use crate::seq::Cursor;

/// Pending branch: a cursor over siblings that all sit at `depth`
struct Branch<T> {
    depth: usize,
    cursor: Cursor<T>,
}

pub(crate) struct Frontier<T, K> {
    branches: VecDeque<Branch<T>>,
    seen: HashSet<K>,
    order: TraversalOrder,
}

impl<T, K: Eq + Hash> Frontier<T, K> {
    /// Frontier holding one branch over the start items
    pub(crate) fn new(roots: Cursor<T>, order: TraversalOrder) -> Self {
        let mut branches = VecDeque::new();
        branches.push_back(Branch {
            depth: 0,
            cursor: roots,
        });
        Self {
            branches,
            seen: HashSet::new(),
            order,
        }
    }

    /// Insert a branch of children
    pub(crate) fn push(&mut self, depth: usize, cursor: Cursor<T>) {
        let branch = Branch { depth, cursor };
        match self.order {
            TraversalOrder::BreadthFirst => self.branches.push_back(branch),
            TraversalOrder::DepthFirst => self.branches.push_front(branch),
        }
    }

    /// Next item whose key has not been seen, with its depth
    ///
    /// Exhausted branches are dropped along the way.
    pub(crate) fn next_unseen<F>(&mut self, key: F) -> Option<(usize, T)>
    where
        F: Fn(&T) -> K,
    {
        loop {
            let branch = self.branches.front_mut()?;
            let depth = branch.depth;
            let Some(item) = branch.cursor.next() else {
                self.branches.pop_front();
                continue;
            };
            if self.seen.insert(key(&item)) {
                return Some((depth, item));
            }
            trace!(depth, "skipping item already visited in this run");
        }
    }

    /// Live branches
    pub(crate) fn width(&self) -> usize {
        self.branches.len()
    }

    /// Distinct items emitted so far
    pub(crate) fn visited(&self) -> usize {
        self.seen.len()
    }
}
