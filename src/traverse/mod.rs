//! Cycle-safe graph traversal
//!
//! One algorithm drives both orders. The graph is implicit: a "children of"
//! callback returns the successors of an item, or `None` for a leaf. The
//! sequence being traversed supplies the start items.
//!
//! Producing the next item pops from the front branch of the frontier until
//! an item outside the seen-set turns up. That item's children are fetched
//! only when the consumer advances past it, and go to the back of the
//! frontier (breadth-first) or the front (depth-first, pre-order).
//!
//! Within one run an item is emitted at most once, so cyclic graphs
//! terminate as long as they have finitely many distinct items. Infinite
//! graphs of never-repeating items are fine to traverse lazily but must be
//! bounded by the consumer, e.g. with [`Seq::first`].

mod arena;
mod frontier;

pub use arena::{NodeId, RoseArena};

use std::hash::Hash;
use std::sync::Arc;

use tracing::debug;

use crate::seq::{Item, Seq};
use frontier::Frontier;

/// Insertion end for newly discovered children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Children queue behind everything pending: level order
    #[default]
    BreadthFirst,
    /// Children jump ahead of everything pending: pre-order
    DepthFirst,
}

/// Traversal parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalConfig {
    /// Breadth-first or depth-first
    pub order: TraversalOrder,

    /// Deepest level whose children are still fetched is `max_depth - 1`;
    /// start items are depth 0. `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl TraversalConfig {
    /// Unbounded breadth-first traversal
    pub fn breadth_first() -> Self {
        Self {
            order: TraversalOrder::BreadthFirst,
            max_depth: None,
        }
    }

    /// Unbounded depth-first traversal
    pub fn depth_first() -> Self {
        Self {
            order: TraversalOrder::DepthFirst,
            max_depth: None,
        }
    }

    /// Stop descending below `max_depth` (0 yields only the start items)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    fn descends_below(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }
}

type ChildrenFn<T> = dyn Fn(&T) -> Option<Seq<T>> + Send + Sync;
type KeyFn<T, K> = dyn Fn(&T) -> K + Send + Sync;
type PruneFn<T> = dyn Fn(&T) -> bool + Send + Sync;

fn by_value<T: Item>() -> Arc<KeyFn<T, T>> {
    Arc::new(T::clone)
}

fn pruning<T, P>(stop: P) -> Arc<PruneFn<T>>
where
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    Arc::new(stop)
}

/// Everything a traversal cursor needs besides its own state
struct Plan<T: Item, K> {
    config: TraversalConfig,
    children: Arc<ChildrenFn<T>>,
    key: Arc<KeyFn<T, K>>,
    prune: Option<Arc<PruneFn<T>>>,
}

/// Traversal cursor
///
/// `pending` is the item handed out last; its children are pushed on the
/// next advance.
struct Traversal<T: Item, K> {
    plan: Arc<Plan<T, K>>,
    frontier: Frontier<T, K>,
    pending: Option<(usize, T)>,
    finished: bool,
}

impl<T: Item, K: Eq + Hash> Traversal<T, K> {
    fn expand(&mut self, depth: usize, item: &T) {
        if !self.plan.config.descends_below(depth) {
            return;
        }
        if let Some(prune) = &self.plan.prune {
            if prune(item) {
                return;
            }
        }
        let Some(children) = (self.plan.children)(item) else {
            return;
        };
        if !children.is_known_empty() {
            self.frontier.push(depth + 1, children.cursor());
        }
    }
}

impl<T: Item, K: Eq + Hash> Iterator for Traversal<T, K> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.finished {
            return None;
        }
        if let Some((depth, item)) = self.pending.take() {
            self.expand(depth, &item);
        }
        let key = Arc::clone(&self.plan.key);
        match self.frontier.next_unseen(|item| key(item)) {
            Some((depth, item)) => {
                self.pending = Some((depth, item.clone()));
                Some(item)
            }
            None => {
                self.finished = true;
                debug!(
                    visited = self.frontier.visited(),
                    live = self.frontier.width(),
                    "traversal exhausted"
                );
                None
            }
        }
    }
}

impl<T: Item> Seq<T> {
    fn traverse_with<K, C, S>(
        &self,
        config: TraversalConfig,
        key: Arc<KeyFn<T, K>>,
        prune: Option<Arc<PruneFn<T>>>,
        children: C,
    ) -> Seq<T>
    where
        K: Eq + Hash + Send + 'static,
        C: Fn(&T) -> S + Send + Sync + 'static,
        S: Into<Option<Seq<T>>>,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let children: Arc<ChildrenFn<T>> =
            Arc::new(move |item: &T| -> Option<Seq<T>> { children(item).into() });
        let plan = Arc::new(Plan {
            config,
            children,
            key,
            prune,
        });
        let roots = self.clone();
        Seq::lazy(move || {
            Box::new(Traversal {
                plan: Arc::clone(&plan),
                frontier: Frontier::new(roots.cursor(), config.order),
                pending: None,
                finished: false,
            })
        })
    }

    /// Traverse from this sequence's items, deduplicating by value
    pub fn traverse<C, S>(&self, config: TraversalConfig, children: C) -> Seq<T>
    where
        T: Eq + Hash,
        C: Fn(&T) -> S + Send + Sync + 'static,
        S: Into<Option<Seq<T>>>,
    {
        self.traverse_with(config, by_value(), None, children)
    }

    /// Traverse, deduplicating by `key` instead of value
    ///
    /// Use an identity key (arena index, pointer, id) when structurally equal
    /// items are distinct nodes that must all be visited.
    pub fn traverse_by_key<K, F, C, S>(
        &self,
        config: TraversalConfig,
        key: F,
        children: C,
    ) -> Seq<T>
    where
        K: Eq + Hash + Send + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: Fn(&T) -> S + Send + Sync + 'static,
        S: Into<Option<Seq<T>>>,
    {
        let key: Arc<KeyFn<T, K>> = Arc::new(key);
        self.traverse_with(config, key, None, children)
    }

    /// Level-order traversal
    pub fn breadth_first<C, S>(&self, children: C) -> Seq<T>
    where
        T: Eq + Hash,
        C: Fn(&T) -> S + Send + Sync + 'static,
        S: Into<Option<Seq<T>>>,
    {
        self.traverse(TraversalConfig::breadth_first(), children)
    }

    /// Pre-order traversal
    pub fn depth_first<C, S>(&self, children: C) -> Seq<T>
    where
        T: Eq + Hash,
        C: Fn(&T) -> S + Send + Sync + 'static,
        S: Into<Option<Seq<T>>>,
    {
        self.traverse(TraversalConfig::depth_first(), children)
    }

    /// Level-order traversal that emits but does not descend below items
    /// matching `stop`
    pub fn breadth_first_not_below<C, S, P>(&self, children: C, stop: P) -> Seq<T>
    where
        T: Eq + Hash,
        C: Fn(&T) -> S + Send + Sync + 'static,
        S: Into<Option<Seq<T>>>,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.traverse_with(
            TraversalConfig::breadth_first(),
            by_value(),
            Some(pruning(stop)),
            children,
        )
    }

    /// Pre-order traversal that emits but does not descend below items
    /// matching `stop`
    pub fn depth_first_not_below<C, S, P>(&self, children: C, stop: P) -> Seq<T>
    where
        T: Eq + Hash,
        C: Fn(&T) -> S + Send + Sync + 'static,
        S: Into<Option<Seq<T>>>,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.traverse_with(
            TraversalConfig::depth_first(),
            by_value(),
            Some(pruning(stop)),
            children,
        )
    }
}
