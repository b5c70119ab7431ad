//! Rose tree arena
//!
//! Grows a tree from a root and a child extractor with an explicit
//! worklist, so wide or deep trees never grow the call stack. Nodes live in
//! one vector and refer to their children by index.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use super::TraversalConfig;
use crate::seq::{Item, Seq};
use crate::SeqError;

/// Index of a node inside its [`RoseArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in arena order (breadth-first growth order)
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    depth: usize,
    children: Vec<NodeId>,
}

/// Immutable rose tree with index-based children
///
/// Cloning shares the node storage.
#[derive(Debug)]
pub struct RoseArena<T> {
    nodes: Arc<Vec<Node<T>>>,
}

impl<T> Clone for RoseArena<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: Arc::clone(&self.nodes),
        }
    }
}

impl<T: Item> RoseArena<T> {
    /// Grow from `root`, asking `children` for each node above `max_depth`
    ///
    /// Growth is breadth-first and stops adding nodes once `max_nodes` is
    /// reached. `max_nodes` must be at least 1 (room for the root).
    pub fn grow<F>(
        root: T,
        max_depth: usize,
        max_nodes: usize,
        children: F,
    ) -> Result<Self, SeqError>
    where
        F: Fn(&T) -> Vec<T>,
    {
        if max_nodes == 0 {
            return Err(SeqError::InvalidConfiguration(
                "arena needs room for at least the root node".to_string(),
            ));
        }

        let mut nodes = vec![Node {
            value: root,
            depth: 0,
            children: Vec::new(),
        }];
        let mut worklist = VecDeque::from([0usize]);
        let mut truncated = false;

        while let Some(parent) = worklist.pop_front() {
            let depth = nodes[parent].depth;
            if depth >= max_depth {
                continue;
            }
            for value in children(&nodes[parent].value) {
                if nodes.len() >= max_nodes {
                    truncated = true;
                    break;
                }
                let id = nodes.len();
                nodes.push(Node {
                    value,
                    depth: depth + 1,
                    children: Vec::new(),
                });
                nodes[parent].children.push(NodeId(id));
                worklist.push_back(id);
            }
            if truncated {
                break;
            }
        }

        debug!(nodes = nodes.len(), truncated, "rose arena grown");
        Ok(Self {
            nodes: Arc::new(nodes),
        })
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root always exists
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Value stored at `id`, or `None` for an id from another arena
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).map(|node| &node.value)
    }

    /// Depth of `id` (root is 0)
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(id.0).map(|node| node.depth)
    }

    /// Child ids of `id`, in extractor order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Node ids in traversal order
    ///
    /// Nodes are deduplicated by identity, so equal values at different
    /// positions are all visited.
    pub fn node_ids(&self, config: TraversalConfig) -> Seq<NodeId> {
        let arena = self.clone();
        Seq::once(self.root()).traverse(config, move |id: &NodeId| {
            let kids = arena.children(*id);
            (!kids.is_empty()).then(|| Seq::from_vec(kids.to_vec()))
        })
    }

    /// Node values in traversal order
    pub fn values(&self, config: TraversalConfig) -> Seq<T> {
        let arena = self.clone();
        self.node_ids(config)
            .filter_map(move |id| arena.value(id).cloned())
    }
}
