//! # Lazy, replayable sequences
//!
//! A [`Seq`] is an immutable handle that hands out fresh, independent cursors
//! on demand. Operators compose sequences without running them: nothing is
//! pulled until a consumer advances a cursor.
//!
//! ## Components
//!
//! 1. **Sequences** ([`seq`]): the handle, its constructors and queries
//! 2. **Combinators** ([`combinators`]): filter, map, windowing, distinct,
//!    interleave and the eager sorts
//! 3. **Memoization** ([`memo`]): replay buffer published by the first cursor
//!    that finishes a full traversal
//! 4. **Generators** ([`generate`]): extend a sequence from its last item(s)
//! 5. **Traversal** ([`traverse`]): breadth/depth-first walks with cycle protection
//! 6. **Hybrid queue** ([`queue`]): FIFO over a read-only seed plus a buffer
//!
//! ## Usage Example
//!
//! ```
//! use lazyseq::Seq;
//!
//! let fib = Seq::from_vec(vec![0u64, 1]).extend_with_pairs(|a, b| Some(a + b));
//! assert_eq!(fib.first(8).to_vec(), vec![0, 1, 1, 2, 3, 5, 8, 13]);
//!
//! let labels = Seq::once("1".to_string())
//!     .breadth_first(|s: &String| {
//!         (s.len() < 7).then(|| Seq::from_vec(vec![format!("{s}.1"), format!("{s}.2")]))
//!     })
//!     .first(3);
//! assert_eq!(labels.to_vec(), vec!["1", "1.1", "1.2"]);
//! ```
//!
//! Operations that drive a cursor to exhaustion (`count`, `last`, `to_vec`,
//! `materialize`, the sorts) never return on an infinite sequence. Bound the
//! input first, e.g. with [`Seq::first`].

#![warn(missing_docs, missing_debug_implementations)]

pub mod combinators; // Lazy and eager operators
pub mod generate; // Seeded generators
pub mod memo; // Cache on first full traversal
pub mod queue; // Seed + buffer FIFO
pub mod seq; // Sequence handle and queries
pub mod traverse; // Cycle-safe graph traversal

// Re-exports for convenience
pub use combinators::{AutoSortKey, NumericKey, SortOrder};
pub use queue::HybridQueue;
pub use seq::{ApplyFailure, ApplyReport, Cursor, Item, Seq};
pub use traverse::{NodeId, RoseArena, TraversalConfig, TraversalOrder};

use thiserror::Error;

/// Errors surfaced by eager evaluation over a sequence
#[derive(Error, Debug)]
pub enum SeqError {
    /// A user callback failed while a sequence was being applied
    #[error("callback failed at item {index}: {source}")]
    Callback {
        /// Zero-based position of the item the callback rejected
        index: usize,
        /// Error reported by the callback
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A configuration value was rejected at construction
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
