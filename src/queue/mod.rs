//! Hybrid FIFO queue
//!
//! Starts as a view over a read-only seed sequence plus an appendable
//! buffer. The logical content is always "unread seed items, in order"
//! followed by "buffered items, in order". Removals read the seed through
//! one live cursor and count how far they got; nothing is copied out of the
//! seed.
//!
//! The first time the seed cursor comes up empty the queue drops the seed
//! for good and from then on is just its buffer.

use std::collections::VecDeque;
use std::fmt;
use std::iter::Peekable;

use tracing::debug;

use crate::seq::{Cursor, Item, Seq};

enum Backing<T: Item> {
    /// Seed not yet drained; `consumed` items were removed through `cursor`
    Seeded {
        seed: Seq<T>,
        cursor: Peekable<Cursor<T>>,
        consumed: usize,
    },
    /// Seed drained and released
    Buffered,
}

/// FIFO over a seed sequence plus an appendable buffer
pub struct HybridQueue<T: Item> {
    backing: Backing<T>,
    buffer: VecDeque<T>,
}

impl<T: Item> HybridQueue<T> {
    /// Queue whose initial content is `seed`
    ///
    /// Nothing is pulled from the seed until the queue is read.
    pub fn new(seed: Seq<T>) -> Self {
        let backing = if seed.is_known_empty() {
            Backing::Buffered
        } else {
            Backing::Seeded {
                cursor: seed.cursor().peekable(),
                seed,
                consumed: 0,
            }
        };
        Self {
            backing,
            buffer: VecDeque::new(),
        }
    }

    /// Remove and return the head
    pub fn remove_first(&mut self) -> Option<T> {
        if let Backing::Seeded {
            cursor, consumed, ..
        } = &mut self.backing
        {
            if let Some(item) = cursor.next() {
                *consumed += 1;
                let drained = cursor.peek().is_none();
                if drained {
                    self.release_seed();
                }
                return Some(item);
            }
            self.release_seed();
        }
        self.buffer.pop_front()
    }

    /// Head without removing it
    pub fn peek_first(&mut self) -> Option<&T> {
        self.settle();
        match &mut self.backing {
            Backing::Seeded { cursor, .. } => cursor.peek(),
            Backing::Buffered => self.buffer.front(),
        }
    }

    /// Add one item at the tail
    pub fn push_back(&mut self, item: T) {
        self.buffer.push_back(item);
    }

    /// Add items at the tail, in order
    pub fn append<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.buffer.extend(items);
    }

    /// Builder form of [`HybridQueue::push_back`]
    pub fn with_last(mut self, item: T) -> Self {
        self.push_back(item);
        self
    }

    /// True when neither unread seed items nor buffered items remain
    ///
    /// Takes `&mut self` because answering may pull one item from the seed
    /// cursor (kept for the next removal) and may release a drained seed.
    /// There is no `&self` form: a lazy seed cannot be inspected without
    /// advancing it.
    pub fn is_empty(&mut self) -> bool {
        self.settle();
        matches!(self.backing, Backing::Buffered) && self.buffer.is_empty()
    }

    /// Number of remaining items
    ///
    /// Counts the seed with a fresh cursor, so this is linear in the seed
    /// and never returns for an infinite seed.
    pub fn count_remaining(&self) -> usize {
        match &self.backing {
            Backing::Seeded { seed, consumed, .. } => {
                seed.count().saturating_sub(*consumed) + self.buffer.len()
            }
            Backing::Buffered => self.buffer.len(),
        }
    }

    /// True once the seed has been drained and released
    pub fn is_seed_drained(&self) -> bool {
        matches!(self.backing, Backing::Buffered)
    }

    /// Current content as an immutable sequence
    ///
    /// While the seed is live this is "seed after the removed prefix" followed
    /// by a snapshot of the buffer; afterwards just the buffer snapshot.
    /// Later mutations of the queue do not affect the returned sequence.
    pub fn as_seq(&self) -> Seq<T> {
        let buffered = Seq::from_vec(self.buffer.iter().cloned().collect());
        match &self.backing {
            Backing::Seeded { seed, consumed, .. } => seed.skip(*consumed).concat(&buffered),
            Backing::Buffered => buffered,
        }
    }

    /// Release the seed if its cursor has nothing left
    fn settle(&mut self) {
        let drained = match &mut self.backing {
            Backing::Seeded { cursor, .. } => cursor.peek().is_none(),
            Backing::Buffered => false,
        };
        if drained {
            self.release_seed();
        }
    }

    fn release_seed(&mut self) {
        if let Backing::Seeded { consumed, .. } =
            std::mem::replace(&mut self.backing, Backing::Buffered)
        {
            debug!(
                consumed,
                buffered = self.buffer.len(),
                "seed drained; queue is buffer-only"
            );
        }
    }
}

impl<T: Item> Iterator for HybridQueue<T> {
    type Item = T;

    /// Draining iteration
    fn next(&mut self) -> Option<T> {
        self.remove_first()
    }
}

impl<T: Item> From<Seq<T>> for HybridQueue<T> {
    fn from(seed: Seq<T>) -> Self {
        Self::new(seed)
    }
}

impl<T: Item> Default for HybridQueue<T> {
    fn default() -> Self {
        Self::new(Seq::empty())
    }
}

impl<T: Item> fmt::Debug for HybridQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("HybridQueue");
        if let Backing::Seeded { seed, consumed, .. } = &self.backing {
            out.field("seed", seed).field("consumed", consumed);
        }
        out.field("buffered", &self.buffer.len()).finish()
    }
}

impl<T: Item> Seq<T> {
    /// Queue seeded with this sequence
    pub fn to_queue(&self) -> HybridQueue<T> {
        HybridQueue::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_then_buffer() {
        let queue = HybridQueue::new(Seq::once("a".to_string()))
            .with_last("b".to_string())
            .with_last("c".to_string());
        let drained: String = queue.collect();
        assert_eq!(drained, "abc");
    }

    #[test]
    fn test_transition_is_one_way() {
        let mut queue = Seq::from_vec(vec![1, 2]).to_queue();
        queue.push_back(3);
        assert!(!queue.is_seed_drained());

        assert_eq!(queue.remove_first(), Some(1));
        assert!(!queue.is_seed_drained());
        assert_eq!(queue.remove_first(), Some(2));
        assert!(queue.is_seed_drained());

        queue.push_back(4);
        assert_eq!(queue.remove_first(), Some(3));
        assert_eq!(queue.remove_first(), Some(4));
        assert_eq!(queue.remove_first(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_as_seq_after_each_removal() {
        let mut queue = Seq::from_vec(vec!['a', 'b', 'c']).to_queue();
        queue.append(vec!['d', 'e']);

        let mut expected = vec!['a', 'b', 'c', 'd', 'e'];
        while !expected.is_empty() {
            assert_eq!(queue.as_seq().to_vec(), expected);
            assert_eq!(queue.count_remaining(), expected.len());
            assert_eq!(queue.remove_first(), Some(expected.remove(0)));
        }
        assert!(queue.as_seq().is_empty());
        assert_eq!(queue.count_remaining(), 0);
    }

    #[test]
    fn test_snapshot_is_immutable() {
        let mut queue = HybridQueue::new(Seq::from_vec(vec![1]));
        let before = queue.as_seq();
        queue.push_back(2);
        queue.remove_first();
        assert_eq!(before.to_vec(), vec![1]);
        assert_eq!(queue.as_seq().to_vec(), vec![2]);
    }

    #[test]
    fn test_peek_and_empty_seed() {
        let mut queue: HybridQueue<u8> = HybridQueue::default();
        assert!(queue.is_seed_drained());
        assert!(queue.is_empty());
        assert_eq!(queue.peek_first(), None);

        queue.push_back(9);
        assert_eq!(queue.peek_first(), Some(&9));
        assert!(!queue.is_empty());

        let mut lazy = HybridQueue::new(Seq::from_fn(|| vec![5u8]));
        assert_eq!(lazy.peek_first(), Some(&5));
        assert_eq!(lazy.remove_first(), Some(5));
        assert!(lazy.is_seed_drained());
    }

    #[test]
    fn test_is_empty_keeps_peeked_item() {
        let mut queue = Seq::from_fn(|| vec!['q']).to_queue();
        assert!(!queue.is_empty());
        assert!(!queue.is_seed_drained());
        assert_eq!(queue.count_remaining(), 1);
        assert_eq!(queue.remove_first(), Some('q'));
        assert!(queue.is_empty());
        assert!(queue.is_seed_drained());
    }

    #[test]
    fn test_infinite_seed_interleaved_with_appends() {
        let mut queue = Seq::from_fn(|| 0u32..).to_queue();
        queue.push_back(1000);
        let head: Vec<u32> = (0..3).filter_map(|_| queue.remove_first()).collect();
        assert_eq!(head, vec![0, 1, 2]);
        assert_eq!(queue.as_seq().first(2).to_vec(), vec![3, 4]);
        assert!(!queue.is_seed_drained());
    }
}
