//! First occurrence per key

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use crate::seq::{Cursor, Item, Seq};

struct Distinct<T, K, F> {
    upstream: Cursor<T>,
    key: Arc<F>,
    seen: HashSet<K>,
}

impl<T, K, F> Iterator for Distinct<T, K, F>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let item = self.upstream.next()?;
            if self.seen.insert((self.key)(&item)) {
                return Some(item);
            }
        }
    }
}

impl<T: Item> Seq<T> {
    /// Items with duplicates removed; the first occurrence survives
    pub fn distinct(&self) -> Seq<T>
    where
        T: Eq + Hash,
    {
        self.distinct_by(T::clone)
    }

    /// Items whose `key` has not been seen before; the first per key survives
    ///
    /// The seen-set lives in the cursor and grows with the number of
    /// distinct keys.
    pub fn distinct_by<K, F>(&self, key: F) -> Seq<T>
    where
        K: Eq + Hash + Send + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        let key = Arc::new(key);
        Seq::lazy(move || {
            Box::new(Distinct {
                upstream: upstream.cursor(),
                key: Arc::clone(&key),
                seen: HashSet::new(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_keeps_first() {
        let seq = Seq::from_vec(vec!["b", "a", "b", "c", "a"]);
        assert_eq!(seq.distinct().to_vec(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_distinct_by_parity() {
        let seq = Seq::from_vec(vec![1, 3, 4, 5, 8]);
        assert_eq!(seq.distinct_by(|x| x % 2).to_vec(), vec![1, 4]);
    }

    #[test]
    fn test_distinct_on_infinite_with_bound() {
        let cycle = Seq::from_fn(|| (0u8..3).cycle());
        assert_eq!(cycle.distinct().first(3).to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_each_cursor_has_its_own_seen_set() {
        let seq = Seq::from_vec(vec![1, 1, 2]).distinct();
        assert_eq!(seq.to_vec(), vec![1, 2]);
        assert_eq!(seq.to_vec(), vec![1, 2]);
    }
}
