//! Filter, map, flatten, concatenation and slicing

use std::sync::Arc;

use crate::seq::{Item, Seq};

impl<T: Item> Seq<T> {
    /// Items for which `predicate` holds
    pub fn filter<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        let predicate = Arc::new(predicate);
        Seq::lazy(move || {
            let predicate = Arc::clone(&predicate);
            Box::new(upstream.cursor().filter(move |item| predicate(item)))
        })
    }

    /// `f` applied to each item
    pub fn map<U, F>(&self, f: F) -> Seq<U>
    where
        U: Item,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        let f = Arc::new(f);
        Seq::lazy(move || {
            let f = Arc::clone(&f);
            Box::new(upstream.cursor().map(move |item| f(item)))
        })
    }

    /// `f` applied to each item, dropping the `None` results
    pub fn filter_map<U, F>(&self, f: F) -> Seq<U>
    where
        U: Item,
        F: Fn(T) -> Option<U> + Send + Sync + 'static,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        let f = Arc::new(f);
        Seq::lazy(move || {
            let f = Arc::clone(&f);
            Box::new(upstream.cursor().filter_map(move |item| f(item)))
        })
    }

    /// Concatenation of the sequences `f` returns for each item
    ///
    /// An absent (`None`) result contributes nothing.
    pub fn flat_map<U, S, F>(&self, f: F) -> Seq<U>
    where
        U: Item,
        S: Into<Option<Seq<U>>>,
        F: Fn(T) -> S + Send + Sync + 'static,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        let f = Arc::new(f);
        Seq::lazy(move || {
            let f = Arc::clone(&f);
            Box::new(
                upstream
                    .cursor()
                    .flat_map(move |item| Seq::or_empty(f(item).into()).cursor()),
            )
        })
    }

    /// `self` followed by `other`
    pub fn concat(&self, other: &Seq<T>) -> Seq<T> {
        if other.is_known_empty() {
            return self.clone();
        }
        if self.is_known_empty() {
            return other.clone();
        }
        Seq::concat_all(vec![self.clone(), other.clone()])
    }

    /// Every sequence in `parts`, in order
    ///
    /// Each part's cursor is only started once the previous one is exhausted.
    pub fn concat_all(parts: Vec<Seq<T>>) -> Seq<T> {
        let parts: Vec<Seq<T>> = parts.into_iter().filter(|p| !p.is_known_empty()).collect();
        match parts.len() {
            0 => Seq::empty(),
            1 => parts.into_iter().next().unwrap_or_default(),
            _ => {
                let parts: Arc<[Seq<T>]> = parts.into();
                Seq::lazy(move || {
                    let parts = Arc::clone(&parts);
                    Box::new((0..parts.len()).flat_map(move |i| parts[i].cursor()))
                })
            }
        }
    }

    /// At most the first `n` items
    pub fn first(&self, n: usize) -> Seq<T> {
        if n == 0 || self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        Seq::lazy(move || Box::new(upstream.cursor().take(n)))
    }

    /// Everything after the first `n` items
    pub fn skip(&self, n: usize) -> Seq<T> {
        if n == 0 {
            return self.clone();
        }
        let upstream = self.clone();
        Seq::lazy(move || Box::new(upstream.cursor().skip(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn naturals() -> Seq<u64> {
        Seq::from_fn(|| 0u64..)
    }

    #[test]
    fn test_composition_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let seq = naturals().map(move |x| {
            counter.fetch_add(1, Ordering::SeqCst);
            x * 2
        });
        let evens = seq.filter(|x| x % 4 == 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(evens.first(3).to_vec(), vec![0, 4, 8]);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_filter_map() {
        let words = Seq::from_vec(vec!["1", "x", "3"]);
        let parsed = words.filter_map(|w| w.parse::<i32>().ok());
        assert_eq!(parsed.to_vec(), vec![1, 3]);
    }

    #[test]
    fn test_flat_map_absent_is_empty() {
        let seq = Seq::from_vec(vec![0usize, 1, 2, 3]);
        let expanded = seq.flat_map(|n| (n % 2 == 1).then(|| Seq::from_vec(vec![n; n])));
        assert_eq!(expanded.to_vec(), vec![1, 3, 3, 3]);

        let always = seq.flat_map(|n| Seq::once(n * 10));
        assert_eq!(always.to_vec(), vec![0, 10, 20, 30]);
    }

    #[test]
    fn test_concat_is_lazy_per_part() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&started);
        let tail = Seq::from_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![3, 4]
        });
        let joined = Seq::from_vec(vec![1, 2]).concat(&tail);

        assert_eq!(joined.first(2).to_vec(), vec![1, 2]);
        assert_eq!(started.load(Ordering::SeqCst), 0);
        assert_eq!(joined.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concat_all_skips_empty_parts() {
        let joined = Seq::concat_all(vec![
            Seq::empty(),
            Seq::from_vec(vec!['a']),
            Seq::from_vec(vec![]),
            Seq::from_vec(vec!['b', 'c']),
        ]);
        assert_eq!(joined.to_vec(), vec!['a', 'b', 'c']);
        assert!(Seq::<char>::concat_all(Vec::new()).is_empty());
    }

    #[test]
    fn test_first_and_skip_on_infinite() {
        let window = naturals().skip(10).first(3);
        assert_eq!(window.to_vec(), vec![10, 11, 12]);
        assert!(naturals().first(0).is_empty());
    }

    #[test]
    fn test_inputs_are_untouched() {
        let base = Seq::from_vec(vec![1, 2, 3]);
        let doubled = base.map(|x| x * 2);
        assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
        assert_eq!(base.to_vec(), vec![1, 2, 3]);
    }
}
