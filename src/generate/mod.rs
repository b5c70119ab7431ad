//! Seeded generation
//!
//! A generator yields its seed items, then keeps deriving the next item from
//! what it produced last until the rule returns `None`. The rule sees:
//!
//! - the last item (`extend_with`), or `None` when the seed was empty, so a
//!   generator can bootstrap from nothing
//! - the last item plus the position of the item being produced
//!   (`extend_with_index`)
//! - the last two items (`extend_with_pairs`), for recurrences like Fibonacci
//! - the last item, after a continuation check (`extend_while`)
//!
//! `None` only ever means "stop". A sequence of `Option<U>` can still yield
//! `Some(None)` as an ordinary item.

use std::sync::Arc;

use crate::seq::{Cursor, Item, Seq};

type LastFn<T> = dyn Fn(Option<&T>) -> Option<T> + Send + Sync;
type IndexedFn<T> = dyn Fn(Option<&T>, usize) -> Option<T> + Send + Sync;
type PairFn<T> = dyn Fn(&T, &T) -> Option<T> + Send + Sync;
type CheckFn<T> = dyn Fn(&T) -> bool + Send + Sync;
type StepFn<T> = dyn Fn(&T) -> Option<T> + Send + Sync;

/// How the next item is derived
enum Rule<T> {
    Last(Arc<LastFn<T>>),
    Indexed(Arc<IndexedFn<T>>),
    Pairs(Arc<PairFn<T>>),
    While {
        condition: Arc<CheckFn<T>>,
        step: Arc<StepFn<T>>,
    },
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        match self {
            Rule::Last(f) => Rule::Last(Arc::clone(f)),
            Rule::Indexed(f) => Rule::Indexed(Arc::clone(f)),
            Rule::Pairs(f) => Rule::Pairs(Arc::clone(f)),
            Rule::While { condition, step } => Rule::While {
                condition: Arc::clone(condition),
                step: Arc::clone(step),
            },
        }
    }
}

/// Generation cursor
///
/// Drains the seed first, remembering the last two items, then applies the
/// rule. Once the rule returns `None` the cursor is finished.
struct Generate<T> {
    seed: Option<Cursor<T>>,
    rule: Rule<T>,
    previous: Option<T>,
    last: Option<T>,
    produced: usize,
    done: bool,
}

impl<T: Clone> Generate<T> {
    fn record(&mut self, item: T) -> T {
        self.previous = self.last.replace(item.clone());
        self.produced += 1;
        item
    }

    fn derive(&self) -> Option<T> {
        match &self.rule {
            Rule::Last(f) => f(self.last.as_ref()),
            Rule::Indexed(f) => f(self.last.as_ref(), self.produced),
            Rule::Pairs(f) => match (&self.previous, &self.last) {
                (Some(a), Some(b)) => f(a, b),
                _ => None,
            },
            Rule::While { condition, step } => {
                let last = self.last.as_ref()?;
                if condition(last) {
                    step(last)
                } else {
                    None
                }
            }
        }
    }
}

impl<T: Clone> Iterator for Generate<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(seed) = self.seed.as_mut() {
            if let Some(item) = seed.next() {
                return Some(self.record(item));
            }
            self.seed = None;
        }
        if self.done {
            return None;
        }
        match self.derive() {
            Some(item) => Some(self.record(item)),
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<T: Item> Seq<T> {
    fn extend_by_rule(&self, rule: Rule<T>) -> Seq<T> {
        let seed = self.clone();
        Seq::lazy(move || {
            Box::new(Generate {
                seed: Some(seed.cursor()),
                rule: rule.clone(),
                previous: None,
                last: None,
                produced: 0,
                done: false,
            })
        })
    }

    /// This sequence, then `next(last)` repeatedly until it returns `None`
    ///
    /// On an empty sequence the first call receives `None`.
    pub fn extend_with<F>(&self, next: F) -> Seq<T>
    where
        F: Fn(Option<&T>) -> Option<T> + Send + Sync + 'static,
    {
        self.extend_by_rule(Rule::Last(Arc::new(next)))
    }

    /// Like [`Seq::extend_with`], also passing the zero-based position of the
    /// item being generated
    pub fn extend_with_index<F>(&self, next: F) -> Seq<T>
    where
        F: Fn(Option<&T>, usize) -> Option<T> + Send + Sync + 'static,
    {
        self.extend_by_rule(Rule::Indexed(Arc::new(next)))
    }

    /// This sequence, then `next(second_to_last, last)` repeatedly
    ///
    /// Generates nothing unless at least two items are available.
    pub fn extend_with_pairs<F>(&self, next: F) -> Seq<T>
    where
        F: Fn(&T, &T) -> Option<T> + Send + Sync + 'static,
    {
        self.extend_by_rule(Rule::Pairs(Arc::new(next)))
    }

    /// This sequence, then `step(last)` for as long as `condition(last)` holds
    ///
    /// Generates nothing from an empty sequence.
    pub fn extend_while<C, F>(&self, condition: C, step: F) -> Seq<T>
    where
        C: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) -> Option<T> + Send + Sync + 'static,
    {
        self.extend_by_rule(Rule::While {
            condition: Arc::new(condition),
            step: Arc::new(step),
        })
    }

    /// `seed` (if present), then `next(last)` until it returns `None`
    pub fn generate<F>(seed: Option<T>, next: F) -> Seq<T>
    where
        F: Fn(Option<&T>) -> Option<T> + Send + Sync + 'static,
    {
        Seq::or_empty(seed.map(Seq::once)).extend_with(next)
    }

    /// `seed`, `step(seed)`, `step(step(seed))`, ... until `step` returns `None`
    pub fn iterate<F>(seed: T, step: F) -> Seq<T>
    where
        F: Fn(&T) -> Option<T> + Send + Sync + 'static,
    {
        Seq::once(seed).extend_with(move |last| last.and_then(&step))
    }
}
