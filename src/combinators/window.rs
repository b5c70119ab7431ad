//! Windowing: keep a prefix or suffix delimited by the first match
//!
//! One small state machine covers all four operators. Once the stopping
//! condition fires the window is closed for good; later items are never
//! examined.

use std::sync::Arc;

use crate::seq::{Cursor, Item, Seq};

/// Which side of the first match is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Items up to, not including, the first match
    Before,
    /// The first match and everything after it
    NotBefore,
    /// Items up to and including the first match
    NotAfter,
    /// Items while the condition holds
    AsLongAs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Looking for the first match
    Scanning,
    /// Match seen, passing everything through (`NotBefore` only)
    Open,
    /// Window finished
    Closed,
}

struct Window<T, P> {
    upstream: Cursor<T>,
    condition: Arc<P>,
    mode: WindowMode,
    state: State,
}

impl<T, P> Iterator for Window<T, P>
where
    P: Fn(&T) -> bool,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.state {
            State::Closed => None,
            State::Open => self.upstream.next(),
            State::Scanning => loop {
                let Some(item) = self.upstream.next() else {
                    self.state = State::Closed;
                    return None;
                };
                let hit = (self.condition)(&item);
                match self.mode {
                    WindowMode::Before | WindowMode::AsLongAs => {
                        // AsLongAs is Before with the condition negated
                        let stop = hit == (self.mode == WindowMode::Before);
                        if stop {
                            self.state = State::Closed;
                            return None;
                        }
                        return Some(item);
                    }
                    WindowMode::NotAfter => {
                        if hit {
                            self.state = State::Closed;
                        }
                        return Some(item);
                    }
                    WindowMode::NotBefore => {
                        if hit {
                            self.state = State::Open;
                            return Some(item);
                        }
                    }
                }
            },
        }
    }
}

impl<T: Item> Seq<T> {
    /// Window of this sequence selected by `mode` and `condition`
    pub fn window<P>(&self, mode: WindowMode, condition: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        if self.is_known_empty() {
            return Seq::empty();
        }
        let upstream = self.clone();
        let condition = Arc::new(condition);
        Seq::lazy(move || {
            Box::new(Window {
                upstream: upstream.cursor(),
                condition: Arc::clone(&condition),
                mode,
                state: State::Scanning,
            })
        })
    }

    /// Items before the first one satisfying `condition`
    pub fn before<P>(&self, condition: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.window(WindowMode::Before, condition)
    }

    /// The first item satisfying `condition` and everything after it
    pub fn not_before<P>(&self, condition: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.window(WindowMode::NotBefore, condition)
    }

    /// Items through the first one satisfying `condition`
    pub fn not_after<P>(&self, condition: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.window(WindowMode::NotAfter, condition)
    }

    /// Items while `condition` holds
    pub fn as_long_as<P>(&self, condition: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.window(WindowMode::AsLongAs, condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> Seq<i32> {
        Seq::from_vec(vec![1, 2, 3, 4, 3, 2, 1])
    }

    #[test]
    fn test_before() {
        assert_eq!(sample().before(|x| *x == 3).to_vec(), vec![1, 2]);
        assert_eq!(sample().before(|x| *x == 9).to_vec(), sample().to_vec());
        assert!(sample().before(|x| *x == 1).is_empty());
    }

    #[test]
    fn test_not_before() {
        assert_eq!(sample().not_before(|x| *x == 3).to_vec(), vec![3, 4, 3, 2, 1]);
        assert!(sample().not_before(|x| *x == 9).is_empty());
    }

    #[test]
    fn test_not_after() {
        assert_eq!(sample().not_after(|x| *x == 3).to_vec(), vec![1, 2, 3]);
        assert_eq!(sample().not_after(|x| *x == 9).count(), 7);
    }

    #[test]
    fn test_as_long_as() {
        let ones = Seq::from_vec(vec![1, 1, 1, 2, 1, 1]);
        assert_eq!(ones.as_long_as(|x| *x == 1).to_vec(), vec![1, 1, 1]);
    }

    #[test]
    fn test_closed_window_stops_pulling() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulls);
        let naturals = Seq::from_fn(move || {
            let counter = Arc::clone(&counter);
            (0u32..).inspect(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        });

        let mut cursor = naturals.not_after(|x| *x == 2).cursor();
        assert_eq!(cursor.by_ref().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(cursor.next(), None);
        assert_eq!(pulls.load(Ordering::SeqCst), 3);
    }
}
