//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lazyseq::Seq;

/// Observes how often a sequence is started and how many items it yields
#[derive(Debug, Clone, Default)]
pub struct Probe {
    starts: Arc<AtomicUsize>,
    pulls: Arc<AtomicUsize>,
}

impl Probe {
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn pulls(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }
}

/// Lazy sequence over `items` that reports to the returned probe
pub fn probed<T>(items: Vec<T>) -> (Seq<T>, Probe)
where
    T: Clone + Send + Sync + 'static,
{
    let probe = Probe::default();
    let starts = Arc::clone(&probe.starts);
    let pulls = Arc::clone(&probe.pulls);
    let seq = Seq::from_fn(move || {
        starts.fetch_add(1, Ordering::SeqCst);
        let pulls = Arc::clone(&pulls);
        items.clone().into_iter().inspect(move |_| {
            pulls.fetch_add(1, Ordering::SeqCst);
        })
    });
    (seq, probe)
}

/// Children of a dotted label, down to `levels` labels deep
pub fn dotted_children(label: &str, levels: usize) -> Option<Seq<String>> {
    (label.split('.').count() < levels)
        .then(|| Seq::from_vec(vec![format!("{label}.1"), format!("{label}.2")]))
}
