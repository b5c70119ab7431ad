//! Eager application of a fallible callback to every item
//!
//! Two explicit policies: [`Seq::try_apply`] stops at the first failure,
//! [`Seq::apply_collect`] keeps going and reports every failure.

use std::error::Error;

use tracing::warn;

use super::{Item, Seq};
use crate::SeqError;

/// One rejected item
#[derive(Debug)]
pub struct ApplyFailure<E> {
    /// Zero-based position of the item
    pub index: usize,
    /// Error returned by the callback
    pub error: E,
}

/// Outcome of [`Seq::apply_collect`]
#[derive(Debug)]
pub struct ApplyReport<E> {
    /// Items the callback accepted
    pub applied: usize,
    /// Items the callback rejected, in sequence order
    pub failures: Vec<ApplyFailure<E>>,
}

impl<E> ApplyReport<E> {
    /// True when every item was accepted
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Accepted plus rejected
    pub fn total(&self) -> usize {
        self.applied + self.failures.len()
    }
}

impl<T: Item> Seq<T> {
    /// Run `f` on each item, stopping at the first error
    ///
    /// Returns the number of items processed. Never returns on an infinite
    /// sequence unless `f` fails.
    pub fn try_apply<E, F>(&self, mut f: F) -> Result<usize, SeqError>
    where
        E: Error + Send + Sync + 'static,
        F: FnMut(T) -> Result<(), E>,
    {
        let mut applied = 0;
        for (index, item) in self.cursor().enumerate() {
            f(item).map_err(|source| SeqError::Callback {
                index,
                source: Box::new(source),
            })?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Run `f` on every item and report all failures
    ///
    /// Each failure is also logged at `warn`. Never returns on an infinite
    /// sequence.
    pub fn apply_collect<E, F>(&self, mut f: F) -> ApplyReport<E>
    where
        E: std::fmt::Display,
        F: FnMut(T) -> Result<(), E>,
    {
        let mut report = ApplyReport {
            applied: 0,
            failures: Vec::new(),
        };
        for (index, item) in self.cursor().enumerate() {
            match f(item) {
                Ok(()) => report.applied += 1,
                Err(error) => {
                    warn!(index, %error, "callback rejected item");
                    report.failures.push(ApplyFailure { index, error });
                }
            }
        }
        report
    }
}
