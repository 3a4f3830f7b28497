//! Per-item outcomes for bulk calls
//!
//! Bulk operations issue one request per input and keep going after a
//! failure; every input ends up in exactly one of the two lists.

use crate::error::{Error, Result};
use serde::Serialize;
use std::future::Future;
use tracing::warn;

/// Items that succeeded and inputs that failed, each with its error
#[derive(Debug)]
pub struct BulkOutcome<T, F> {
    pub succeeded: Vec<T>,
    pub failed: Vec<(F, Error)>,
}

impl<T, F> Default for BulkOutcome<T, F> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T, F: Clone> BulkOutcome<T, F> {
    /// Run `op` on every input in order, sorting results by outcome
    pub async fn collect<I, Op, Fut>(inputs: I, op: Op) -> Self
    where
        I: IntoIterator<Item = F>,
        Op: Fn(F) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut outcome = Self::default();
        for input in inputs {
            match op(input.clone()).await {
                Ok(item) => outcome.succeeded.push(item),
                Err(e) => {
                    warn!("Bulk item failed: {}", e);
                    outcome.failed.push((input, e));
                }
            }
        }
        outcome
    }
}

impl<T, F> BulkOutcome<T, F> {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Counts for reporting
    pub fn summary(&self) -> BulkSummary {
        BulkSummary {
            succeeded: self.succeeded.len(),
            failed: self.failed.len(),
        }
    }
}

/// Success and failure counts of a bulk call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub succeeded: usize,
    pub failed: usize,
}
