//! Shared progress counters for a resolution run.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::ResolutionResult;

/// Progress of a run, updated by workers and polled by reporters.
///
/// All fields are atomics; readers may observe a snapshot taken while
/// workers are still updating, but `completed == succeeded + failed` holds
/// for every finished domain.
#[derive(Debug, Default)]
pub struct ResolutionProgress {
    total: AtomicUsize,
    completed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

/// A point-in-time copy of `ResolutionProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub completed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ProgressSnapshot {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}

impl ResolutionProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
    }

    /// Counts one finished domain.
    pub fn record(&self, result: &ResolutionResult) {
        if result.succeeded() {
            self.succeeded.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            succeeded: self.succeeded.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }
}
