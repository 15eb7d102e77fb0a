//! Progress logging utilities.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use tokio_util::sync::CancellationToken;

use crate::resolve::ResolutionProgress;

/// Logs how far the current run has progressed.
///
/// # Arguments
///
/// * `start_time` - When resolution started
/// * `progress` - Shared counters updated by the workers
pub fn log_progress(start_time: Instant, progress: &ResolutionProgress) {
    let snapshot = progress.snapshot();
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        snapshot.completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Resolved {}/{} domains ({} ok, {} failed) in {:.2} seconds (~{:.2} domains/sec)",
        snapshot.completed, snapshot.total, snapshot.succeeded, snapshot.failed, elapsed_secs, rate
    );
}

/// Spawns a task that calls `log_progress` every `interval` until `cancel` fires.
pub fn spawn_progress_logger(
    start_time: Instant,
    progress: Arc<ResolutionProgress>,
    interval: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => log_progress(start_time, &progress),
            }
        }
    })
}
