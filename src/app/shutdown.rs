//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Stops the background tasks of a run.
///
/// Cancels `logging_cancel` and waits for the progress logger to finish so
/// its last line is not interleaved with the final summary.
pub async fn shutdown_gracefully(
    logging_cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    logging_cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}
