//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, InfoType, ProcessingStats};

/// Prints per-kind failure counts and info counts to the log.
///
/// Kinds with a zero count are omitted.
pub fn print_failure_statistics(stats: &ProcessingStats) {
    let total_failures = stats.total_failures();
    let total_info = stats.total_info();

    if total_failures > 0 {
        info!("Failure Counts ({} total):", total_failures);
        for kind in FailureKind::iter() {
            let count = stats.get_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

/// Prints the failure breakdown followed by a one-line summary of the run.
pub fn print_final_statistics(
    stats: &ProcessingStats,
    total: usize,
    resolved: usize,
    failed: usize,
    elapsed_seconds: f64,
) {
    print_failure_statistics(stats);
    info!(
        "✅ Processed {} domain{} ({} resolved, {} failed) in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        resolved,
        failed,
        elapsed_seconds
    );
}
