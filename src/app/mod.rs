//! Progress reporting, shutdown handling, and statistics printing used by the
//! run driver.

pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, spawn_progress_logger};
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_failure_statistics, print_final_statistics};
