//! Error handling and processing statistics.
//!
//! This module provides:
//! - Fatal run errors (`GenerateError`) and their exit codes
//! - Initialization and configuration errors
//! - Per-domain failure kinds, normalized across backends
//! - Processing statistics tracking (failures and info metrics)

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ConfigError, FailureKind, GenerateError, InfoType, InitializationError};
