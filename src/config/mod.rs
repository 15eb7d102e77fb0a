//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, fallback priorities)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{BackendKind, Config, LogFormat, LogLevel};
