//! Error type definitions.
//!
//! This module defines the fatal error types of a run and the per-domain
//! failure and info categories counted in the statistics.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error building a DNS resolver backend.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Invalid option values.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("worker_count must be at least 1")]
    ZeroWorkers,

    #[error(
        "{name} must be a positive number of seconds up to {max}, got {value}",
        max = crate::config::MAX_TIMEOUT_SECS
    )]
    InvalidTimeout { name: &'static str, value: f64 },

    #[error("at least one backend must be configured")]
    NoBackends,

    #[error("max_attempts_per_domain must be at least 1")]
    ZeroAttempts,
}

/// Fatal errors of a generation run.
///
/// Per-domain resolution failures never show up here; they are recorded as
/// failed results and counted in `ProcessingStats`.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The domain source is missing, unreadable, or empty.
    #[error("Input error: {0}")]
    Input(String),

    /// Option values are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resolver backends could not be created.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// The hosts file (or the system hosts file) could not be written.
    #[error("Failed to write {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every domain failed; no output file was written.
    #[error("None of the {total} domains resolved; nothing was written")]
    NothingResolved { total: usize },
}

impl GenerateError {
    /// Process exit code for this error.
    ///
    /// - `1`: input, configuration, or initialization failure
    /// - `2`: output write failure
    /// - `3`: zero domains resolved
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::Input(_)
            | GenerateError::Config(_)
            | GenerateError::Initialization(_) => 1,
            GenerateError::OutputWrite { .. } => 2,
            GenerateError::NothingResolved { .. } => 3,
        }
    }
}

/// Why a single resolve attempt (or a whole domain) failed.
///
/// Backend-specific errors are normalized to these kinds so the orchestrator
/// never sees resolver-specific error shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// The backend call exceeded its timeout
    Timeout,
    /// NXDOMAIN or an empty answer
    NoRecords,
    /// Connection, protocol, or I/O failure
    Network,
    /// The name was rejected before any lookup
    InvalidName,
    /// The run was cancelled before the domain finished
    Cancelled,
    /// The per-domain attempt ceiling was reached
    AttemptLimit,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "Backend timeout",
            FailureKind::NoRecords => "No records found",
            FailureKind::Network => "Network error",
            FailureKind::InvalidName => "Invalid domain name",
            FailureKind::Cancelled => "Cancelled",
            FailureKind::AttemptLimit => "Attempt limit reached",
        }
    }
}

/// Informational events counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    DuplicateDomainSkipped,
    InvalidDomainSkipped,
    ResolvedViaSimilarDomain,
    ResolvedViaTldVariant,
    ResolvedViaParentDomain,
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::DuplicateDomainSkipped => "Duplicate domain skipped",
            InfoType::InvalidDomainSkipped => "Invalid domain skipped",
            InfoType::ResolvedViaSimilarDomain => "Resolved via similar domain",
            InfoType::ResolvedViaTldVariant => "Resolved via TLD variant",
            InfoType::ResolvedViaParentDomain => "Resolved via parent domain",
        }
    }
}
