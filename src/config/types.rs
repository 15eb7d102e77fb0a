//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use strum_macros::EnumIter as EnumIterMacro;

use crate::config::constants::{
    DEFAULT_FALLBACK_TIMEOUT_SECS, DEFAULT_MAX_FALLBACK_CANDIDATES, DEFAULT_OUTPUT_FILE,
    DEFAULT_TIMEOUT_SECS, MAX_ATTEMPTS_PER_DOMAIN, MAX_TIMEOUT_SECS, MEDIUM_INPUT_THRESHOLD,
    SMALL_INPUT_THRESHOLD, WORKERS_LARGE, WORKERS_MEDIUM, WORKERS_SMALL,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Name-resolution provider.
///
/// The set is closed: every backend the tool can talk to is a variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, EnumIterMacro)]
pub enum BackendKind {
    /// Operating system resolver (getaddrinfo)
    System,
    /// Google Public DNS (8.8.8.8, 8.8.4.4)
    Google,
    /// Cloudflare DNS (1.1.1.1, 1.0.0.1)
    Cloudflare,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::System => "system",
            BackendKind::Google => "google",
            BackendKind::Cloudflare => "cloudflare",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hosts generation configuration.
///
/// Parsed from the command line by `clap`, and constructible programmatically
/// through `Default` for library use.
///
/// # Examples
///
/// ```no_run
/// use domain_hosts::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: Some(PathBuf::from("domains.txt")),
///     worker_count: Some(20),
///     ..Default::default()
/// };
/// ```
///
/// ```bash
/// # Resolve general.txt (or the only .txt file) into ./hosts
/// domain_hosts
///
/// # Custom input, only public resolvers, no fallback
/// domain_hosts blocked.txt --backends google,cloudflare --enable-fallback false
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_hosts",
    about = "Resolves a list of domains and writes a hosts file."
)]
pub struct Config {
    /// File with one domain per line (defaults to general.txt or the only .txt file)
    #[arg(value_parser)]
    pub file: Option<PathBuf>,

    /// Output hosts file
    #[arg(long, short, value_parser, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Concurrent resolution workers (auto-sized from the input when omitted)
    #[arg(long)]
    pub worker_count: Option<usize>,

    /// Per-backend-call timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: f64,

    /// Backends to try, in priority order
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [BackendKind::System, BackendKind::Google, BackendKind::Cloudflare]
    )]
    pub backends: Vec<BackendKind>,

    /// Try similar domains and alternate TLDs when a domain fails everywhere
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub enable_fallback: bool,

    /// Maximum fallback candidates per failed domain
    #[arg(long, default_value_t = DEFAULT_MAX_FALLBACK_CANDIDATES)]
    pub max_fallback_candidates: usize,

    /// Per-backend-call timeout for fallback candidates, in seconds
    #[arg(long, default_value_t = DEFAULT_FALLBACK_TIMEOUT_SECS)]
    pub fallback_timeout_seconds: f64,

    /// Ceiling on resolve attempts per domain (derived from backends and candidates when omitted)
    #[arg(long)]
    pub max_attempts_per_domain: Option<usize>,

    /// Extra domains used as the similar-domain reference list
    #[arg(long, value_parser)]
    pub reference_file: Option<PathBuf>,

    /// Copy the system hosts file to hosts.backup before writing
    #[arg(long)]
    pub backup_system_hosts: bool,

    /// Append the generated entries to the system hosts file (needs write access)
    #[arg(long)]
    pub append_to_system: bool,

    /// System hosts file to back up and append to (platform default when omitted)
    #[arg(long, value_parser)]
    pub system_hosts: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            worker_count: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            backends: vec![
                BackendKind::System,
                BackendKind::Google,
                BackendKind::Cloudflare,
            ],
            enable_fallback: true,
            max_fallback_candidates: DEFAULT_MAX_FALLBACK_CANDIDATES,
            fallback_timeout_seconds: DEFAULT_FALLBACK_TIMEOUT_SECS,
            max_attempts_per_domain: None,
            reference_file: None,
            backup_system_hosts: false,
            append_to_system: false,
            system_hosts: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks option values that clap cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a zero worker count, a timeout outside
    /// `(0, MAX_TIMEOUT_SECS]`, an empty backend list, or a zero attempt ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        for (name, value) in [
            ("timeout_seconds", self.timeout_seconds),
            ("fallback_timeout_seconds", self.fallback_timeout_seconds),
        ] {
            if !(value > 0.0 && value <= MAX_TIMEOUT_SECS) {
                return Err(ConfigError::InvalidTimeout { name, value });
            }
        }
        if self.backends.is_empty() {
            return Err(ConfigError::NoBackends);
        }
        if self.max_attempts_per_domain == Some(0) {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }

    /// Worker count for a run over `domain_count` domains.
    ///
    /// An explicit `worker_count` wins; otherwise the pool grows with the input.
    pub fn effective_worker_count(&self, domain_count: usize) -> usize {
        if let Some(count) = self.worker_count {
            return count.max(1);
        }
        if domain_count < SMALL_INPUT_THRESHOLD {
            WORKERS_SMALL
        } else if domain_count < MEDIUM_INPUT_THRESHOLD {
            WORKERS_MEDIUM
        } else {
            WORKERS_LARGE
        }
    }

    /// Attempt ceiling per domain when `backend_count` backends are in use.
    ///
    /// Defaults to one attempt per backend for the domain itself and for each
    /// fallback candidate, capped at `MAX_ATTEMPTS_PER_DOMAIN`.
    pub fn effective_max_attempts(&self, backend_count: usize) -> usize {
        if let Some(max) = self.max_attempts_per_domain {
            return max.min(MAX_ATTEMPTS_PER_DOMAIN);
        }
        let candidates = if self.enable_fallback {
            self.max_fallback_candidates
        } else {
            0
        };
        backend_count
            .saturating_mul(1 + candidates)
            .clamp(1, MAX_ATTEMPTS_PER_DOMAIN)
    }

    /// Per-call timeout for the input domain.
    ///
    /// Falls back to the default when the configured value is not a valid
    /// duration; `validate()` reports that case.
    pub fn timeout(&self) -> Duration {
        seconds_or(self.timeout_seconds, DEFAULT_TIMEOUT_SECS)
    }

    pub fn fallback_timeout(&self) -> Duration {
        seconds_or(self.fallback_timeout_seconds, DEFAULT_FALLBACK_TIMEOUT_SECS)
    }
}

fn seconds_or(value: f64, default: f64) -> Duration {
    if value > 0.0 && value <= MAX_TIMEOUT_SECS {
        Duration::try_from_secs_f64(value).unwrap_or(Duration::from_secs_f64(default))
    } else {
        Duration::from_secs_f64(default)
    }
}
