//! Configuration constants.
//!
//! This module defines the defaults and hard limits used by the resolution
//! engine, the fallback strategy, and the output writer.

use std::time::Duration;

// Worker pool sizing
/// Worker count used when the input has fewer than `SMALL_INPUT_THRESHOLD` domains
pub const WORKERS_SMALL: usize = 10;
/// Worker count used when the input has fewer than `MEDIUM_INPUT_THRESHOLD` domains
pub const WORKERS_MEDIUM: usize = 30;
/// Upper bound for automatically selected workers.
/// Going above this tends to trip rate limits on public resolvers.
pub const WORKERS_LARGE: usize = 50;
pub const SMALL_INPUT_THRESHOLD: usize = 100;
pub const MEDIUM_INPUT_THRESHOLD: usize = 1000;

// Timeouts
/// Per-backend-call timeout for the input domain, in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 3.0;
/// Per-backend-call timeout for fallback candidates, in seconds
/// Candidates are speculative, so they fail fast
pub const DEFAULT_FALLBACK_TIMEOUT_SECS: f64 = 1.0;
/// Largest accepted per-call timeout, in seconds
pub const MAX_TIMEOUT_SECS: f64 = 3600.0;

// Fallback strategy
/// Default cap on fallback candidates per failed domain
pub const DEFAULT_MAX_FALLBACK_CANDIDATES: usize = 10;
/// Maximum number of similar-domain candidates taken from the reference list
pub const MAX_SIMILAR_CANDIDATES: usize = 3;
/// Maximum length difference for prefix/suffix similarity
pub const SIMILAR_PREFIX_MAX_LEN_DIFF: usize = 3;
/// Maximum length difference for containment similarity
pub const SIMILAR_CONTAINS_MAX_LEN_DIFF: usize = 5;
/// Maximum edit distance between base names for edit-distance similarity
pub const SIMILAR_MAX_EDIT_DISTANCE: usize = 2;
/// Reference entries scanned per failed domain
pub const MAX_REFERENCE_SCAN: usize = 10_000;
/// Alternate suffixes tried for a failed domain, in priority order
pub const TLD_PRIORITY: &[&str] = &[
    "com", "net", "org", "ru", "io", "co", "info", "top", "xyz", "site",
];

// Attempt ceiling
/// Hard ceiling on resolve attempts for one input domain, across backends and candidates
pub const MAX_ATTEMPTS_PER_DOMAIN: usize = 64;

// Input
/// Lines starting with this marker are ignored
pub const COMMENT_MARKER: char = '#';
/// Input file picked when none is given on the command line
pub const DEFAULT_INPUT_FILE: &str = "general.txt";
/// Maximum domain length (RFC 1035)
pub const MAX_DOMAIN_LENGTH: usize = 253;

// Output
pub const DEFAULT_OUTPUT_FILE: &str = "hosts";
/// Backup copy of the system hosts file
pub const SYSTEM_HOSTS_BACKUP_FILE: &str = "hosts.backup";

// Progress
/// Interval between progress log lines
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);
