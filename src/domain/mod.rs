//! Domain normalization, validation, and the domain source.
//!
//! Key items:
//! - `Domain` - a validated, lowercase hostname
//! - `clean_input_line()` - strips schemes, `www.`, paths, and ports from an input line
//! - `registrable_domain()` - the registrable domain under the public suffix
//! - `parse_domains()` / `read_domains()` - the deduplicated domain source

mod source;

use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::MAX_DOMAIN_LENGTH;

pub use source::{parse_domains, read_domains, DomainList};

/// One DNS label: alphanumerics (and `_` for service names), inner hyphens, 1..=63 chars.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_](?:[a-z0-9_-]{0,61}[a-z0-9_])?$").expect("label regex is valid")
});

/// Reasons a string is not a usable domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("empty domain")]
    Empty,

    #[error("domain exceeds {MAX_DOMAIN_LENGTH} characters ({0})")]
    TooLong(usize),

    #[error("IP address is not a domain: {0}")]
    IpAddress(String),

    #[error("invalid label '{label}' in {domain}")]
    InvalidLabel { domain: String, label: String },

    #[error("invalid internationalized domain: {0}")]
    InvalidIdn(String),
}

/// A normalized hostname.
///
/// Lowercase, trimmed, without a trailing dot, ASCII (IDNs are punycoded),
/// and every label valid. Equality is therefore case-insensitive and
/// trailing-dot insensitive with respect to the raw input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Domain(String);

impl Domain {
    /// Normalizes and validates a raw domain string.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` when the string is empty, too long, an IP
    /// address, or contains an invalid label.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(DomainError::Empty);
        }
        if trimmed.parse::<IpAddr>().is_ok() {
            return Err(DomainError::IpAddress(trimmed.to_string()));
        }

        let lowered = if trimmed.is_ascii() {
            trimmed.to_ascii_lowercase()
        } else {
            match url::Host::parse(trimmed) {
                Ok(url::Host::Domain(ascii)) => ascii,
                _ => return Err(DomainError::InvalidIdn(trimmed.to_string())),
            }
        };

        if lowered.len() > MAX_DOMAIN_LENGTH {
            return Err(DomainError::TooLong(lowered.len()));
        }
        if let Some(label) = lowered.split('.').find(|label| !LABEL_RE.is_match(label)) {
            return Err(DomainError::InvalidLabel {
                domain: lowered.clone(),
                label: label.to_string(),
            });
        }

        Ok(Domain(lowered))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reduces a raw input line to its host part.
///
/// Accepts bare domains as well as URL-ish entries: `http://` / `https://`
/// schemes, a leading `www.`, paths, and ports are removed. Returns `None`
/// for lines with no host left.
///
/// ```
/// use domain_hosts::domain::clean_input_line;
///
/// assert_eq!(clean_input_line("https://www.example.com:8443/a?b").as_deref(), Some("example.com"));
/// assert_eq!(clean_input_line("  rutracker.org  ").as_deref(), Some("rutracker.org"));
/// ```
pub fn clean_input_line(line: &str) -> Option<String> {
    let line = line.trim();
    let host = if line.contains("://") {
        let parsed = url::Url::parse(line).ok()?;
        parsed.host_str()?.to_string()
    } else {
        let end = line.find(['/', '?', '#']).unwrap_or(line.len());
        let without_path = &line[..end];
        // A single colon is a port; more than one would be an IPv6 literal, left as is
        match without_path.split_once(':') {
            Some((host, port)) if !port.contains(':') => host.to_string(),
            _ => without_path.to_string(),
        }
    };

    let host = host.trim();
    let host = match host.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &host[4..],
        _ => host,
    };

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// The registrable domain (`example.co.uk` for `shop.example.co.uk`).
///
/// Uses the Public Suffix List. Returns `None` when the domain is itself a
/// public suffix.
pub fn registrable_domain(domain: &Domain) -> Option<&str> {
    psl::domain_str(domain.as_str())
}
