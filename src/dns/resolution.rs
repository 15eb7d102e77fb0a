//! Timeout enforcement and error normalization for backend lookups.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};

use crate::domain::Domain;
use crate::error_handling::FailureKind;

use super::Resolve;

/// Resolves `domain` through `backend`, giving up after `timeout`.
///
/// An expired call is reported as `FailureKind::Timeout`; the future is
/// dropped, so a stuck backend never holds the caller.
///
/// # Errors
///
/// Returns the backend's normalized `FailureKind`, or `Timeout`.
pub async fn resolve_with_timeout(
    backend: &dyn Resolve,
    domain: &Domain,
    timeout: Duration,
) -> Result<IpAddr, FailureKind> {
    match tokio::time::timeout(timeout, backend.lookup(domain)).await {
        Ok(result) => result,
        Err(_) => {
            log::debug!(
                "{} lookup for {} timed out after {:.1}s",
                backend.kind(),
                domain,
                timeout.as_secs_f64()
            );
            Err(FailureKind::Timeout)
        }
    }
}

/// Picks the address to publish: the first IPv4 answer, else the first answer.
///
/// Hosts files are mostly consumed by IPv4 stacks, matching what
/// `gethostbyname` would have returned.
pub fn pick_address<I>(addrs: I) -> Option<IpAddr>
where
    I: IntoIterator<Item = IpAddr>,
{
    let mut first = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        first.get_or_insert(addr);
    }
    first
}

/// Maps a `hickory-resolver` error to a `FailureKind`.
pub fn classify_resolve_error(err: &ResolveError) -> FailureKind {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => FailureKind::NoRecords,
        ResolveErrorKind::Timeout => FailureKind::Timeout,
        _ => FailureKind::Network,
    }
}

/// Maps a system resolver (`getaddrinfo`) error to a `FailureKind`.
///
/// `getaddrinfo` failures surface as opaque I/O errors, so the message is
/// the only signal for "name does not exist".
pub fn classify_io_error(err: &std::io::Error) -> FailureKind {
    match err.kind() {
        std::io::ErrorKind::TimedOut => return FailureKind::Timeout,
        std::io::ErrorKind::InvalidInput => return FailureKind::InvalidName,
        _ => {}
    }
    let msg = err.to_string().to_lowercase();
    if msg.contains("not known")
        || msg.contains("no address associated")
        || msg.contains("nodename nor servname")
        || msg.contains("no such host")
    {
        FailureKind::NoRecords
    } else {
        FailureKind::Network
    }
}
