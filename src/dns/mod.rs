//! Name-resolution backends.
//!
//! This module provides the uniform `Resolve` contract and its backends:
//! - `System` - the operating system resolver
//! - `Google` / `Cloudflare` - public resolvers queried through `hickory-resolver`
//!
//! Every call made through `resolve_with_timeout()` is bounded by an explicit
//! timeout, and every backend error is normalized to a `FailureKind`.

mod backend;
mod resolution;

use std::net::IpAddr;

use async_trait::async_trait;

use crate::config::BackendKind;
use crate::domain::Domain;
use crate::error_handling::FailureKind;

// Re-export public API
pub use backend::Backend;
pub use resolution::{classify_io_error, classify_resolve_error, pick_address, resolve_with_timeout};

/// A name-resolution provider.
///
/// Implementations only answer "what address does this domain have?". They
/// must not retry across providers; ordering, timeouts, and fallback belong
/// to the orchestrator.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Which backend this is, for logging and result attribution.
    fn kind(&self) -> BackendKind;

    /// Looks up one address for `domain`.
    async fn lookup(&self, domain: &Domain) -> Result<IpAddr, FailureKind>;
}
