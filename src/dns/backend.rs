//! Concrete resolver backends.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::BackendKind;
use crate::domain::Domain;
use crate::error_handling::FailureKind;

use super::resolution::{classify_io_error, classify_resolve_error, pick_address};
use super::Resolve;

/// One configured backend.
///
/// Each `BackendKind` maps to exactly one variant shape; there is no
/// runtime probing of resolver capabilities.
pub enum Backend {
    /// The operating system resolver via `tokio::net::lookup_host`.
    System,
    /// A public resolver reached through `hickory-resolver`.
    Public {
        kind: BackendKind,
        resolver: TokioAsyncResolver,
    },
}

impl Backend {
    /// Builds the backend for `kind`.
    ///
    /// `timeout` is the longest per-call timeout the run will use; the
    /// hickory resolvers make a single attempt within it and skip the local
    /// hosts file and search domains.
    pub fn new(kind: BackendKind, timeout: Duration) -> Self {
        let config = match kind {
            BackendKind::System => return Backend::System,
            BackendKind::Google => ResolverConfig::google(),
            BackendKind::Cloudflare => ResolverConfig::cloudflare(),
        };

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.ndots = 0;
        opts.use_hosts_file = false;
        opts.ip_strategy = LookupIpStrategy::Ipv4thenIpv6;

        Backend::Public {
            kind,
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Backend({})", self.kind())
    }
}

#[async_trait]
impl Resolve for Backend {
    fn kind(&self) -> BackendKind {
        match self {
            Backend::System => BackendKind::System,
            Backend::Public { kind, .. } => *kind,
        }
    }

    async fn lookup(&self, domain: &Domain) -> Result<IpAddr, FailureKind> {
        match self {
            Backend::System => {
                let addrs = tokio::net::lookup_host((domain.as_str(), 0))
                    .await
                    .map_err(|e| classify_io_error(&e))?;
                pick_address(addrs.map(|addr| addr.ip())).ok_or(FailureKind::NoRecords)
            }
            Backend::Public { resolver, .. } => {
                // Trailing dot: fully qualified, never expanded with search domains
                let fqdn = format!("{}.", domain.as_str());
                let response = resolver
                    .lookup_ip(fqdn.as_str())
                    .await
                    .map_err(|e| classify_resolve_error(&e))?;
                pick_address(response.iter()).ok_or(FailureKind::NoRecords)
            }
        }
    }
}
