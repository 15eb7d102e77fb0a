//! Concurrent resolution of a domain list.
//!
//! `resolve_all()` dispatches each unique domain to a bounded pool of tokio
//! tasks. Each task tries the configured backends in priority order and, if
//! every backend fails, walks the fallback candidates for that domain. Results
//! land in a slot indexed by input position, so the returned list follows
//! input order no matter how tasks interleave.

mod progress;
mod task;

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::config::{BackendKind, Config, MAX_ATTEMPTS_PER_DOMAIN};
use crate::dns::Resolve;
use crate::domain::Domain;
use crate::error_handling::{FailureKind, ProcessingStats};
use crate::fallback::{Candidate, FallbackStrategy};
use crate::initialization::init_semaphore;

pub use progress::{ProgressSnapshot, ResolutionProgress};

use task::DomainTask;

/// Lifecycle of one domain inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainState {
    Pending,
    TryingBackends,
    TryingFallback,
    Success,
    Failed,
}

/// One resolve attempt against one backend.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest<'a> {
    /// The name actually queried: the input domain or a fallback candidate
    pub domain: &'a Domain,
    /// 1-based attempt number within the owning input domain
    pub attempt: usize,
    pub backend: BackendKind,
}

/// Final outcome for one input domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The input domain, which is also the name written to the hosts file
    pub domain: Domain,
    pub address: Option<IpAddr>,
    /// Backend that produced `address`
    pub backend: Option<BackendKind>,
    /// Set when `address` came from a fallback candidate
    pub fallback: Option<Candidate>,
    pub failure: Option<FailureKind>,
    pub attempts: usize,
}

impl ResolutionResult {
    pub fn failed(domain: Domain, kind: FailureKind, attempts: usize) -> Self {
        Self {
            domain,
            address: None,
            backend: None,
            fallback: None,
            failure: Some(kind),
            attempts,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.address.is_some()
    }

    /// The domain that actually resolved, if it differs from the input.
    pub fn resolved_via(&self) -> Option<&Domain> {
        self.fallback.as_ref().map(|candidate| &candidate.domain)
    }
}

/// Engine settings for one run.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub worker_count: usize,
    /// Per-call timeout for the input domain
    pub timeout: Duration,
    /// Per-call timeout for fallback candidates
    pub fallback_timeout: Duration,
    /// Ceiling on backend calls per input domain, fallback included
    pub max_attempts: usize,
    /// `None` disables fallback
    pub fallback: Option<Arc<FallbackStrategy>>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        let config = Config::default();
        Self {
            worker_count: config.effective_worker_count(0),
            timeout: config.timeout(),
            fallback_timeout: config.fallback_timeout(),
            max_attempts: config.effective_max_attempts(config.backends.len()),
            fallback: None,
        }
    }
}

impl ResolveOptions {
    /// Derives options from the configuration for an input of `domain_count`
    /// domains resolved through `backend_count` backends.
    pub fn from_config(
        config: &Config,
        domain_count: usize,
        backend_count: usize,
        fallback: Option<Arc<FallbackStrategy>>,
    ) -> Self {
        Self {
            worker_count: config.effective_worker_count(domain_count),
            timeout: config.timeout(),
            fallback_timeout: config.fallback_timeout(),
            max_attempts: config.effective_max_attempts(backend_count),
            fallback: fallback.filter(|_| config.enable_fallback),
        }
    }
}

/// Handles shared between the engine and whoever drives it.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    pub progress: Arc<ResolutionProgress>,
    pub stats: Arc<ProcessingStats>,
    pub cancel: CancellationToken,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    /// One result per unique input domain, in input order
    pub results: Vec<ResolutionResult>,
    /// True if the run was cancelled before every domain finished
    pub cancelled: bool,
}

impl ResolutionReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn resolved(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.resolved()
    }
}

/// Resolves every unique domain in `domains` and returns one result each.
///
/// At most `options.worker_count` domains are in flight at once. Cancelling
/// `ctx.cancel` stops new attempts; domains that never finished are reported
/// as `Cancelled` failures and the report is flagged as cancelled.
pub async fn resolve_all(
    domains: &[Domain],
    backends: &[Arc<dyn Resolve>],
    options: &ResolveOptions,
    ctx: &ResolveContext,
) -> ResolutionReport {
    let mut seen = HashSet::with_capacity(domains.len());
    let unique: Vec<Domain> = domains
        .iter()
        .filter(|domain| seen.insert(*domain))
        .cloned()
        .collect();

    let total = unique.len();
    ctx.progress.set_total(total);
    if total == 0 {
        return ResolutionReport {
            results: Vec::new(),
            cancelled: ctx.cancel.is_cancelled(),
        };
    }

    let worker_count = options.worker_count.max(1);
    let max_attempts = options.max_attempts.clamp(1, MAX_ATTEMPTS_PER_DOMAIN);
    info!(
        "Resolving {} domains with {} workers across {} backends (fallback {})",
        total,
        worker_count,
        backends.len(),
        if options.fallback.is_some() { "on" } else { "off" }
    );

    let semaphore = init_semaphore(worker_count);
    let backends: Arc<[Arc<dyn Resolve>]> = Arc::from(backends.to_vec());
    let mut slots: Vec<Option<ResolutionResult>> = vec![None; total];
    let mut tasks = FuturesUnordered::new();

    for (index, domain) in unique.iter().enumerate() {
        // Waiting for a permit here keeps at most `worker_count` tasks alive
        let permit = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => break,
            permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        let task = DomainTask {
            domain: domain.clone(),
            backends: Arc::clone(&backends),
            fallback: options.fallback.clone(),
            timeout: options.timeout,
            fallback_timeout: options.fallback_timeout,
            max_attempts,
            cancel: ctx.cancel.clone(),
            attempts: 0,
            state: DomainState::Pending,
        };
        let progress = Arc::clone(&ctx.progress);

        let handle = tokio::spawn(async move {
            let _permit = permit;
            let result = task.run().await;
            progress.record(&result);
            result
        });
        tasks.push(async move { (index, handle.await) });
    }

    while let Some((index, joined)) = tasks.next().await {
        let result = match joined {
            Ok(result) => result,
            Err(e) => {
                warn!("Resolution task for {} did not complete: {}", unique[index], e);
                let result = ResolutionResult::failed(unique[index].clone(), FailureKind::Network, 0);
                ctx.progress.record(&result);
                result
            }
        };
        record_stats(&ctx.stats, &result);
        debug_assert!(slots[index].is_none(), "slot {index} written twice");
        slots[index] = Some(result);
    }

    let cancelled = ctx.cancel.is_cancelled();
    let results: Vec<ResolutionResult> = slots
        .into_iter()
        .zip(unique)
        .map(|(slot, domain)| {
            slot.unwrap_or_else(|| {
                let result = ResolutionResult::failed(domain, FailureKind::Cancelled, 0);
                record_stats(&ctx.stats, &result);
                result
            })
        })
        .collect();

    let report = ResolutionReport { results, cancelled };
    if cancelled {
        warn!(
            "Resolution cancelled: {} of {} domains resolved before shutdown",
            report.resolved(),
            report.total()
        );
    } else {
        debug!(
            "Resolution finished: {} resolved, {} failed",
            report.resolved(),
            report.failed()
        );
    }
    report
}

fn record_stats(stats: &ProcessingStats, result: &ResolutionResult) {
    if let Some(kind) = result.failure {
        stats.increment_failure(kind);
    }
    if let Some(candidate) = &result.fallback {
        stats.increment_info(candidate.origin.info_type());
    }
}
