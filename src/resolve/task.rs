//! Per-domain resolution task.
//!
//! One `DomainTask` walks a single domain through
//! `Pending -> TryingBackends -> (Success | TryingFallback) -> (Success | Failed)`.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};
use tokio_util::sync::CancellationToken;

use crate::config::BackendKind;
use crate::dns::{resolve_with_timeout, Resolve};
use crate::domain::Domain;
use crate::error_handling::FailureKind;
use crate::fallback::{Candidate, FallbackStrategy};

use super::{DomainState, ResolutionRequest, ResolutionResult};

/// Why a stage stopped without an address.
enum Stop {
    /// Every backend answered with a failure; carries the last one
    Exhausted(FailureKind),
    Cancelled,
    AttemptLimit,
}

pub(super) struct DomainTask {
    pub domain: Domain,
    pub backends: Arc<[Arc<dyn Resolve>]>,
    pub fallback: Option<Arc<FallbackStrategy>>,
    pub timeout: Duration,
    pub fallback_timeout: Duration,
    pub max_attempts: usize,
    pub cancel: CancellationToken,
    pub attempts: usize,
    pub state: DomainState,
}

impl DomainTask {
    pub async fn run(mut self) -> ResolutionResult {
        let domain = self.domain.clone();

        self.transition(DomainState::TryingBackends);
        let primary_failure = match self.try_backends(&domain, self.timeout).await {
            Ok((address, backend)) => return self.succeed(address, backend, None),
            Err(Stop::Exhausted(kind)) => kind,
            Err(Stop::Cancelled) => return self.fail(FailureKind::Cancelled),
            Err(Stop::AttemptLimit) => return self.fail(FailureKind::AttemptLimit),
        };

        let Some(fallback) = self.fallback.clone() else {
            return self.fail(primary_failure);
        };

        self.transition(DomainState::TryingFallback);
        for candidate in fallback.candidates(&domain) {
            match self.try_backends(&candidate.domain, self.fallback_timeout).await {
                Ok((address, backend)) => {
                    debug!(
                        "{} resolved via {:?} candidate {}",
                        domain, candidate.origin, candidate.domain
                    );
                    return self.succeed(address, backend, Some(candidate));
                }
                Err(Stop::Exhausted(_)) => continue,
                Err(Stop::Cancelled) => return self.fail(FailureKind::Cancelled),
                Err(Stop::AttemptLimit) => return self.fail(FailureKind::AttemptLimit),
            }
        }

        self.fail(primary_failure)
    }

    /// Tries every backend in priority order for `target`.
    async fn try_backends(
        &mut self,
        target: &Domain,
        timeout: Duration,
    ) -> Result<(IpAddr, BackendKind), Stop> {
        let backends = Arc::clone(&self.backends);
        let mut last_failure = FailureKind::NoRecords;

        for backend in backends.iter() {
            if self.cancel.is_cancelled() {
                return Err(Stop::Cancelled);
            }
            if self.attempts >= self.max_attempts {
                debug!(
                    "{}: attempt limit ({}) reached",
                    self.domain, self.max_attempts
                );
                return Err(Stop::AttemptLimit);
            }
            self.attempts += 1;

            let request = ResolutionRequest {
                domain: target,
                attempt: self.attempts,
                backend: backend.kind(),
            };
            trace!("{}: {:?}", self.domain, request);

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(Stop::Cancelled),
                outcome = resolve_with_timeout(backend.as_ref(), target, timeout) => outcome,
            };

            match outcome {
                Ok(address) => return Ok((address, request.backend)),
                Err(kind) => {
                    trace!("{} via {} failed: {}", target, request.backend, kind);
                    last_failure = kind;
                }
            }
        }

        Err(Stop::Exhausted(last_failure))
    }

    fn transition(&mut self, next: DomainState) {
        debug!("{}: {:?} -> {:?}", self.domain, self.state, next);
        self.state = next;
    }

    fn succeed(
        mut self,
        address: IpAddr,
        backend: BackendKind,
        fallback: Option<Candidate>,
    ) -> ResolutionResult {
        self.transition(DomainState::Success);
        ResolutionResult {
            domain: self.domain,
            address: Some(address),
            backend: Some(backend),
            fallback,
            failure: None,
            attempts: self.attempts,
        }
    }

    fn fail(mut self, kind: FailureKind) -> ResolutionResult {
        self.transition(DomainState::Failed);
        debug!("{}: failed after {} attempts ({})", self.domain, self.attempts, kind);
        ResolutionResult::failed(self.domain, kind, self.attempts)
    }
}
