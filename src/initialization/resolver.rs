//! Resolver backend initialization.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::config::BackendKind;
use crate::dns::{Backend, Resolve};
use crate::error_handling::InitializationError;

/// Builds one backend per configured kind, keeping the configured priority.
///
/// A kind listed twice is only built once, at its first position. `timeout`
/// is the upper bound for a single call; the engine enforces the per-stage
/// timeouts on top of it.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if `kinds` is empty.
pub fn init_backends(
    kinds: &[BackendKind],
    timeout: Duration,
) -> Result<Vec<Arc<dyn Resolve>>, InitializationError> {
    let mut backends: Vec<Arc<dyn Resolve>> = Vec::with_capacity(kinds.len());
    let mut built: Vec<BackendKind> = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        if built.contains(&kind) {
            debug!("Backend {} listed more than once, keeping first position", kind);
            continue;
        }
        built.push(kind);
        backends.push(Arc::new(Backend::new(kind, timeout)));
    }

    if backends.is_empty() {
        return Err(InitializationError::DnsResolverError(
            "no resolver backends configured".to_string(),
        ));
    }

    debug!(
        "Initialized backends: {}",
        built
            .iter()
            .map(BackendKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(backends)
}
