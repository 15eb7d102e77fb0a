//! Run resources and setup.

use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use crate::config::Config;
use crate::domain::{read_domains, Domain};
use crate::error_handling::{GenerateError, InfoType, ProcessingStats};
use crate::fallback::{FallbackStrategy, ReferenceList};
use crate::resolve::ResolveOptions;

use super::input::select_input_file;

/// Everything a run needs once the input has been read.
pub struct RunResources {
    pub input_path: PathBuf,
    pub domains: Vec<Domain>,
    pub options: ResolveOptions,
}

/// Validates `config`, reads the domain list, and prepares engine options
/// for `backend_count` backends.
///
/// The similar-domain reference list is the input itself plus the optional
/// reference file.
///
/// # Errors
///
/// Returns `GenerateError::Config` for invalid options and
/// `GenerateError::Input` when the input cannot be found or read, or holds
/// no valid domain.
pub async fn init_run_resources(
    config: &Config,
    backend_count: usize,
    stats: &ProcessingStats,
) -> Result<RunResources, GenerateError> {
    config.validate()?;

    let cwd = std::env::current_dir()
        .map_err(|e| GenerateError::Input(format!("cannot read working directory: {e}")))?;
    let input_path = select_input_file(config.file.as_deref(), &cwd).await?;

    let list = read_domains(&input_path).await?;
    stats.add_info(InfoType::DuplicateDomainSkipped, list.duplicates);
    stats.add_info(InfoType::InvalidDomainSkipped, list.invalid);
    if list.is_empty() {
        return Err(GenerateError::Input(format!(
            "no valid domains in {}",
            input_path.display()
        )));
    }

    let fallback = if config.enable_fallback {
        let mut reference = ReferenceList::new(list.domains.iter().cloned());
        if let Some(path) = &config.reference_file {
            reference.extend_from_file(path).await?;
        }
        info!(
            "Fallback enabled: up to {} candidates per domain, {} reference domains",
            config.max_fallback_candidates,
            reference.len()
        );
        Some(Arc::new(FallbackStrategy::new(
            Arc::new(reference),
            config.max_fallback_candidates,
        )))
    } else {
        if config.reference_file.is_some() {
            warn!("--reference-file is ignored because fallback is disabled");
        }
        None
    };

    let options = ResolveOptions::from_config(config, list.len(), backend_count, fallback);
    Ok(RunResources {
        input_path,
        domains: list.domains,
        options,
    })
}
