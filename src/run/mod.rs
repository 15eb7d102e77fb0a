//! Run driver: wires configuration, input, backends, the resolution engine
//! and the hosts writer together.

mod finalize;
mod input;
mod resources;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::app::{print_final_statistics, shutdown_gracefully, spawn_progress_logger};
use crate::config::{Config, LOGGING_INTERVAL, SYSTEM_HOSTS_BACKUP_FILE};
use crate::dns::Resolve;
use crate::error_handling::GenerateError;
use crate::hosts::{backup_system_hosts, system_hosts_path};
use crate::initialization::init_backends;
use crate::resolve::{resolve_all, ResolveContext};

pub use input::select_input_file;

use finalize::write_outputs;
use resources::init_run_resources;

/// Results of a hosts generation run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Unique domains processed
    pub total: usize,
    /// Domains written to the hosts file
    pub resolved: usize,
    /// Domains without an address
    pub failed: usize,
    /// Domains whose address came from a fallback candidate
    pub resolved_via_fallback: usize,
    /// Input file that was read
    pub input_path: PathBuf,
    /// Hosts file that was written
    pub output_path: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
    /// True if the run was interrupted and the output holds partial results
    pub cancelled: bool,
}

/// Generates a hosts file with the backends named in `config`.
///
/// Ctrl-C cancels the run; domains resolved so far are still written.
///
/// # Errors
///
/// See `GenerateError` for the failure modes and their exit codes.
///
/// # Example
///
/// ```no_run
/// use domain_hosts::{run_generate, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), domain_hosts::GenerateError> {
/// let config = Config {
///     file: Some(PathBuf::from("general.txt")),
///     ..Default::default()
/// };
/// let report = run_generate(config).await?;
/// println!("{} of {} domains resolved", report.resolved, report.total);
/// # Ok(())
/// # }
/// ```
pub async fn run_generate(config: Config) -> Result<GenerateReport, GenerateError> {
    config.validate()?;
    let call_timeout = config.timeout().max(config.fallback_timeout());
    let backends = init_backends(&config.backends, call_timeout)?;

    let ctx = ResolveContext::default();
    let signal_done = CancellationToken::new();
    let signal_task = {
        let cancel = ctx.cancel.clone();
        let done = signal_done.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = done.cancelled() => {}
                signal = tokio::signal::ctrl_c() => {
                    if signal.is_ok() {
                        warn!("Interrupt received, finishing with partial results");
                        cancel.cancel();
                    }
                }
            }
        })
    };

    let result = run_generate_with_backends(config, backends, ctx).await;
    signal_done.cancel();
    let _ = signal_task.await;
    result
}

/// Generates a hosts file with caller-supplied backends and context.
///
/// `config.backends` is ignored; `backends` are tried in the given order and
/// the default attempt ceiling is sized for them.
/// Cancelling `ctx.cancel` stops the run early.
///
/// # Errors
///
/// See `GenerateError` for the failure modes and their exit codes.
pub async fn run_generate_with_backends(
    config: Config,
    backends: Vec<Arc<dyn Resolve>>,
    ctx: ResolveContext,
) -> Result<GenerateReport, GenerateError> {
    let resources = init_run_resources(&config, backends.len(), &ctx.stats).await?;

    if config.backup_system_hosts {
        let source = config.system_hosts.clone().unwrap_or_else(system_hosts_path);
        let backup = config.output.with_file_name(SYSTEM_HOSTS_BACKUP_FILE);
        // A missing backup never blocks generation
        if let Err(e) = backup_system_hosts(&source, &backup)
            .await
            .with_context(|| format!("Failed to back up {}", source.display()))
        {
            warn!("{:#}", e);
        }
    }

    let start_time = std::time::Instant::now();
    let logging_cancel = CancellationToken::new();
    let logging_task = spawn_progress_logger(
        start_time,
        Arc::clone(&ctx.progress),
        LOGGING_INTERVAL,
        logging_cancel.clone(),
    );

    let report = resolve_all(&resources.domains, &backends, &resources.options, &ctx).await;

    shutdown_gracefully(logging_cancel, Some(logging_task)).await;
    let elapsed_seconds = start_time.elapsed().as_secs_f64();

    print_final_statistics(
        &ctx.stats,
        report.total(),
        report.resolved(),
        report.failed(),
        elapsed_seconds,
    );

    write_outputs(&config, &report).await?;

    if report.cancelled {
        warn!(
            "Run was cancelled; {} contains partial results",
            config.output.display()
        );
    } else {
        info!("Done: {} entries in {}", report.resolved(), config.output.display());
    }

    Ok(GenerateReport {
        total: report.total(),
        resolved: report.resolved(),
        failed: report.failed(),
        resolved_via_fallback: report
            .results
            .iter()
            .filter(|r| r.resolved_via().is_some())
            .count(),
        input_path: resources.input_path,
        output_path: config.output,
        elapsed_seconds,
        cancelled: report.cancelled,
    })
}
