//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_hosts` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_hosts::initialization::init_logger_with;
use domain_hosts::{run_generate, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    if let Err(e) =
        init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")
    {
        eprintln!("domain_hosts error: {:#}", e);
        process::exit(1);
    }

    match run_generate(config).await {
        Ok(report) => {
            println!(
                "✅ Resolved {} of {} domain{} ({} failed, {} via fallback) in {:.1}s",
                report.resolved,
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.failed,
                report.resolved_via_fallback,
                report.elapsed_seconds
            );
            println!("Hosts file saved to {}", report.output_path.display());
            if report.cancelled {
                println!("Run was interrupted; the file holds partial results");
            }
            Ok(())
        }
        Err(e) => {
            let code = e.exit_code();
            eprintln!("domain_hosts error: {:#}", anyhow::Error::from(e));
            process::exit(code);
        }
    }
}
