//! Output writing and system hosts integration after resolution.

use std::path::Path;

use log::info;

use crate::config::Config;
use crate::error_handling::GenerateError;
use crate::hosts::{
    append_to_system_hosts, entries, render_hosts_file, system_hosts_path, write_hosts_file,
};
use crate::resolve::ResolutionReport;

/// Writes the hosts file for `report` and, if asked, appends the entries to
/// the system hosts file.
///
/// Nothing is written when no domain resolved.
///
/// # Errors
///
/// Returns `GenerateError::NothingResolved` when every domain failed and
/// `GenerateError::OutputWrite` when a file cannot be written.
pub async fn write_outputs(config: &Config, report: &ResolutionReport) -> Result<(), GenerateError> {
    if report.resolved() == 0 {
        return Err(GenerateError::NothingResolved {
            total: report.total(),
        });
    }

    let content = render_hosts_file(&report.results);
    write_hosts_file(&config.output, &content).await?;

    if config.append_to_system {
        let system_path = config
            .system_hosts
            .clone()
            .unwrap_or_else(system_hosts_path);
        append_entries(&system_path, report).await?;
    }

    Ok(())
}

async fn append_entries(system_path: &Path, report: &ResolutionReport) -> Result<(), GenerateError> {
    let entries = entries(&report.results);
    let appended = append_to_system_hosts(system_path, &entries).await?;
    info!(
        "System hosts {} updated; flush the DNS cache if names still resolve to old addresses",
        system_path.display()
    );
    log::debug!("{} entries appended", appended);
    Ok(())
}
