//! Hosts file rendering and writing.
//!
//! Only successful results become entries. Entries use the input domain even
//! when the address came from a fallback candidate, are unique on
//! `(address, domain)`, and are sorted by domain then address so identical
//! runs produce byte-identical files.

mod system;

use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;
use std::path::Path;

use log::info;

use crate::domain::Domain;
use crate::error_handling::GenerateError;
use crate::resolve::ResolutionResult;

pub use system::{append_to_system_hosts, backup_system_hosts, system_hosts_path};

/// One `address<TAB>domain` line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostsEntry {
    // Field order gives the sort order: domain first, then address
    pub domain: Domain,
    pub address: IpAddr,
}

impl fmt::Display for HostsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.address, self.domain)
    }
}

/// Sorted, deduplicated entries for every successful result.
pub fn entries(results: &[ResolutionResult]) -> Vec<HostsEntry> {
    results
        .iter()
        .filter_map(|result| {
            result.address.map(|address| HostsEntry {
                domain: result.domain.clone(),
                address,
            })
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Renders the entry lines only, one `address\tdomain\n` per entry.
pub fn format(results: &[ResolutionResult]) -> String {
    format_entries(&entries(results))
}

fn format_entries(entries: &[HostsEntry]) -> String {
    entries.iter().map(|entry| format!("{entry}\n")).collect()
}

/// Renders a complete hosts file: header comment, entries, and a summary
/// comment with total, resolved and failed counts.
pub fn render_hosts_file(results: &[ResolutionResult]) -> String {
    let resolved = results.iter().filter(|r| r.succeeded()).count();
    let failed = results.len() - resolved;

    let mut content = String::new();
    content.push_str("# Hosts entries generated by domain_hosts\n");
    content.push_str(
        "# Append to /etc/hosts (Linux, macOS) or \
         C:\\Windows\\System32\\drivers\\etc\\hosts (Windows)\n",
    );
    content.push('\n');
    content.push_str(&format(results));
    content.push('\n');
    content.push_str(&format!(
        "# total: {}, resolved: {}, failed: {}\n",
        results.len(),
        resolved,
        failed
    ));
    content
}

/// Writes `content` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `GenerateError::OutputWrite` naming `path` if the write fails.
pub async fn write_hosts_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|source| GenerateError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Hosts file written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;
    use crate::error_handling::FailureKind;
    use crate::fallback::{Candidate, CandidateOrigin};

    fn domain(name: &str) -> Domain {
        Domain::parse(name).unwrap()
    }

    fn ok(name: &str, address: &str) -> ResolutionResult {
        ResolutionResult {
            domain: domain(name),
            address: Some(address.parse().unwrap()),
            backend: Some(BackendKind::System),
            fallback: None,
            failure: None,
            attempts: 1,
        }
    }

    fn failed(name: &str) -> ResolutionResult {
        ResolutionResult::failed(domain(name), FailureKind::NoRecords, 3)
    }

    #[test]
    fn test_format_sorts_by_domain_then_address() {
        let results = vec![
            ok("zeta.org", "10.0.0.1"),
            ok("alpha.com", "10.0.0.9"),
            ok("alpha.com", "10.0.0.2"),
        ];
        assert_eq!(
            format(&results),
            "10.0.0.2\talpha.com\n10.0.0.9\talpha.com\n10.0.0.1\tzeta.org\n"
        );
    }

    #[test]
    fn test_format_skips_failures_and_duplicates() {
        let results = vec![
            ok("example.com", "93.184.216.34"),
            failed("doesnotexist-xyz123.invalid"),
            ok("example.com", "93.184.216.34"),
        ];
        assert_eq!(format(&results), "93.184.216.34\texample.com\n");
    }

    #[test]
    fn test_format_uses_input_domain_for_fallback_results() {
        let mut result = ok("example.ru", "93.184.216.34");
        result.fallback = Some(Candidate {
            domain: domain("example.com"),
            origin: CandidateOrigin::TldVariant,
        });
        assert_eq!(format(&[result]), "93.184.216.34\texample.ru\n");
    }

    #[test]
    fn test_format_is_order_independent() {
        let a = vec![ok("b.com", "1.1.1.1"), ok("a.com", "2.2.2.2")];
        let b = vec![ok("a.com", "2.2.2.2"), ok("b.com", "1.1.1.1")];
        assert_eq!(format(&a), format(&b));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format(&[]), "");
        assert_eq!(format(&[failed("a.com")]), "");
    }

    #[test]
    fn test_render_hosts_file_has_header_and_summary() {
        let results = vec![ok("example.com", "93.184.216.34"), failed("bad.example")];
        let content = render_hosts_file(&results);

        assert!(content.starts_with("# "));
        assert!(content.contains("\n93.184.216.34\texample.com\n"));
        assert!(!content.contains("bad.example"));
        assert!(content.ends_with("# total: 2, resolved: 1, failed: 1\n"));
    }

    #[test]
    fn test_ipv6_entry_display() {
        let entry = HostsEntry {
            domain: domain("example.com"),
            address: "2606:2800:220:1::248".parse().unwrap(),
        };
        assert_eq!(entry.to_string(), "2606:2800:220:1::248\texample.com");
    }

    #[tokio::test]
    async fn test_write_hosts_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        write_hosts_file(&path, "1.2.3.4\ta.com\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1.2.3.4\ta.com\n");
    }

    #[tokio::test]
    async fn test_write_hosts_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("hosts");
        let err = write_hosts_file(&path, "").await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("missing"));
    }
}
