//! Integration with the operating system hosts file.

use std::path::{Path, PathBuf};

use log::{info, warn};
use tokio::io::AsyncWriteExt;

use crate::error_handling::GenerateError;

use super::HostsEntry;

/// Location of the system hosts file for the current platform.
pub fn system_hosts_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Copies `hosts` to `backup`, overwriting any previous backup.
///
/// Returns the number of bytes copied.
pub async fn backup_system_hosts(hosts: &Path, backup: &Path) -> std::io::Result<u64> {
    let bytes = tokio::fs::copy(hosts, backup).await?;
    info!(
        "Backed up {} to {} ({} bytes)",
        hosts.display(),
        backup.display(),
        bytes
    );
    Ok(bytes)
}

/// Appends `entries` to the hosts file at `hosts`.
///
/// Nothing is written when `entries` is empty. A newline is inserted first
/// if the existing file does not end with one.
///
/// # Errors
///
/// Returns `GenerateError::OutputWrite` if the file cannot be read or
/// appended to, which usually means missing privileges.
pub async fn append_to_system_hosts(
    hosts: &Path,
    entries: &[HostsEntry],
) -> Result<usize, GenerateError> {
    if entries.is_empty() {
        warn!("No entries to append to {}", hosts.display());
        return Ok(0);
    }

    let write_error = |source| GenerateError::OutputWrite {
        path: hosts.to_path_buf(),
        source,
    };

    let existing = match tokio::fs::read(hosts).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(write_error(e)),
    };

    let mut block = String::new();
    if existing.last().is_some_and(|&b| b != b'\n') {
        block.push('\n');
    }
    for entry in entries {
        block.push_str(&entry.to_string());
        block.push('\n');
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(hosts)
        .await
        .map_err(write_error)?;
    file.write_all(block.as_bytes()).await.map_err(write_error)?;
    file.flush().await.map_err(write_error)?;

    info!("Appended {} entries to {}", entries.len(), hosts.display());
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;

    fn entry(address: &str, name: &str) -> HostsEntry {
        HostsEntry {
            domain: Domain::parse(name).unwrap(),
            address: address.parse().unwrap(),
        }
    }

    #[test]
    fn test_system_hosts_path() {
        let path = system_hosts_path();
        assert!(path.ends_with("hosts"));
    }

    #[tokio::test]
    async fn test_backup_copies_contents() {
        let dir = tempfile::tempdir().unwrap();
        let hosts = dir.path().join("hosts");
        let backup = dir.path().join("hosts.backup");
        std::fs::write(&hosts, "127.0.0.1\tlocalhost\n").unwrap();

        let bytes = backup_system_hosts(&hosts, &backup).await.unwrap();
        assert_eq!(bytes, 20);
        assert_eq!(
            std::fs::read_to_string(&backup).unwrap(),
            "127.0.0.1\tlocalhost\n"
        );
    }

    #[tokio::test]
    async fn test_backup_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            backup_system_hosts(&dir.path().join("absent"), &dir.path().join("b")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_append_adds_missing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let hosts = dir.path().join("hosts");
        std::fs::write(&hosts, "127.0.0.1\tlocalhost").unwrap();

        let appended = append_to_system_hosts(&hosts, &[entry("1.2.3.4", "example.com")])
            .await
            .unwrap();
        assert_eq!(appended, 1);
        assert_eq!(
            std::fs::read_to_string(&hosts).unwrap(),
            "127.0.0.1\tlocalhost\n1.2.3.4\texample.com\n"
        );
    }

    #[tokio::test]
    async fn test_append_nothing_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let hosts = dir.path().join("hosts");
        std::fs::write(&hosts, "127.0.0.1\tlocalhost\n").unwrap();

        assert_eq!(append_to_system_hosts(&hosts, &[]).await.unwrap(), 0);
        assert_eq!(
            std::fs::read_to_string(&hosts).unwrap(),
            "127.0.0.1\tlocalhost\n"
        );
    }
}
