//! Domain source: reads, cleans, validates, and deduplicates input domains.

use std::collections::HashSet;
use std::path::Path;

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::COMMENT_MARKER;
use crate::error_handling::GenerateError;

use super::{clean_input_line, Domain};

/// Deduplicated domains in first-seen order, plus what was dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainList {
    pub domains: Vec<Domain>,
    /// Lines that normalized to an already seen domain
    pub duplicates: usize,
    /// Lines that did not normalize to a valid domain
    pub invalid: usize,
}

impl DomainList {
    /// Adds one raw input line. Blank lines and comments are ignored.
    fn push_line(&mut self, line: &str, seen: &mut HashSet<Domain>) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            return;
        }

        let Some(host) = clean_input_line(trimmed) else {
            warn!("Skipping line without a host: {trimmed}");
            self.invalid += 1;
            return;
        };

        match Domain::parse(&host) {
            Ok(domain) => {
                if seen.insert(domain.clone()) {
                    self.domains.push(domain);
                } else {
                    debug!("Skipping duplicate domain: {domain}");
                    self.duplicates += 1;
                }
            }
            Err(e) => {
                warn!("Skipping invalid domain '{trimmed}': {e}");
                self.invalid += 1;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Parses domains from in-memory text, one per line.
pub fn parse_domains(text: &str) -> DomainList {
    let mut list = DomainList::default();
    let mut seen = HashSet::new();
    for line in text.lines() {
        list.push_line(line, &mut seen);
    }
    list
}

/// Reads domains from a file, one per line.
///
/// # Errors
///
/// Returns `GenerateError::Input` when the file cannot be opened or read.
/// An empty result is not an error here; the caller decides.
pub async fn read_domains(path: &Path) -> Result<DomainList, GenerateError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| GenerateError::Input(format!("cannot open {}: {e}", path.display())))?;

    let mut lines = BufReader::new(file).lines();
    let mut list = DomainList::default();
    let mut seen = HashSet::new();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| GenerateError::Input(format!("cannot read {}: {e}", path.display())))?
    {
        list.push_line(&line, &mut seen);
    }

    info!(
        "Read {} domains from {} ({} duplicates, {} invalid)",
        list.len(),
        path.display(),
        list.duplicates,
        list.invalid
    );
    Ok(list)
}
