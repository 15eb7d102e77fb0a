//! The read-only reference list for similar-domain search.

use std::collections::HashSet;
use std::path::Path;

use crate::domain::{read_domains, Domain};
use crate::error_handling::GenerateError;

/// Known-good domain spellings, in insertion order without duplicates.
///
/// Built once before resolution starts and shared through an `Arc`; workers
/// only ever read it.
#[derive(Debug, Clone, Default)]
pub struct ReferenceList {
    entries: Vec<Domain>,
}

impl ReferenceList {
    pub fn new<I>(domains: I) -> Self
    where
        I: IntoIterator<Item = Domain>,
    {
        let mut list = Self::default();
        list.extend(domains);
        list
    }

    /// Appends domains not already present.
    pub fn extend<I>(&mut self, domains: I)
    where
        I: IntoIterator<Item = Domain>,
    {
        let mut seen: HashSet<Domain> = self.entries.iter().cloned().collect();
        for domain in domains {
            if seen.insert(domain.clone()) {
                self.entries.push(domain);
            }
        }
    }

    /// Appends the domains listed in a reference file.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::Input` when the file cannot be read.
    pub async fn extend_from_file(&mut self, path: &Path) -> Result<(), GenerateError> {
        let list = read_domains(path).await?;
        self.extend(list.domains);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
