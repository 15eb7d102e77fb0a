//! Alternate-TLD candidates.

use crate::config::TLD_PRIORITY;
use crate::domain::Domain;

use super::similar::name_and_suffix;

/// The same name under each TLD of `TLD_PRIORITY`, skipping the current one.
///
/// Only the public suffix is swapped; subdomains are kept, so
/// `cdn.example.co.uk` yields `cdn.example.com`, `cdn.example.net`, ...
pub fn tld_variants(domain: &Domain) -> Vec<Domain> {
    let Some((name, suffix)) = name_and_suffix(domain) else {
        return Vec::new();
    };

    TLD_PRIORITY
        .iter()
        .filter(|tld| **tld != suffix)
        .filter_map(|tld| Domain::parse(&format!("{name}.{tld}")).ok())
        .collect()
}
