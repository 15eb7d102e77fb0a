//! Similar-domain search against the reference list.

use crate::config::{
    MAX_REFERENCE_SCAN, MAX_SIMILAR_CANDIDATES, SIMILAR_CONTAINS_MAX_LEN_DIFF,
    SIMILAR_MAX_EDIT_DISTANCE, SIMILAR_PREFIX_MAX_LEN_DIFF,
};
use crate::domain::Domain;

use super::ReferenceList;

/// How a reference entry resembles the failed domain, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Similarity {
    /// Same name under a different public suffix (`example.ru` / `example.com`)
    SameNameOtherSuffix,
    /// One name extends the other by a few characters (`example` / `example-cdn`)
    Prefix,
    /// One name contains the other (`myexample` / `example`)
    Contains,
    /// A small number of edits apart (`exmaple` / `example`)
    EditDistance,
}

/// Name part and public suffix: `cdn.example` and `co.uk` for `cdn.example.co.uk`.
pub(super) fn name_and_suffix(domain: &Domain) -> Option<(&str, &str)> {
    let full = domain.as_str();
    let suffix = psl::suffix_str(full)?;
    let name = full.strip_suffix(suffix)?.strip_suffix('.')?;
    if name.is_empty() {
        None
    } else {
        Some((name, suffix))
    }
}

/// Classifies how `candidate` resembles `failed`, if at all.
fn classify(failed: (&str, &str), candidate: (&str, &str)) -> Option<(Similarity, usize)> {
    let (name, suffix) = failed;
    let (other_name, other_suffix) = candidate;
    let len_diff = name.len().abs_diff(other_name.len());

    if name == other_name {
        return (suffix != other_suffix).then_some((Similarity::SameNameOtherSuffix, 0));
    }

    let distance = edit_distance(name, other_name);
    if (name.starts_with(other_name) || other_name.starts_with(name))
        && len_diff <= SIMILAR_PREFIX_MAX_LEN_DIFF
    {
        return Some((Similarity::Prefix, distance));
    }
    if (name.contains(other_name) || other_name.contains(name))
        && len_diff <= SIMILAR_CONTAINS_MAX_LEN_DIFF
    {
        return Some((Similarity::Contains, distance));
    }
    if distance <= SIMILAR_MAX_EDIT_DISTANCE {
        return Some((Similarity::EditDistance, distance));
    }
    None
}

/// Reference entries resembling `domain`, closest first.
///
/// Ordered by similarity class, then edit distance between the names, then
/// lexically, and capped at `MAX_SIMILAR_CANDIDATES`. Only the first
/// `MAX_REFERENCE_SCAN` reference entries are considered.
pub fn similar_domains(domain: &Domain, reference: &ReferenceList) -> Vec<Domain> {
    let Some(failed) = name_and_suffix(domain) else {
        return Vec::new();
    };

    let mut scored: Vec<(Similarity, usize, &Domain)> = reference
        .iter()
        .take(MAX_REFERENCE_SCAN)
        .filter(|entry| *entry != domain)
        .filter_map(|entry| {
            let candidate = name_and_suffix(entry)?;
            let (similarity, distance) = classify(failed, candidate)?;
            Some((similarity, distance, entry))
        })
        .collect();

    scored.sort_by(|a, b| {
        (a.0, a.1, a.2.as_str()).cmp(&(b.0, b.1, b.2.as_str()))
    });

    scored
        .into_iter()
        .take(MAX_SIMILAR_CANDIDATES)
        .map(|(_, _, entry)| entry.clone())
        .collect()
}

/// Levenshtein distance over bytes.
///
/// Domains are ASCII after normalization, so bytes are characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
