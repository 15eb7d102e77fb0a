//! Fallback candidate generation for domains that failed on every backend.
//!
//! Candidates come from three sub-strategies, always in this order:
//! 1. Similar domains from the read-only reference list (closest first,
//!    ties broken lexically)
//! 2. The same name under alternate TLDs, in `TLD_PRIORITY` order
//! 3. The registrable parent domain, when the input has subdomains
//!
//! The sequence is a pure function of the domain and the reference list, so
//! repeated runs try the same candidates in the same order.

mod reference;
mod similar;
mod tld;

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{registrable_domain, Domain};
use crate::error_handling::InfoType;

pub use reference::ReferenceList;
pub use similar::{edit_distance, similar_domains, Similarity};
pub use tld::tld_variants;

/// Which sub-strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateOrigin {
    SimilarDomain,
    TldVariant,
    ParentDomain,
}

impl CandidateOrigin {
    /// Info counter bumped when a candidate of this origin resolves a domain.
    pub fn info_type(&self) -> InfoType {
        match self {
            CandidateOrigin::SimilarDomain => InfoType::ResolvedViaSimilarDomain,
            CandidateOrigin::TldVariant => InfoType::ResolvedViaTldVariant,
            CandidateOrigin::ParentDomain => InfoType::ResolvedViaParentDomain,
        }
    }
}

/// An alternative domain to resolve in place of a failed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub domain: Domain,
    pub origin: CandidateOrigin,
}

/// Derives bounded candidate sequences from a shared reference list.
#[derive(Debug, Clone)]
pub struct FallbackStrategy {
    reference: Arc<ReferenceList>,
    max_candidates: usize,
}

impl FallbackStrategy {
    pub fn new(reference: Arc<ReferenceList>, max_candidates: usize) -> Self {
        Self {
            reference,
            max_candidates,
        }
    }

    /// Candidates for `domain`, in attempt order.
    ///
    /// Produced lazily: later sub-strategies are only computed if the caller
    /// keeps pulling. Never yields `domain` itself, never repeats a
    /// candidate, and stops after `max_candidates`. When `domain` has a
    /// registrable parent, the last slot is kept for it, so similar domains
    /// and TLD variants never crowd it out. Calling it again restarts the
    /// same sequence.
    pub fn candidates<'a>(&'a self, domain: &'a Domain) -> impl Iterator<Item = Candidate> + 'a {
        let parent = registrable_domain(domain)
            .filter(|parent| *parent != domain.as_str())
            .and_then(|parent| Domain::parse(parent).ok());
        let leading_budget = self
            .max_candidates
            .saturating_sub(usize::from(parent.is_some()));

        let similar = std::iter::once(())
            .flat_map(move |_| similar_domains(domain, &self.reference))
            .map(|domain| Candidate {
                domain,
                origin: CandidateOrigin::SimilarDomain,
            });

        let variants = std::iter::once(())
            .flat_map(move |_| tld_variants(domain))
            .map(|domain| Candidate {
                domain,
                origin: CandidateOrigin::TldVariant,
            });

        let parent = parent.into_iter().map(|domain| Candidate {
            domain,
            origin: CandidateOrigin::ParentDomain,
        });

        let mut seen = HashSet::new();
        seen.insert(domain.clone());
        let mut leading = 0;

        similar
            .chain(variants)
            .chain(parent)
            .filter(move |candidate| {
                let is_parent = candidate.origin == CandidateOrigin::ParentDomain;
                if !is_parent && leading >= leading_budget {
                    return false;
                }
                if !seen.insert(candidate.domain.clone()) {
                    return false;
                }
                if !is_parent {
                    leading += 1;
                }
                true
            })
            .take(self.max_candidates)
    }

    /// Collects the full candidate set for `domain`.
    pub fn candidate_set(&self, domain: &Domain) -> Vec<Candidate> {
        self.candidates(domain).collect()
    }
}

#[cfg(test)]
mod tests;
