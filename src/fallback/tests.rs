//! Fallback strategy tests.

use super::*;

fn domain(name: &str) -> Domain {
    Domain::parse(name).unwrap()
}

fn reference(names: &[&str]) -> ReferenceList {
    ReferenceList::new(names.iter().map(|name| domain(name)))
}

fn names(domains: &[Domain]) -> Vec<&str> {
    domains.iter().map(Domain::as_str).collect()
}

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("example", "example"), 0);
    assert_eq!(edit_distance("exmaple", "example"), 2);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn test_tld_variants_follow_priority_and_skip_own_suffix() {
    let variants = tld_variants(&domain("example.net"));
    assert_eq!(
        names(&variants),
        vec![
            "example.com",
            "example.org",
            "example.ru",
            "example.io",
            "example.co",
            "example.info",
            "example.top",
            "example.xyz",
            "example.site",
        ]
    );
}

#[test]
fn test_tld_variants_keep_subdomains_and_swap_multi_part_suffix() {
    let variants = tld_variants(&domain("cdn.example.co.uk"));
    assert_eq!(variants.first().map(Domain::as_str), Some("cdn.example.com"));
    assert_eq!(variants.len(), TLD_COUNT);
}

const TLD_COUNT: usize = crate::config::TLD_PRIORITY.len();

#[test]
fn test_tld_variants_for_bare_suffix() {
    assert!(tld_variants(&domain("com")).is_empty());
}

#[test]
fn test_similar_domains_ordering() {
    let reference = reference(&[
        "exampel.org",      // edit distance 2
        "example-cdn.com",  // contains, 4 longer
        "example.ru",       // same name, other suffix
        "examples.com",     // prefix, 1 longer
        "unrelated.com",
        "example.com",      // the failed domain itself
    ]);
    let similar = similar_domains(&domain("example.com"), &reference);
    assert_eq!(
        names(&similar),
        vec!["example.ru", "examples.com", "example-cdn.com"]
    );
}

#[test]
fn test_similar_domains_ties_broken_lexically() {
    let reference = reference(&["example.org", "example.net", "example.io"]);
    let similar = similar_domains(&domain("example.com"), &reference);
    assert_eq!(
        names(&similar),
        vec!["example.io", "example.net", "example.org"]
    );
}

#[test]
fn test_similar_domains_ignores_distant_names() {
    let reference = reference(&["github.com", "gitlab.com", "wikipedia.org"]);
    assert!(similar_domains(&domain("rutracker.org"), &reference).is_empty());
}

#[test]
fn test_similarity_order() {
    assert!(Similarity::SameNameOtherSuffix < Similarity::Prefix);
    assert!(Similarity::Prefix < Similarity::Contains);
    assert!(Similarity::Contains < Similarity::EditDistance);
}

#[test]
fn test_candidates_order_similar_then_tld_then_parent() {
    let strategy = FallbackStrategy::new(Arc::new(reference(&["example.ru"])), 100);
    let candidates = strategy.candidate_set(&domain("cdn.example.org"));

    assert_eq!(candidates[0].origin, CandidateOrigin::SimilarDomain);
    // cdn.example vs example: containment within 4 characters
    assert_eq!(candidates[0].domain.as_str(), "example.ru");

    assert_eq!(candidates[1].origin, CandidateOrigin::TldVariant);
    assert_eq!(candidates[1].domain.as_str(), "cdn.example.com");

    let last = candidates.last().unwrap();
    assert_eq!(last.origin, CandidateOrigin::ParentDomain);
    assert_eq!(last.domain.as_str(), "example.org");
}

#[test]
fn test_candidates_never_repeat_or_include_original() {
    // example.com appears both as a similar domain and as a TLD variant
    let strategy = FallbackStrategy::new(
        Arc::new(reference(&["example.com", "example.net"])),
        100,
    );
    let original = domain("example.org");
    let candidates = strategy.candidate_set(&original);

    let mut seen = std::collections::HashSet::new();
    for candidate in &candidates {
        assert_ne!(candidate.domain, original);
        assert!(seen.insert(candidate.domain.clone()), "duplicate {candidate:?}");
    }
    assert_eq!(
        candidates
            .iter()
            .filter(|c| c.domain.as_str() == "example.com")
            .count(),
        1
    );
}

#[test]
fn test_candidates_bounded() {
    let strategy = FallbackStrategy::new(Arc::new(ReferenceList::default()), 4);
    let candidates = strategy.candidate_set(&domain("example.org"));
    assert_eq!(candidates.len(), 4);

    let none = FallbackStrategy::new(Arc::new(ReferenceList::default()), 0);
    assert!(none.candidate_set(&domain("example.org")).is_empty());
}

#[test]
fn test_parent_keeps_a_slot_when_tld_variants_fill_the_cap() {
    let strategy = FallbackStrategy::new(Arc::new(ReferenceList::default()), 10);
    for name in ["cdn.example.de", "cdn.example.co.uk"] {
        let candidates = strategy.candidate_set(&domain(name));
        assert_eq!(candidates.len(), 10, "{name}");
        assert_eq!(
            candidates.iter().filter(|c| c.origin == CandidateOrigin::TldVariant).count(),
            9,
            "{name}"
        );
        let last = candidates.last().unwrap();
        assert_eq!(last.origin, CandidateOrigin::ParentDomain, "{name}");
    }
}

#[test]
fn test_parent_keeps_a_slot_with_similar_domains() {
    let strategy = FallbackStrategy::new(
        Arc::new(reference(&["example.ru", "cdn.example.ru"])),
        3,
    );
    let candidates = strategy.candidate_set(&domain("cdn.example.de"));
    let origins: Vec<_> = candidates.iter().map(|c| c.origin).collect();
    assert_eq!(
        origins,
        vec![
            CandidateOrigin::SimilarDomain,
            CandidateOrigin::SimilarDomain,
            CandidateOrigin::ParentDomain,
        ]
    );
    assert_eq!(candidates[0].domain.as_str(), "cdn.example.ru");
    assert_eq!(candidates[1].domain.as_str(), "example.ru");
    assert_eq!(candidates[2].domain.as_str(), "example.de");

    // A cap of one goes to the parent alone
    let single = FallbackStrategy::new(Arc::new(ReferenceList::default()), 1);
    let candidates = single.candidate_set(&domain("cdn.example.de"));
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].domain.as_str(), "example.de");
}

#[test]
fn test_candidates_restartable_and_deterministic() {
    let strategy = FallbackStrategy::new(
        Arc::new(reference(&["examples.org", "example.ru", "exampel.org"])),
        10,
    );
    let d = domain("example.org");
    assert_eq!(strategy.candidate_set(&d), strategy.candidate_set(&d));
}

#[test]
fn test_reference_list_dedups_in_insertion_order() {
    let mut list = reference(&["b.com", "a.com", "b.com"]);
    list.extend(vec![domain("c.com"), domain("a.com")]);
    let entries: Vec<_> = list.iter().map(Domain::as_str).collect();
    assert_eq!(entries, vec!["b.com", "a.com", "c.com"]);
    assert_eq!(list.len(), 3);
}

#[tokio::test]
async fn test_reference_list_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# corrections").unwrap();
    writeln!(file, "example.com").unwrap();
    writeln!(file, "rutracker.org").unwrap();
    file.flush().unwrap();

    let mut list = reference(&["example.com"]);
    list.extend_from_file(file.path()).await.unwrap();
    assert_eq!(list.len(), 2);
}

#[test]
fn test_origin_info_types() {
    assert_eq!(
        CandidateOrigin::TldVariant.info_type(),
        InfoType::ResolvedViaTldVariant
    );
    assert_eq!(
        CandidateOrigin::SimilarDomain.info_type(),
        InfoType::ResolvedViaSimilarDomain
    );
    assert_eq!(
        CandidateOrigin::ParentDomain.info_type(),
        InfoType::ResolvedViaParentDomain
    );
}
