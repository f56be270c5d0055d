//! Candidate normalization: deduplication and deterministic ordering.

use std::collections::HashSet;

use crate::model::HeadingCandidate;

/// Deduplicate and order raw candidates.
///
/// Duplicates share (lowercased trimmed text, page); the first occurrence
/// in insertion order wins, regardless of level. The survivors are sorted
/// by ascending page, then ascending text length in characters: shorter
/// headings first on a tied page. The sort is stable, so fully tied
/// candidates keep their insertion order.
pub fn normalize(candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
    let mut seen = HashSet::new();
    let mut kept: Vec<HeadingCandidate> = candidates
        .into_iter()
        .filter(|c| seen.insert((c.text.trim().to_lowercase(), c.page)))
        .collect();

    kept.sort_by_key(|c| (c.page, c.text.chars().count()));
    kept
}
