/// Result composition: merges exact matches, fuzzy-ranked matches, and
/// remaining raw remote results into one ordered, capped output list.
use crate::{
    models::{Candidate, DedupKey, RemoteMovieRecord, ScoredCandidate},
    services::search::normalize,
};
use std::collections::HashSet;

/// Hard cap on composed output length
pub const MAX_RESULTS: usize = 20;
/// Cap on raw remote results appended as a relevance safety net
const MAX_REMOTE_EXTRAS: usize = 10;

/// Assembles the final result list.
///
/// Placement order, skipping anything already placed (tracked by dedup key):
/// 1. exact matches, original relative order
/// 2. fuzzy-ranked matches, ranked order
/// 3. up to 10 raw remote results, bypassing dedup and ranking entirely —
///    the remote catalog's own relevance is trusted as a fallback when the
///    local logic under-ranks a legitimate hit
/// 4. if still empty, the full deduplicated list in source order, so the
///    caller receives whatever was found when no candidate cleared the
///    ranking threshold
pub fn compose(
    exact: &[Candidate],
    ranked: &[ScoredCandidate],
    raw_remote: &[RemoteMovieRecord],
    deduped: &[Candidate],
) -> Vec<Candidate> {
    let mut placed: HashSet<DedupKey> = HashSet::new();
    let mut results: Vec<Candidate> = Vec::new();

    for candidate in exact {
        if placed.insert(candidate.dedup_key()) {
            results.push(candidate.clone());
        }
    }

    for scored in ranked {
        if placed.insert(scored.candidate.dedup_key()) {
            results.push(scored.candidate.clone());
        }
    }

    let mut extras = 0;
    for record in raw_remote {
        if extras >= MAX_REMOTE_EXTRAS {
            break;
        }
        let Some(candidate) = normalize::from_remote(record.clone()) else {
            continue;
        };
        if placed.insert(candidate.dedup_key()) {
            results.push(candidate);
            extras += 1;
        }
    }

    if results.is_empty() {
        results.extend(deduped.iter().take(MAX_RESULTS).cloned());
    }

    results.truncate(MAX_RESULTS);
    results
}
