//! Exact-match detection and fuzzy relevance ranking.
//!
//! Scores candidates against the query with weighted multi-field approximate
//! matching. Scores run 0 (perfect) to 1 (no match); lower is better.

use crate::models::{Candidate, Provenance, ScoredCandidate};
use std::cmp::Ordering;

/// Dominant field weight
const TITLE_WEIGHT: f64 = 0.9;
/// Minor field weight
const OVERVIEW_WEIGHT: f64 = 0.1;
/// Minimum matched-substring length; shorter queries are all noise
const MIN_MATCH_LEN: usize = 2;

/// Tunable ranking thresholds.
///
/// Both values are empirically chosen; a different matching backend will not
/// reproduce them exactly, so they are parameters rather than invariants.
#[derive(Debug, Clone)]
pub struct RankingOptions {
    /// Candidates scoring at or above this are dropped from the ranked output
    pub score_cutoff: f64,
    /// Two scores closer than this are treated as effectively tied
    pub near_tie_band: f64,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            score_cutoff: 0.8,
            near_tie_band: 0.1,
        }
    }
}

/// Normalizes text for matching: collapse whitespace and lowercase.
pub fn normalize_search_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when the normalized title equals, contains, or is contained by the
/// normalized query.
///
/// Deliberately liberal: an unambiguous title the remote search already
/// surfaced must never be lost to an unlucky fuzzy score. The composer
/// bounds how many of these surface.
pub fn is_exact_match(candidate: &Candidate, query_norm: &str) -> bool {
    if query_norm.is_empty() {
        return false;
    }
    let title = normalize_search_text(&candidate.title);
    if title.is_empty() {
        return false;
    }
    title == query_norm || title.contains(query_norm) || query_norm.contains(&title)
}

/// Finds candidates whose normalized title exactly or substring-matches the
/// query, preserving input order.
pub fn find_exact_matches(candidates: &[Candidate], query_text: &str) -> Vec<Candidate> {
    let query_norm = normalize_search_text(query_text);
    candidates
        .iter()
        .filter(|c| is_exact_match(c, &query_norm))
        .cloned()
        .collect()
}

/// Distance (0 perfect, 1 no match) between the normalized query and one
/// candidate field. None when the field is empty and contributes no signal.
///
/// Matching is location independent: the best of whole-field similarity,
/// containment, and per-token similarity counts.
fn field_distance(query_norm: &str, value: &str) -> Option<f64> {
    let normalized = normalize_search_text(value);
    if normalized.is_empty() {
        return None;
    }
    if query_norm.chars().count() < MIN_MATCH_LEN {
        return Some(1.0);
    }
    if normalized == query_norm {
        return Some(0.0);
    }

    let mut best = strsim::normalized_levenshtein(query_norm, &normalized);

    if normalized.contains(query_norm) || query_norm.contains(&normalized) {
        let query_len = query_norm.chars().count() as f64;
        let value_len = normalized.chars().count() as f64;
        let ratio = (query_len.min(value_len) / query_len.max(value_len)).clamp(0.0, 1.0);
        best = best.max(ratio);
    }

    for token in normalized.split(|ch: char| !ch.is_alphanumeric()) {
        if token.chars().count() < MIN_MATCH_LEN {
            continue;
        }
        best = best.max(strsim::normalized_levenshtein(query_norm, token));
    }

    Some((1.0 - best).clamp(0.0, 1.0))
}

/// Weighted multi-field score for one candidate.
///
/// Weights renormalize over the fields that are present, so a perfect title
/// match on a candidate without an overview still scores 0.
fn score_candidate(candidate: &Candidate, query_norm: &str) -> Option<f64> {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    if let Some(distance) = field_distance(query_norm, &candidate.title) {
        weighted += TITLE_WEIGHT * distance;
        total_weight += TITLE_WEIGHT;
    }
    if let Some(distance) = field_distance(query_norm, &candidate.overview) {
        weighted += OVERVIEW_WEIGHT * distance;
        total_weight += OVERVIEW_WEIGHT;
    }

    if total_weight == 0.0 {
        return None;
    }
    Some(weighted / total_weight)
}

/// Scores and orders candidates against the query.
///
/// Candidates at or above the score cutoff are dropped. Ordering is score
/// ascending; within the near-tie band, remote provenance beats local, then
/// higher rating wins. Never fails: an empty candidate list yields an empty
/// ranked sequence.
pub fn rank(
    candidates: &[Candidate],
    query_text: &str,
    options: &RankingOptions,
) -> Vec<ScoredCandidate> {
    let query_norm = normalize_search_text(query_text);
    if query_norm.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .filter_map(|candidate| {
            let match_score = score_candidate(candidate, &query_norm)?;
            if match_score >= options.score_cutoff {
                return None;
            }
            Some(ScoredCandidate {
                is_exact: is_exact_match(candidate, &query_norm),
                candidate: candidate.clone(),
                match_score,
            })
        })
        .collect();

    scored.sort_by(|a, b| compare_scored(a, b, options.near_tie_band));
    scored
}

/// Total order over scored candidates.
///
/// Scores are bucketed into band-width groups so the near-tie preference
/// stays transitive: comparing raw score deltas against the band makes
/// "effectively tied" intransitive (a~b and b~c do not imply a~c), which is
/// not a valid sort order. Within a bucket, remote provenance beats local,
/// then higher rating, then raw score.
fn compare_scored(a: &ScoredCandidate, b: &ScoredCandidate, near_tie_band: f64) -> Ordering {
    if near_tie_band > 0.0 {
        let bucket_a = (a.match_score / near_tie_band).floor();
        let bucket_b = (b.match_score / near_tie_band).floor();
        let bucket = bucket_a.partial_cmp(&bucket_b).unwrap_or(Ordering::Equal);
        if bucket != Ordering::Equal {
            return bucket;
        }
        let provenance = provenance_rank(a.candidate.provenance)
            .cmp(&provenance_rank(b.candidate.provenance));
        if provenance != Ordering::Equal {
            return provenance;
        }
        let rating = b
            .candidate
            .rating_score
            .partial_cmp(&a.candidate.rating_score)
            .unwrap_or(Ordering::Equal);
        if rating != Ordering::Equal {
            return rating;
        }
    }
    a.match_score
        .partial_cmp(&b.match_score)
        .unwrap_or(Ordering::Equal)
}

fn provenance_rank(provenance: Provenance) -> u8 {
    match provenance {
        Provenance::Remote => 0,
        Provenance::Local => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, overview: &str, provenance: Provenance, rating: f64) -> Candidate {
        Candidate {
            external_id: None,
            title: title.to_string(),
            overview: overview.to_string(),
            release_date: None,
            poster_ref: None,
            backdrop_ref: None,
            runtime_minutes: None,
            genre_ids: Vec::new(),
            rating_score: rating,
            provenance,
        }
    }

    #[test]
    fn test_normalize_search_text() {
        assert_eq!(normalize_search_text("  The   Matrix  "), "the matrix");
        assert!(normalize_search_text("   ").is_empty());
    }

    #[test]
    fn test_exact_match_recall_on_equal_title() {
        let candidates = vec![candidate("Inception", "", Provenance::Remote, 8.4)];
        let exact = find_exact_matches(&candidates, "inception");
        assert_eq!(exact.len(), 1);
    }

    #[test]
    fn test_exact_match_includes_containment_both_ways() {
        let candidates = vec![
            candidate("Inception: The Cobol Job", "", Provenance::Remote, 6.0),
            candidate("Incep", "", Provenance::Local, 0.0),
        ];
        let exact = find_exact_matches(&candidates, "Inception");
        // candidate contains query, and query contains candidate
        assert_eq!(exact.len(), 2);
    }

    #[test]
    fn test_identical_title_scores_zero() {
        let candidates = vec![candidate("Inception", "", Provenance::Remote, 8.4)];
        let ranked = rank(&candidates, "Inception", &RankingOptions::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].match_score, 0.0);
        assert!(ranked[0].is_exact);
    }

    #[test]
    fn test_typo_still_ranks_below_cutoff() {
        // Scenario B: one substitution should survive the 0.8 cutoff
        let candidates = vec![candidate(
            "Inception",
            "A thief who steals corporate secrets",
            Provenance::Remote,
            8.4,
        )];
        let ranked = rank(&candidates, "incepton", &RankingOptions::default());
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].match_score < 0.8);
        assert!(!ranked[0].is_exact);
    }

    #[test]
    fn test_score_monotonicity() {
        let exact = candidate("Inception", "", Provenance::Remote, 0.0);
        let near = candidate("Incepton Story", "", Provenance::Remote, 0.0);
        let ranked = rank(
            &[near, exact],
            "Inception",
            &RankingOptions {
                near_tie_band: 0.0,
                ..Default::default()
            },
        );
        assert_eq!(ranked[0].candidate.title, "Inception");
        assert_eq!(ranked[0].match_score, 0.0);
    }

    #[test]
    fn test_unrelated_title_is_dropped() {
        let candidates = vec![candidate("Zzyzx Quartet", "", Provenance::Remote, 5.0)];
        let ranked = rank(&candidates, "Inception", &RankingOptions::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_near_tie_prefers_remote_provenance() {
        let local = candidate("Inception", "", Provenance::Local, 9.9);
        let remote = candidate("The Inception", "", Provenance::Remote, 1.0);
        let ranked = rank(&[local, remote], "Inception", &RankingOptions::default());
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate.provenance, Provenance::Remote);
    }

    #[test]
    fn test_near_tie_equal_provenance_prefers_rating() {
        let low = candidate("Inceptio", "", Provenance::Remote, 5.0);
        let high = candidate("Inceptios", "", Provenance::Remote, 8.0);
        let ranked = rank(&[low, high], "Inception", &RankingOptions::default());
        assert_eq!(ranked[0].candidate.rating_score, 8.0);
    }

    #[test]
    fn test_clear_score_gap_ignores_provenance() {
        let local_exact = candidate("Inception", "", Provenance::Local, 0.0);
        let remote_far = candidate("Inceptus Chronicles", "", Provenance::Remote, 9.0);
        let ranked = rank(
            &[remote_far, local_exact],
            "Inception",
            &RankingOptions::default(),
        );
        assert_eq!(ranked[0].candidate.provenance, Provenance::Local);
    }

    #[test]
    fn test_empty_inputs_yield_empty_output() {
        assert!(rank(&[], "Inception", &RankingOptions::default()).is_empty());
        let candidates = vec![candidate("Inception", "", Provenance::Remote, 8.4)];
        assert!(rank(&candidates, "  ", &RankingOptions::default()).is_empty());
    }

    #[test]
    fn test_comparator_is_transitive_across_the_band_edge() {
        // Scores straddling the band boundary must not form an ordering
        // cycle (score deltas 0.0/0.09/0.1 with ratings 1/9/10 used to
        // produce a < b, b < c, and c < a).
        let scored = |score: f64, rating: f64| ScoredCandidate {
            candidate: candidate("Inception", "", Provenance::Remote, rating),
            match_score: score,
            is_exact: false,
        };
        let a = scored(0.0, 1.0);
        let b = scored(0.09, 9.0);
        let c = scored(0.1, 10.0);

        let band = RankingOptions::default().near_tie_band;
        let ab = compare_scored(&a, &b, band);
        let bc = compare_scored(&b, &c, band);
        let ac = compare_scored(&a, &c, band);
        if ab == Ordering::Less && bc == Ordering::Less {
            assert_eq!(ac, Ordering::Less);
        }
        assert_eq!(compare_scored(&a, &b, band), compare_scored(&b, &a, band).reverse());
        assert_eq!(compare_scored(&b, &c, band), compare_scored(&c, &b, band).reverse());
        assert_eq!(compare_scored(&a, &c, band), compare_scored(&c, &a, band).reverse());

        // Deterministic order: a and b share a band bucket, so the higher
        // rating leads; c sits in the next bucket and trails both.
        let mut all = vec![a, b, c];
        all.sort_by(|x, y| compare_scored(x, y, band));
        let order: Vec<f64> = all.iter().map(|s| s.match_score).collect();
        assert_eq!(order, vec![0.09, 0.0, 0.1]);
    }

    #[test]
    fn test_single_character_query_is_noise() {
        let candidates = vec![candidate("Inception", "", Provenance::Remote, 8.4)];
        let ranked = rank(&candidates, "i", &RankingOptions::default());
        assert!(ranked.is_empty());
    }
}
