/// Deduplication: collapses candidates that represent the same underlying
/// title using identifier and normalized-title equality.
use crate::models::{Candidate, DedupKey, Provenance};
use std::collections::HashMap;

/// Collapses duplicate candidates in a single pass.
///
/// Output order equals first-insertion order of each surviving key. On a key
/// collision the first-seen candidate wins, except that remote provenance
/// replaces local (remote catalog data is authoritative).
pub fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut winners: Vec<Candidate> = Vec::new();
    let mut index: HashMap<DedupKey, usize> = HashMap::new();

    for candidate in candidates {
        let key = candidate.dedup_key();
        match index.get(&key) {
            Some(&slot) => {
                if candidate.provenance == Provenance::Remote
                    && winners[slot].provenance == Provenance::Local
                {
                    winners[slot] = candidate;
                }
            }
            None => {
                index.insert(key, winners.len());
                winners.push(candidate);
            }
        }
    }

    winners
}
