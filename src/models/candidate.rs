use serde::{Deserialize, Serialize};

/// Which source produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Remote catalog (authoritative on dedup conflicts)
    Remote,
    /// Local mirror database
    Local,
}

/// A canonical, provenance-tagged search result unit.
///
/// Every source's native record shape is normalized into this one form so
/// that dedup, ranking, and composition are source-agnostic. Image fields
/// hold opaque path references; they are resolved to absolute URLs only at
/// the response boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Remote catalog numeric identifier; None for mirror-only rows
    pub external_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
    pub poster_ref: Option<String>,
    pub backdrop_ref: Option<String>,
    pub runtime_minutes: Option<i64>,
    /// Remote-sourced candidates only; mirror rows carry an empty sequence
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    /// 0.0 when unknown
    #[serde(default)]
    pub rating_score: f64,
    pub provenance: Provenance,
}

/// Identity key used to collapse duplicate candidates.
///
/// The external id when present, otherwise the lower-cased trimmed title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    External(i64),
    Title(String),
}

impl Candidate {
    pub fn dedup_key(&self) -> DedupKey {
        match self.external_id {
            Some(id) => DedupKey::External(id),
            None => DedupKey::Title(self.title.trim().to_lowercase()),
        }
    }
}

/// A candidate plus its fuzzy match score (lower is better, 0 = perfect)
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub match_score: f64,
    pub is_exact: bool,
}
