use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, QueryKind, VideoMetadata},
    services::{images::ImageUrlMapper, search::classify},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    /// Explicit lookup type; `youtube` forces platform-URL classification
    #[serde(rename = "type")]
    pub lookup_type: Option<String>,
}

/// A candidate as returned to the client: provenance stripped, image path
/// references resolved to absolute URLs.
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub external_id: Option<i64>,
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub runtime_minutes: Option<i64>,
    pub genre_ids: Vec<i64>,
    pub rating_score: f64,
}

impl CandidateResponse {
    fn from_candidate(candidate: Candidate, images: &ImageUrlMapper) -> Self {
        Self {
            external_id: candidate.external_id,
            title: candidate.title,
            overview: candidate.overview,
            release_date: candidate.release_date,
            poster_url: candidate.poster_ref.as_deref().map(|p| images.url_for(p)),
            backdrop_url: candidate.backdrop_ref.as_deref().map(|p| images.url_for(p)),
            runtime_minutes: candidate.runtime_minutes,
            genre_ids: candidate.genre_ids,
            rating_score: candidate.rating_score,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResponse {
    Movie { results: Vec<CandidateResponse> },
    Youtube { data: VideoMetadata },
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Title search endpoint
///
/// Free-text queries run the full ranking pipeline; content-site permalinks
/// and video-platform URLs resolve through a single lookup.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let raw = params.q.as_deref().unwrap_or("");
    if raw.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Missing query parameter".to_string(),
        ));
    }

    let force_platform = params.lookup_type.as_deref() == Some("youtube");
    let query = classify::classify(raw, force_platform)?;

    match query.kind {
        QueryKind::DirectId(id) => {
            let candidate = state.engine.lookup_direct(&id).await?;
            Ok(Json(SearchResponse::Movie {
                results: vec![CandidateResponse::from_candidate(candidate, &state.images)],
            }))
        }
        QueryKind::PlatformUrl(id) => {
            let data = state.platform.metadata(&id).await?;
            Ok(Json(SearchResponse::Youtube { data }))
        }
        QueryKind::Text(text) => {
            let results = state
                .engine
                .search_text(&text)
                .await?
                .into_iter()
                .map(|c| CandidateResponse::from_candidate(c, &state.images))
                .collect();
            Ok(Json(SearchResponse::Movie { results }))
        }
    }
}
