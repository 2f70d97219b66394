/// TMDB catalog provider
///
/// Covers the two catalog operations the engine needs:
/// 1. Text search: /search/movie → native result list
/// 2. Id lookup: /find/{imdb_id}?external_source=imdb_id → single movie
use crate::{
    error::{AppError, AppResult},
    models::RemoteMovieRecord,
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbCatalog {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RemoteMovieRecord>,
}

#[derive(Deserialize)]
struct FindResponse {
    #[serde(default)]
    movie_results: Vec<RemoteMovieRecord>,
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbCatalog {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<RemoteMovieRecord>> {
        let url = format!("{}/search/movie", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog search returned status {}: {}",
                status, body
            )));
        }

        let search_response: SearchResponse = response.json().await?;

        tracing::info!(
            query = %query,
            results = search_response.results.len(),
            provider = "tmdb",
            "Catalog search completed"
        );

        Ok(search_response.results)
    }

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<RemoteMovieRecord> {
        let url = format!("{}/find/{}", self.api_url, external_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("external_source", "imdb_id"),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "No catalog entry for {}",
                external_id
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog lookup returned status {}: {}",
                status, body
            )));
        }

        let find_response: FindResponse = response.json().await?;

        find_response
            .movie_results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No catalog entry for {}", external_id)))
    }
}
