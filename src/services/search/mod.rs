//! The title search and ranking pipeline.
//!
//! Data flows strictly forward: classify → fetch → normalize → dedupe →
//! exact-match detect → fuzzy rank → compose. Direct-id and platform-URL
//! queries bypass the pipeline and resolve through a single lookup.

pub mod classify;
pub mod compose;
pub mod dedupe;
pub mod normalize;
pub mod rank;

use crate::{
    db::MirrorStore,
    error::{AppError, AppResult},
    models::{Candidate, MirrorMovieRow, RemoteMovieRecord},
    services::{images::ImageUrlMapper, providers::CatalogProvider},
};
use rank::RankingOptions;
use std::{sync::Arc, time::Duration};

/// The search engine: a stateless, per-request pure function over its two
/// sources. All candidate data is request-local and discarded on response.
pub struct SearchEngine {
    catalog: Arc<dyn CatalogProvider>,
    mirror: Arc<dyn MirrorStore>,
    images: ImageUrlMapper,
    options: RankingOptions,
    fetch_timeout: Duration,
}

impl SearchEngine {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        mirror: Arc<dyn MirrorStore>,
        images: ImageUrlMapper,
        options: RankingOptions,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            mirror,
            images,
            options,
            fetch_timeout,
        }
    }

    /// Runs the full pipeline for a free-text title query.
    pub async fn search_text(&self, text: &str) -> AppResult<Vec<Candidate>> {
        let (remote_records, mirror_rows) = self.fetch_sources(text).await;

        let mut candidates: Vec<Candidate> = Vec::new();
        candidates.extend(
            remote_records
                .iter()
                .cloned()
                .filter_map(normalize::from_remote),
        );
        candidates.extend(
            mirror_rows
                .into_iter()
                .filter_map(|row| normalize::from_mirror(row, &self.images)),
        );

        let deduped = dedupe::dedupe(candidates);
        let exact = rank::find_exact_matches(&deduped, text);
        let ranked = rank::rank(&deduped, text, &self.options);
        let results = compose::compose(&exact, &ranked, &remote_records, &deduped);

        tracing::info!(
            query = %text,
            remote = remote_records.len(),
            deduped = deduped.len(),
            exact = exact.len(),
            ranked = ranked.len(),
            results = results.len(),
            "Title search completed"
        );

        Ok(results)
    }

    /// Resolves a `tt`-prefixed direct reference via a single catalog lookup.
    pub async fn lookup_direct(&self, external_id: &str) -> AppResult<Candidate> {
        let record = self.catalog.find_by_external_id(external_id).await?;
        normalize::from_remote(record)
            .ok_or_else(|| AppError::NotFound(format!("No usable entry for {}", external_id)))
    }

    /// Two-way fan-out/fan-in over the catalog and the mirror.
    ///
    /// Each arm is fail-soft: on error or timeout it contributes an empty
    /// set, so one source going down never aborts the other. Both arms
    /// complete before the pipeline proceeds.
    async fn fetch_sources(&self, text: &str) -> (Vec<RemoteMovieRecord>, Vec<MirrorMovieRow>) {
        let remote = async {
            match tokio::time::timeout(self.fetch_timeout, self.catalog.search_movies(text)).await {
                Ok(Ok(records)) => records,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, source = "remote", "Source fetch failed");
                    Vec::new()
                }
                Err(_) => {
                    tracing::warn!(source = "remote", "Source fetch timed out");
                    Vec::new()
                }
            }
        };

        let local = async {
            match tokio::time::timeout(self.fetch_timeout, self.mirror.search_titles(text)).await {
                Ok(Ok(rows)) => rows,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, source = "local", "Source fetch failed");
                    Vec::new()
                }
                Err(_) => {
                    tracing::warn!(source = "local", "Source fetch timed out");
                    Vec::new()
                }
            }
        };

        tokio::join!(remote, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mirror::MockMirrorStore;
    use crate::models::Provenance;
    use crate::services::providers::MockCatalogProvider;

    fn remote_record(id: i64, title: &str) -> RemoteMovieRecord {
        RemoteMovieRecord {
            id,
            title: title.to_string(),
            overview: Some("A thief who steals corporate secrets".to_string()),
            release_date: Some("2010-07-16".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
            runtime: None,
            genre_ids: vec![28, 878],
            vote_average: Some(8.4),
        }
    }

    fn mirror_row(tmdb_id: Option<i64>, title: &str) -> MirrorMovieRow {
        MirrorMovieRow {
            id: 7,
            tmdb_id,
            title: Some(title.to_string()),
            overview: Some("Mirror overview".to_string()),
            release_date: None,
            poster_url: None,
            backdrop_url: None,
            runtime: Some(148),
            imdb_rating: Some(8.8),
        }
    }

    fn engine(catalog: MockCatalogProvider, mirror: MockMirrorStore) -> SearchEngine {
        SearchEngine::new(
            Arc::new(catalog),
            Arc::new(mirror),
            ImageUrlMapper::new("https://image.tmdb.org/t/p/w500"),
            RankingOptions::default(),
            Duration::from_secs(6),
        )
    }

    #[tokio::test]
    async fn test_exact_remote_match_is_first() {
        // Scenario A
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_movies()
            .returning(|_| Ok(vec![remote_record(27205, "Inception")]));
        let mut mirror = MockMirrorStore::new();
        mirror.expect_search_titles().returning(|_| Ok(Vec::new()));

        let results = engine(catalog, mirror).search_text("Inception").await.unwrap();
        assert_eq!(results[0].title, "Inception");
        assert_eq!(results[0].external_id, Some(27205));
    }

    #[tokio::test]
    async fn test_typo_query_still_finds_title() {
        // Scenario B
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_movies()
            .returning(|_| Ok(vec![remote_record(27205, "Inception")]));
        let mut mirror = MockMirrorStore::new();
        mirror.expect_search_titles().returning(|_| Ok(Vec::new()));

        let results = engine(catalog, mirror).search_text("incepton").await.unwrap();
        assert!(results.iter().any(|c| c.title == "Inception"));
    }

    #[tokio::test]
    async fn test_shared_id_collapses_to_remote_entry() {
        // Scenario C: same title in mirror and catalog with matching tmdb_id
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_movies()
            .returning(|_| Ok(vec![remote_record(27205, "Inception")]));
        let mut mirror = MockMirrorStore::new();
        mirror
            .expect_search_titles()
            .returning(|_| Ok(vec![mirror_row(Some(27205), "Inception")]));

        let results = engine(catalog, mirror).search_text("Inception").await.unwrap();
        let matching: Vec<_> = results.iter().filter(|c| c.title == "Inception").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].provenance, Provenance::Remote);
        assert_eq!(matching[0].poster_ref, Some("/poster.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_mirror() {
        // Scenario E
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_movies()
            .returning(|_| Err(AppError::ExternalApi("catalog down".to_string())));
        let mut mirror = MockMirrorStore::new();
        mirror
            .expect_search_titles()
            .returning(|_| Ok(vec![mirror_row(None, "Inception")]));

        let results = engine(catalog, mirror).search_text("Inception").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Inception");
        assert_eq!(results[0].provenance, Provenance::Local);
    }

    #[tokio::test]
    async fn test_both_sources_down_yields_empty_success() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_search_movies()
            .returning(|_| Err(AppError::ExternalApi("catalog down".to_string())));
        let mut mirror = MockMirrorStore::new();
        mirror
            .expect_search_titles()
            .returning(|_| Err(AppError::Internal("mirror down".to_string())));

        let results = engine(catalog, mirror).search_text("Inception").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_direct_not_found_propagates() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_find_by_external_id()
            .returning(|id| Err(AppError::NotFound(format!("No catalog entry for {}", id))));
        let mirror = MockMirrorStore::new();

        let result = engine(catalog, mirror).lookup_direct("tt0000000").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
