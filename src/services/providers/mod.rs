/// External data provider abstractions
///
/// The search engine talks to two remote collaborators: the content catalog
/// (text search plus id lookup) and the video platform (metadata lookup).
/// Both sit behind traits so the pipeline can be exercised against mocks.
use crate::{
    error::AppResult,
    models::{RemoteMovieRecord, VideoMetadata},
};

pub mod tmdb;
pub mod youtube;

pub use tmdb::TmdbCatalog;
pub use youtube::YoutubeClient;

/// Remote content catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Free-text movie search; returns the catalog's native result list
    async fn search_movies(&self, query: &str) -> AppResult<Vec<RemoteMovieRecord>>;

    /// Lookup by a `tt`-prefixed external identifier
    ///
    /// Returns `AppError::NotFound` when the identifier does not resolve.
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<RemoteMovieRecord>;
}

/// Video platform metadata lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Fetch metadata for a single video id
    ///
    /// Returns `AppError::NotFound` when the id does not resolve.
    async fn metadata(&self, video_id: &str) -> AppResult<VideoMetadata>;
}
