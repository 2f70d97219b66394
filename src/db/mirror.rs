use crate::{error::AppResult, models::MirrorMovieRow};
use sqlx::PgPool;

/// Cap on mirror rows per query; bounds worst-case payload, not relevance
const MIRROR_ROW_LIMIT: i64 = 50;

/// Local movie mirror abstraction
///
/// The mirror is a best-effort copy of catalog data kept in Postgres. Search
/// needs only one operation from it, so it sits behind a trait and tests can
/// substitute an in-memory stub.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MirrorStore: Send + Sync {
    /// Case-insensitive substring match against the mirror's title column
    async fn search_titles(&self, text: &str) -> AppResult<Vec<MirrorMovieRow>>;
}

/// Postgres-backed mirror store
#[derive(Clone)]
pub struct PgMirrorStore {
    pool: PgPool,
}

impl PgMirrorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MirrorStore for PgMirrorStore {
    async fn search_titles(&self, text: &str) -> AppResult<Vec<MirrorMovieRow>> {
        let pattern = format!("%{}%", text);

        let rows = sqlx::query_as::<_, MirrorMovieRow>(
            r#"
            SELECT id, tmdb_id, title, overview, release_date,
                   poster_url, backdrop_url, runtime, imdb_rating
            FROM movies
            WHERE title ILIKE $1
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(MIRROR_ROW_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(query = %text, rows = rows.len(), "Mirror title search completed");

        Ok(rows)
    }
}
