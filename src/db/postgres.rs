use sqlx::{postgres::PgPoolOptions, PgPool};

/// Connects a pool to the local movie mirror.
///
/// One pool serves the whole process; mirror lookups borrow connections per
/// request. The size cap comes from configuration so deployments can match
/// it to their Postgres limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}
