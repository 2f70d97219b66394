use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use cinematch_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, PgMirrorStore},
    services::{
        images::ImageUrlMapper,
        providers::{TmdbCatalog, VideoPlatform, YoutubeClient},
        search::{rank::RankingOptions, SearchEngine},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    let http_client = reqwest::Client::new();

    let catalog = Arc::new(TmdbCatalog::new(
        http_client.clone(),
        config.catalog_api_key.clone(),
        config.catalog_api_url.clone(),
    ));
    let mirror = Arc::new(PgMirrorStore::new(pool));
    let images = ImageUrlMapper::new(&config.image_base_url);

    let engine = Arc::new(SearchEngine::new(
        catalog,
        mirror,
        images.clone(),
        RankingOptions {
            score_cutoff: config.fuzzy_score_cutoff,
            near_tie_band: config.fuzzy_near_tie_band,
        },
        Duration::from_secs(config.fetch_timeout_secs),
    ));

    let platform: Arc<dyn VideoPlatform> = Arc::new(YoutubeClient::new(
        http_client,
        config.platform_api_key.clone(),
        config.platform_api_url.clone(),
    ));

    let state = AppState::new(engine, platform, images);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
