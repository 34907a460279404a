use std::sync::Arc;

use closet_api::{
    config::Config,
    db::{create_pool, create_redis_client, Cache, PgWardrobeStore},
    routes::{create_router, AppState},
    services::providers::{ColorApiExtractor, EmbeddingApiProvider},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = Cache::new(redis_client).await;

    let state = AppState::new(
        Arc::new(PgWardrobeStore::new(pool)),
        Arc::new(EmbeddingApiProvider::new(
            cache.clone(),
            config.embedding_api_key.clone(),
            config.embedding_api_url.clone(),
        )),
        Arc::new(ColorApiExtractor::new(cache, config.color_api_url.clone())),
    )
    .with_weights(config.scoring_weights())
    .with_max_outfit_attempts(config.max_outfit_attempts);

    let app = create_router(Arc::new(state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache_writer.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
