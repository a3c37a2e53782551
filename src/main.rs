//! Quran Search API server

use quran_search::{api, AppConfig, AppState};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Using data directory: {:?}", config.data_dir);

    let state = Arc::new(AppState::new(&config).await?);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Listening on http://{}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
