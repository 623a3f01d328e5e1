#![forbid(unsafe_code)]

use std::sync::Arc;

use clap::Parser;
use stockroom::{build_router, InventoryStore, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    tokio::fs::create_dir_all(&config.cache).await?;
    let cache_dir = tokio::fs::canonicalize(&config.cache).await?;

    let store = Arc::new(InventoryStore::new(&cache_dir));
    let app = build_router(store);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        host = %config.host,
        port = config.port,
        cache = %cache_dir.display(),
        "inventory server listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
