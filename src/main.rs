//! Products API server: loads settings from env, connects the pool, optionally
//! creates missing tables, serves until shutdown, then closes the pool.

use products_api::{app_router, ensure_tables, serve, AppState, PgProductRepository, ServiceConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("products_api=info,tower_http=info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    let repo = Arc::new(PgProductRepository::connect(&config).await?);
    if config.auto_create_schema {
        ensure_tables(repo.pool()).await?;
    }

    let state = AppState::new(repo.clone());
    let app = app_router(state, &config)?;
    let listener = TcpListener::bind(config.bind_addr).await?;
    serve(listener, app).await?;

    repo.close().await;
    Ok(())
}
