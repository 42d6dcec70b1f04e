use std::env;

use anyhow::Result;
use yatra_api::{build_app, AppConfig};
use yatra_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("yatra_api");

    let config = AppConfig::from_env();
    let bind = env::var("YATRA_BIND").unwrap_or_else(|_| "0.0.0.0:8001".to_string());

    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, "yatra guide api started");

    axum::serve(listener, app).await?;
    Ok(())
}
