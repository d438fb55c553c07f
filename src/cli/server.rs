//! HTTP server mode

use crate::api;
use crate::config::{SeedData, ServerConfig};
use crate::database::DatabaseEngine;
use crate::error::{Result, ResultExt};
use std::sync::Arc;

/// Open the store, load the optional seed file and serve the API
pub async fn serve(config: ServerConfig) -> Result<()> {
    let db = DatabaseEngine::open(&config.database)?;

    if let Some(path) = &config.seed {
        let seed = SeedData::load(path)?;
        db.load_seed(&seed)?;
    }

    let app = api::router(Arc::new(db));

    let addr = config.addr();
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
