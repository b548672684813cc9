//! HTTP surface
//!
//! ## Routes
//!
//! | method | path                                          | response                     |
//! |--------|-----------------------------------------------|------------------------------|
//! | GET    | `/health`                                     | `{"status":"ok"}`            |
//! | GET    | `/api/client/gallery/{share_token}`           | gallery view as JSON         |
//! | GET    | `/api/client/download/{image_id}/{share_token}`  | original, as attachment   |
//! | GET    | `/api/client/thumbnail/{image_id}/{share_token}` | preview, inline           |
//! | GET    | `/api/client/download-all/{share_token}`      | `application/zip` attachment |
//!
//! Failures are answered with `{"error": "<message>"}` and the status of the
//! corresponding `TransferError`.

pub mod handlers;
pub mod response;

use crate::areas::catalog::{GalleryCatalog, JsonCatalog};
use crate::areas::storage::{FsObjectStore, ObjectStore};
use crate::areas::transfer::Transfer;
use crate::config::ServerConfig;
use anyhow::Context;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Build the router serving `transfer`
pub fn router<S: ObjectStore, C: GalleryCatalog>(transfer: Arc<Transfer<S, C>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/client/gallery/{share_token}",
            get(handlers::gallery::<S, C>),
        )
        .route(
            "/api/client/download/{image_id}/{share_token}",
            get(handlers::download::<S, C>),
        )
        .route(
            "/api/client/thumbnail/{image_id}/{share_token}",
            get(handlers::thumbnail::<S, C>),
        )
        .route(
            "/api/client/download-all/{share_token}",
            get(handlers::download_all::<S, C>),
        )
        .with_state(transfer)
}

/// Load the catalog, bind and serve until interrupted
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let catalog = JsonCatalog::load(&config.catalog).await?;
    let store = FsObjectStore::new(config.storage_root.clone().into_boxed_path());
    tracing::info!(
        galleries = catalog.gallery_count(),
        storage_root = %store.root().display(),
        fetch_concurrency = config.fetch_concurrency,
        "Catalog loaded"
    );

    let transfer = Arc::new(Transfer::new(store, catalog, config.transfer_options()));
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Unable to bind {}:{}", config.host, config.port))?;
    tracing::info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, router(transfer))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
