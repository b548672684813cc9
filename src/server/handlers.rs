use crate::areas::catalog::GalleryCatalog;
use crate::areas::storage::ObjectStore;
use crate::areas::transfer::Transfer;
use crate::commands::client::download::ImageDownload;
use crate::commands::client::download_all::ArchiveDownload;
use crate::commands::client::gallery_view::GalleryView;
use crate::errors::TransferError;
use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};
use std::sync::Arc;

type SharedTransfer<S, C> = State<Arc<Transfer<S, C>>>;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn gallery<S: ObjectStore, C: GalleryCatalog>(
    State(transfer): SharedTransfer<S, C>,
    Path(share_token): Path<String>,
) -> Result<Json<GalleryView>, TransferError> {
    Ok(Json(transfer.gallery_view(&share_token).await?))
}

pub async fn download<S: ObjectStore, C: GalleryCatalog>(
    State(transfer): SharedTransfer<S, C>,
    Path((image_id, share_token)): Path<(String, String)>,
) -> Result<ImageDownload, TransferError> {
    transfer
        .download_image(parse_image_id(&image_id)?, &share_token)
        .await
}

pub async fn thumbnail<S: ObjectStore, C: GalleryCatalog>(
    State(transfer): SharedTransfer<S, C>,
    Path((image_id, share_token)): Path<(String, String)>,
) -> Result<ImageDownload, TransferError> {
    transfer
        .thumbnail(parse_image_id(&image_id)?, &share_token)
        .await
}

pub async fn download_all<S: ObjectStore, C: GalleryCatalog>(
    State(transfer): SharedTransfer<S, C>,
    Path(share_token): Path<String>,
) -> Result<ArchiveDownload, TransferError> {
    transfer.download_all(&share_token).await
}

/// Image ids that are not numbers cannot name any image
fn parse_image_id(raw: &str) -> Result<u64, TransferError> {
    raw.parse().map_err(|_| TransferError::ImageNotFound)
}
