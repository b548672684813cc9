use crate::commands::client::download::ImageDownload;
use crate::commands::client::download_all::ArchiveDownload;
use crate::errors::TransferError;
use axum::Json;
use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::json;

/// Message shown to clients for every server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Server error";

pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

impl TransferError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TransferError::GalleryNotFound
            | TransferError::EmptyGallery
            | TransferError::ImageNotFound => StatusCode::NOT_FOUND,
            TransferError::GalleryExpired => StatusCode::GONE,
            TransferError::ObjectFetchFailed { .. }
            | TransferError::ArchiveBuildFailed(_)
            | TransferError::CatalogUnavailable(_)
            | TransferError::ResponseFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TransferError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // internal causes are logged, never sent
        let message = if self.is_internal() {
            tracing::error!(error = ?self, "Request failed");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            tracing::debug!(status = status.as_u16(), "{self}");
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl IntoResponse for ArchiveDownload {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        binary_response(ARCHIVE_CONTENT_TYPE, &disposition, self.content).into_response()
    }
}

impl IntoResponse for ImageDownload {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        binary_response(&self.content_type, &disposition, self.content).into_response()
    }
}

/// Complete body with its type, disposition and exact length
fn binary_response(
    content_type: &str,
    disposition: &str,
    content: Bytes,
) -> Result<Response, TransferError> {
    let headers = [
        (CONTENT_TYPE, header_value(content_type)?),
        (CONTENT_DISPOSITION, header_value(disposition)?),
        (CONTENT_LENGTH, HeaderValue::from(content.len())),
    ];

    Ok((StatusCode::OK, headers, Body::from(content)).into_response())
}

fn header_value(value: &str) -> Result<HeaderValue, TransferError> {
    HeaderValue::from_str(value).map_err(|e| {
        TransferError::ResponseFailed(anyhow::anyhow!("Invalid header value {value:?}: {e}"))
    })
}
