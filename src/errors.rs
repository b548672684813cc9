use thiserror::Error;

/// Failures of the client-facing transfer operations
///
/// `GalleryNotFound`, `GalleryExpired`, `EmptyGallery` and `ImageNotFound` are
/// detected before any object is fetched. The remaining variants carry the
/// internal cause, which is logged but never shown to clients.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Gallery not found")]
    GalleryNotFound,

    #[error("This gallery link has expired")]
    GalleryExpired,

    #[error("No images in this gallery")]
    EmptyGallery,

    #[error("Image not found")]
    ImageNotFound,

    #[error("Unable to fetch object {key}")]
    ObjectFetchFailed {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Unable to build archive")]
    ArchiveBuildFailed(#[source] anyhow::Error),

    #[error("Gallery catalog unavailable")]
    CatalogUnavailable(#[source] anyhow::Error),

    #[error("Unable to build response")]
    ResponseFailed(#[source] anyhow::Error),
}

impl TransferError {
    /// Whether the failure originates on the server side rather than in the request
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            TransferError::ObjectFetchFailed { .. }
                | TransferError::ArchiveBuildFailed(_)
                | TransferError::CatalogUnavailable(_)
                | TransferError::ResponseFailed(_)
        )
    }
}
