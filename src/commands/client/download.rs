use crate::areas::catalog::GalleryCatalog;
use crate::areas::storage::ObjectStore;
use crate::areas::transfer::Transfer;
use crate::artifacts::archive::name_registry::DEFAULT_ENTRY_NAME;
use crate::artifacts::gallery::attachment::{Disposition, image_content_disposition};
use crate::errors::TransferError;
use bytes::Bytes;

/// Content type sent when an image has no recorded MIME type
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A single stored object ready to be sent
#[derive(Debug, Clone)]
pub struct ImageDownload {
    pub file_name: String,
    pub content_type: String,
    pub content: Bytes,
    pub disposition: Disposition,
}

impl ImageDownload {
    pub fn content_disposition(&self) -> String {
        image_content_disposition(self.disposition, &self.file_name)
    }
}

impl<S: ObjectStore, C: GalleryCatalog> Transfer<S, C> {
    /// Fetch the original upload of one image as an attachment
    ///
    /// # Errors
    ///
    /// `ImageNotFound` when the token or image is unknown, `GalleryExpired`
    /// for expired galleries, `ObjectFetchFailed` when storage fails.
    pub async fn download_image(
        &self,
        image_id: u64,
        share_token: &str,
    ) -> Result<ImageDownload, TransferError> {
        let (gallery, image) = self.resolve_image(image_id, share_token).await?;
        let content = self.fetch(&image.original_key).await?;

        tracing::debug!(
            gallery_id = gallery.id,
            image_id = image.id,
            bytes = content.len(),
            "Serving original"
        );

        Ok(ImageDownload {
            file_name: image.desired_name().unwrap_or(DEFAULT_ENTRY_NAME).to_string(),
            content_type: image
                .mime_type
                .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
            content,
            disposition: Disposition::Attachment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::catalog::{CatalogDocument, JsonCatalog};
    use crate::areas::storage::MemoryObjectStore;
    use crate::areas::transfer::TransferOptions;
    use crate::artifacts::gallery::metadata::{Gallery, GalleryImage};
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    fn transfer(expires_at: Option<chrono::DateTime<Utc>>) -> Transfer<MemoryObjectStore, JsonCatalog> {
        let gallery = Gallery {
            id: 7,
            title: "Portraits".to_string(),
            description: None,
            photographer_name: "Ana".to_string(),
            share_token: "tok".to_string(),
            expires_at,
            created_at: Utc::now(),
        };
        let image = |id: u64, filename: &str, mime_type: Option<&str>| GalleryImage {
            id,
            gallery_id: 7,
            filename: filename.to_string(),
            original_key: format!("originals/{id}"),
            thumb_key: None,
            size_bytes: None,
            mime_type: mime_type.map(str::to_string),
            width: None,
            height: None,
            uploaded_at: Utc::now(),
        };
        let document = CatalogDocument {
            galleries: vec![gallery],
            images: vec![
                image(1, "my photo.jpg", Some("image/jpeg")),
                image(2, "", None),
                image(3, "gone.png", Some("image/png")),
            ],
        };
        let store = MemoryObjectStore::new()
            .with_object("originals/1", b"one".to_vec())
            .with_object("originals/2", b"two".to_vec());

        Transfer::new(
            store,
            JsonCatalog::from_document(document).unwrap(),
            TransferOptions::default(),
        )
    }

    #[tokio::test]
    async fn serves_original_as_attachment() {
        let download = transfer(None).download_image(1, "tok").await.unwrap();

        assert_eq!(download.content, Bytes::from_static(b"one"));
        assert_eq!(download.content_type, "image/jpeg");
        assert_eq!(
            download.content_disposition(),
            "attachment; filename=\"my+photo.jpg\""
        );
    }

    #[tokio::test]
    async fn falls_back_to_default_name_and_type() {
        let download = transfer(None).download_image(2, "tok").await.unwrap();

        assert_eq!(download.file_name, "image.jpg");
        assert_eq!(download.content_type, FALLBACK_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn unknown_image_or_token_is_not_found() {
        let transfer = transfer(None);

        assert!(matches!(
            transfer.download_image(99, "tok").await,
            Err(TransferError::ImageNotFound)
        ));
        assert!(matches!(
            transfer.download_image(1, "other").await,
            Err(TransferError::ImageNotFound)
        ));
    }

    #[tokio::test]
    async fn expired_gallery_is_rejected() {
        let transfer = transfer(Some(Utc::now() - Duration::minutes(5)));

        assert!(matches!(
            transfer.download_image(1, "tok").await,
            Err(TransferError::GalleryExpired)
        ));
    }

    #[tokio::test]
    async fn storage_failure_is_internal() {
        let error = transfer(None).download_image(3, "tok").await.unwrap_err();

        assert!(matches!(error, TransferError::ObjectFetchFailed { .. }));
        assert!(error.is_internal());
    }
}
