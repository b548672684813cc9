use crate::areas::catalog::GalleryCatalog;
use crate::areas::storage::ObjectStore;
use crate::areas::transfer::Transfer;
use crate::artifacts::archive::name_registry::DEFAULT_ENTRY_NAME;
use crate::artifacts::gallery::attachment::Disposition;
use crate::commands::client::download::{FALLBACK_CONTENT_TYPE, ImageDownload};
use crate::errors::TransferError;

/// Thumbnails are always generated as JPEG
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

impl<S: ObjectStore, C: GalleryCatalog> Transfer<S, C> {
    /// Fetch an image preview for inline display
    ///
    /// Serves the generated thumbnail when one exists, otherwise the original.
    pub async fn thumbnail(
        &self,
        image_id: u64,
        share_token: &str,
    ) -> Result<ImageDownload, TransferError> {
        let (_, image) = self.resolve_image(image_id, share_token).await?;
        let file_name = image.desired_name().unwrap_or(DEFAULT_ENTRY_NAME).to_string();

        let (key, content_type) = match &image.thumb_key {
            Some(thumb_key) => (thumb_key.as_str(), THUMBNAIL_CONTENT_TYPE.to_string()),
            None => (
                image.original_key.as_str(),
                image
                    .mime_type
                    .clone()
                    .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
            ),
        };
        let content = self.fetch(key).await?;

        Ok(ImageDownload {
            file_name,
            content_type,
            content,
            disposition: Disposition::Inline,
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
    use bytes::Bytes;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn transfer() -> Transfer<MemoryObjectStore, JsonCatalog> {
        let gallery = Gallery {
            id: 1,
            title: "Portraits".to_string(),
            description: None,
            photographer_name: "Ana".to_string(),
            share_token: "tok".to_string(),
            expires_at: None,
            created_at: Utc::now(),
        };
        let image = |id: u64, thumb_key: Option<&str>| GalleryImage {
            id,
            gallery_id: 1,
            filename: format!("{id}.png"),
            original_key: format!("originals/{id}"),
            thumb_key: thumb_key.map(str::to_string),
            size_bytes: None,
            mime_type: Some("image/png".to_string()),
            width: None,
            height: None,
            uploaded_at: Utc::now(),
        };
        let document = CatalogDocument {
            galleries: vec![gallery],
            images: vec![image(1, Some("thumbs/1")), image(2, None)],
        };
        let store = MemoryObjectStore::new()
            .with_object("originals/1", b"big one".to_vec())
            .with_object("thumbs/1", b"small one".to_vec())
            .with_object("originals/2", b"big two".to_vec());

        Transfer::new(
            store,
            JsonCatalog::from_document(document).unwrap(),
            TransferOptions::default(),
        )
    }

    #[rstest]
    #[case::generated_thumbnail(1, "small one", "image/jpeg")]
    #[case::original_fallback(2, "big two", "image/png")]
    #[tokio::test]
    async fn serves_inline_preview(
        #[case] image_id: u64,
        #[case] expected: &str,
        #[case] content_type: &str,
    ) {
        let preview = transfer().thumbnail(image_id, "tok").await.unwrap();

        assert_eq!(preview.content, Bytes::copy_from_slice(expected.as_bytes()));
        assert_eq!(preview.content_type, content_type);
        assert_eq!(preview.disposition, Disposition::Inline);
        assert!(preview.content_disposition().starts_with("inline; "));
    }
}
