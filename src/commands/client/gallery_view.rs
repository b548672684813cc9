use crate::areas::catalog::GalleryCatalog;
use crate::areas::storage::ObjectStore;
use crate::areas::transfer::Transfer;
use crate::artifacts::gallery::metadata::{Gallery, GalleryImage};
use crate::errors::TransferError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public view of a shared gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub photographer_name: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub image_count: usize,
    pub images: Vec<ImageView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub id: u64,
    pub filename: String,
    pub size_bytes: Option<u64>,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub uploaded_at: DateTime<Utc>,
    pub thumb_url: String,
    pub download_url: String,
}

impl ImageView {
    fn new(image: GalleryImage, share_token: &str) -> Self {
        ImageView {
            thumb_url: format!("/api/client/thumbnail/{}/{share_token}", image.id),
            download_url: format!("/api/client/download/{}/{share_token}", image.id),
            id: image.id,
            filename: image.filename,
            size_bytes: image.size_bytes,
            mime_type: image.mime_type,
            width: image.width,
            height: image.height,
            uploaded_at: image.uploaded_at,
        }
    }
}

impl GalleryView {
    fn new(gallery: Gallery, images: Vec<GalleryImage>) -> Self {
        let images = images
            .into_iter()
            .map(|image| ImageView::new(image, &gallery.share_token))
            .collect::<Vec<_>>();

        GalleryView {
            id: gallery.id,
            title: gallery.title,
            description: gallery.description,
            photographer_name: gallery.photographer_name,
            expires_at: gallery.expires_at,
            created_at: gallery.created_at,
            image_count: images.len(),
            images,
        }
    }
}

impl<S: ObjectStore, C: GalleryCatalog> Transfer<S, C> {
    /// Describe the gallery shared under `share_token` and its images
    pub async fn gallery_view(&self, share_token: &str) -> Result<GalleryView, TransferError> {
        let gallery = self.resolve_gallery(share_token).await?;
        let images = self.gallery_images(&gallery).await?;

        Ok(GalleryView::new(gallery, images))
    }
}
