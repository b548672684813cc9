//! Gallery catalog
//!
//! Resolves share tokens to galleries and lists a gallery's images in upload
//! order. The catalog is read-only from the transfer service's point of view.
//!
//! ## JSON document
//!
//! ```json
//! {
//!   "galleries": [{ "id": 1, "title": "...", "share_token": "...", ... }],
//!   "images": [{ "id": 10, "gallery_id": 1, "original_key": "...", ... }]
//! }
//! ```

use crate::artifacts::gallery::metadata::{Gallery, GalleryImage};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

/// Read access to gallery and image metadata
pub trait GalleryCatalog: Send + Sync + 'static {
    /// Look up the gallery shared under `share_token`
    fn gallery_by_token(
        &self,
        share_token: &str,
    ) -> impl Future<Output = anyhow::Result<Option<Gallery>>> + Send;

    /// List a gallery's images, oldest upload first
    fn images(
        &self,
        gallery_id: u64,
    ) -> impl Future<Output = anyhow::Result<Vec<GalleryImage>>> + Send;
}

/// Serialized form of a catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub galleries: Vec<Gallery>,
    #[serde(default)]
    pub images: Vec<GalleryImage>,
}

/// Catalog loaded once from a JSON document and served from memory
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    /// Galleries keyed by share token
    galleries: HashMap<String, Gallery>,
    /// Images keyed by gallery id, in upload order
    images: HashMap<u64, Vec<GalleryImage>>,
}

impl JsonCatalog {
    /// Index a catalog document
    ///
    /// Fails if two galleries share a token.
    pub fn from_document(document: CatalogDocument) -> anyhow::Result<Self> {
        let mut galleries = HashMap::with_capacity(document.galleries.len());
        for gallery in document.galleries {
            if let Some(existing) = galleries.insert(gallery.share_token.clone(), gallery) {
                return Err(anyhow::anyhow!(
                    "Duplicate share token for gallery {}",
                    existing.id
                ));
            }
        }

        let mut images: HashMap<u64, Vec<GalleryImage>> = HashMap::new();
        for image in document.images {
            images.entry(image.gallery_id).or_default().push(image);
        }
        for gallery_images in images.values_mut() {
            gallery_images.sort_by(|a, b| {
                a.uploaded_at
                    .cmp(&b.uploaded_at)
                    .then_with(|| a.id.cmp(&b.id))
            });
        }

        Ok(JsonCatalog { galleries, images })
    }

    /// Load a catalog document from disk
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("Unable to read catalog {}", path.display()))?;
        let document: CatalogDocument = serde_json::from_slice(&raw)
            .with_context(|| format!("Unable to parse catalog {}", path.display()))?;

        Self::from_document(document)
    }

    pub fn gallery_count(&self) -> usize {
        self.galleries.len()
    }
}

impl GalleryCatalog for JsonCatalog {
    async fn gallery_by_token(&self, share_token: &str) -> anyhow::Result<Option<Gallery>> {
        Ok(self.galleries.get(share_token).cloned())
    }

    async fn images(&self, gallery_id: u64) -> anyhow::Result<Vec<GalleryImage>> {
        Ok(self.images.get(&gallery_id).cloned().unwrap_or_default())
    }
}
