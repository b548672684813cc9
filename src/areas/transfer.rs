//! Transfer service
//!
//! Owns the object store and gallery catalog and exposes the client-facing
//! operations (see `crate::commands::client`). Every operation is addressed by
//! a share token and checks that the gallery exists and has not expired
//! before touching storage.

use crate::areas::catalog::GalleryCatalog;
use crate::areas::storage::ObjectStore;
use crate::artifacts::gallery::metadata::{Gallery, GalleryImage};
use crate::errors::TransferError;
use bytes::Bytes;
use chrono::Utc;
use derive_new::new;

/// Default number of storage fetches in flight per archive build
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Copy, new)]
pub struct TransferOptions {
    /// Maximum storage fetches in flight for one archive build
    pub fetch_concurrency: usize,
}

impl Default for TransferOptions {
    fn default() -> Self {
        TransferOptions {
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}

pub struct Transfer<S, C> {
    store: S,
    catalog: C,
    options: TransferOptions,
}

impl<S: ObjectStore, C: GalleryCatalog> Transfer<S, C> {
    pub fn new(store: S, catalog: C, options: TransferOptions) -> Self {
        Transfer {
            store,
            catalog,
            options,
        }
    }

    pub fn options(&self) -> &TransferOptions {
        &self.options
    }

    /// Resolve a share token to a live gallery
    ///
    /// # Errors
    ///
    /// `GalleryNotFound` for unknown tokens, `GalleryExpired` once the expiry
    /// time has passed.
    pub(crate) async fn resolve_gallery(&self, share_token: &str) -> Result<Gallery, TransferError> {
        let gallery = self
            .catalog
            .gallery_by_token(share_token)
            .await
            .map_err(TransferError::CatalogUnavailable)?
            .ok_or(TransferError::GalleryNotFound)?;

        if gallery.is_expired_at(Utc::now()) {
            return Err(TransferError::GalleryExpired);
        }

        Ok(gallery)
    }

    pub(crate) async fn gallery_images(
        &self,
        gallery: &Gallery,
    ) -> Result<Vec<GalleryImage>, TransferError> {
        self.catalog
            .images(gallery.id)
            .await
            .map_err(TransferError::CatalogUnavailable)
    }

    /// Resolve one image of the gallery shared under `share_token`
    ///
    /// An unknown token or an image outside the gallery is reported as
    /// `ImageNotFound`; an expired gallery as `GalleryExpired`.
    pub(crate) async fn resolve_image(
        &self,
        image_id: u64,
        share_token: &str,
    ) -> Result<(Gallery, GalleryImage), TransferError> {
        let gallery = self
            .catalog
            .gallery_by_token(share_token)
            .await
            .map_err(TransferError::CatalogUnavailable)?
            .ok_or(TransferError::ImageNotFound)?;

        let image = self
            .gallery_images(&gallery)
            .await?
            .into_iter()
            .find(|image| image.id == image_id)
            .ok_or(TransferError::ImageNotFound)?;

        if gallery.is_expired_at(Utc::now()) {
            return Err(TransferError::GalleryExpired);
        }

        Ok((gallery, image))
    }

    pub(crate) async fn fetch(&self, key: &str) -> Result<Bytes, TransferError> {
        self.store
            .fetch_object(key)
            .await
            .map_err(|source| TransferError::ObjectFetchFailed {
                key: key.to_string(),
                source,
            })
    }
}
