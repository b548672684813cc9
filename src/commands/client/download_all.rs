use crate::areas::catalog::GalleryCatalog;
use crate::areas::storage::ObjectStore;
use crate::areas::transfer::Transfer;
use crate::artifacts::archive::archive_entry::ArchiveEntry;
use crate::artifacts::archive::assembler::ArchiveAssembler;
use crate::artifacts::archive::name_registry::NameRegistry;
use crate::artifacts::gallery::attachment::{archive_content_disposition, archive_file_name};
use crate::artifacts::gallery::metadata::GalleryImage;
use crate::errors::TransferError;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt, stream};

/// A finished gallery archive, ready to be sent
#[derive(Debug, Clone)]
pub struct ArchiveDownload {
    /// Sanitized archive file name, including the `.zip` extension
    pub file_name: String,
    pub content: Bytes,
}

impl ArchiveDownload {
    pub fn content_disposition(&self) -> String {
        archive_content_disposition(&self.file_name)
    }
}

impl<S: ObjectStore, C: GalleryCatalog> Transfer<S, C> {
    /// Build the archive of every original in the gallery shared under `share_token`
    ///
    /// The whole archive is assembled in memory before anything is returned,
    /// so a failed fetch can never produce a truncated download. Objects are
    /// fetched concurrently but appended in catalog order.
    ///
    /// # Errors
    ///
    /// - `GalleryNotFound` / `GalleryExpired` for a bad token
    /// - `EmptyGallery` when the gallery has no images
    /// - `ArchiveBuildFailed` when any fetch or the assembly fails
    pub async fn download_all(&self, share_token: &str) -> Result<ArchiveDownload, TransferError> {
        let gallery = self.resolve_gallery(share_token).await?;
        let images = self.gallery_images(&gallery).await?;

        if images.is_empty() {
            return Err(TransferError::EmptyGallery);
        }

        let contents = match self.fetch_originals(&images).await {
            Ok(contents) => contents,
            Err(TransferError::ObjectFetchFailed { key, source }) => {
                tracing::error!(
                    gallery_id = gallery.id,
                    key = %key,
                    error = %format!("{source:#}"),
                    "Object fetch failed, abandoning archive"
                );
                return Err(TransferError::ArchiveBuildFailed(
                    source.context(format!("Unable to fetch object {key}")),
                ));
            }
            Err(error) => return Err(error),
        };

        let content = assemble_archive(&images, contents).map_err(|error| {
            tracing::error!(
                gallery_id = gallery.id,
                error = %format!("{error:#}"),
                "Archive assembly failed"
            );
            TransferError::ArchiveBuildFailed(error)
        })?;
        let file_name = archive_file_name(&gallery.title);

        tracing::info!(
            gallery_id = gallery.id,
            entries = images.len(),
            bytes = content.len(),
            file_name = %file_name,
            "Gallery archive assembled"
        );

        Ok(ArchiveDownload { file_name, content })
    }

    /// Fetch every original, preserving image order
    ///
    /// Stops at the first failure; fetches still in flight are dropped.
    async fn fetch_originals(&self, images: &[GalleryImage]) -> Result<Vec<Bytes>, TransferError> {
        let concurrency = self.options().fetch_concurrency.max(1);

        // futures are inert until the stream polls them
        let fetches = images
            .iter()
            .map(|image| self.fetch(&image.original_key))
            .collect::<Vec<_>>();

        stream::iter(fetches)
            .buffered(concurrency)
            .try_collect()
            .await
    }
}

/// Deduplicate names and assemble the archive, in image order
///
/// Fetched contents and the archive body coexist until this returns, so peak
/// memory is roughly twice the gallery size.
pub fn assemble_archive(images: &[GalleryImage], contents: Vec<Bytes>) -> anyhow::Result<Bytes> {
    let capacity = contents.iter().map(Bytes::len).sum();
    let mut registry = NameRegistry::new();
    let mut assembler = ArchiveAssembler::with_capacity(capacity);

    for (image, content) in images.iter().zip(contents) {
        let name = registry.resolve(image.desired_name());
        assembler.append(&ArchiveEntry::try_new(name, content)?)?;
    }

    assembler.finalize()
}
