use bytes::Bytes;

/// One logical file to embed in an archive
///
/// Entries exist only while a single archive is being built. The name is the
/// final, already deduplicated entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    name: String,
    content: Bytes,
}

impl ArchiveEntry {
    /// Create an entry, rejecting empty names
    pub fn try_new(name: impl Into<String>, content: impl Into<Bytes>) -> anyhow::Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(anyhow::anyhow!("Archive entry name must not be empty"));
        }

        Ok(ArchiveEntry {
            name,
            content: content.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}
