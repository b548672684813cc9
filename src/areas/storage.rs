//! Object storage
//!
//! Originals and thumbnails live in an object store addressed by key. The
//! transfer service only ever reads whole objects.
//!
//! ## Implementations
//!
//! - `FsObjectStore`: keys are relative paths below a root directory
//! - `MemoryObjectStore`: keys map to in-memory buffers

use anyhow::Context;
use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

/// Read access to stored objects
pub trait ObjectStore: Send + Sync + 'static {
    /// Fetch the full content of the object stored under `key`
    fn fetch_object(&self, key: &str) -> impl Future<Output = anyhow::Result<Bytes>> + Send;
}

/// Object store backed by a directory tree
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: Box<Path>,
}

impl FsObjectStore {
    pub fn new(root: Box<Path>) -> Self {
        FsObjectStore { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to its file, refusing keys that could escape the root
    fn object_path(&self, key: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(key);

        if key.is_empty()
            || !relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(anyhow::anyhow!("Invalid object key: {key:?}"));
        }

        Ok(self.root.join(relative))
    }
}

impl ObjectStore for FsObjectStore {
    async fn fetch_object(&self, key: &str) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(key)?;

        let content = tokio::fs::read(&object_path)
            .await
            .with_context(|| format!("Unable to read object file {}", object_path.display()))?;

        Ok(Bytes::from(content))
    }
}

/// Object store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: HashMap<String, Bytes>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, content: impl Into<Bytes>) {
        self.objects.insert(key.into(), content.into());
    }

    pub fn with_object(mut self, key: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.insert(key, content);
        self
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn fetch_object(&self, key: &str) -> anyhow::Result<Bytes> {
        self.objects
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Object not found: {key}"))
    }
}
