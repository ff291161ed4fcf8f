//! Whole-collection persistence.
//!
//! The collection is read in full before every request and written in full
//! after every mutation. There is no partial update and no journal.
//!
//! [`JsonFileStore`] overwrites its file in place. Readers and writers inside
//! one process are serialized, but a crash mid-write can still leave a
//! truncated file behind; the next read then reports [`StoreError::Corrupt`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::items::Item;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a JSON array of items: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Reads and replaces the entire item collection.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    async fn read(&self) -> Result<Vec<Item>, StoreError>;
    async fn write(&self, items: &[Item]) -> Result<(), StoreError>;
}

// ── JSON file ─────────────────────────────────────────────────────────────────

/// A collection kept as one pretty-printed JSON array in a single file.
///
/// A missing file reads as an empty collection.
pub struct JsonFileStore {
    path: PathBuf,
    // Guards the file, not the collection: a read never sees a half-written file.
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: RwLock::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn read(&self) -> Result<Vec<Item>, StoreError> {
        let _guard = self.lock.read().await;
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })
    }

    async fn write(&self, items: &[Item]) -> Result<(), StoreError> {
        // serde_json's pretty printer indents with two spaces.
        let bytes = serde_json::to_vec_pretty(items).map_err(StoreError::Encode)?;
        let _guard = self.lock.write().await;
        tokio::fs::write(&self.path, &bytes).await.map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), items = items.len(), bytes = bytes.len(), "collection written");
        Ok(())
    }
}

// ── In memory ─────────────────────────────────────────────────────────────────

/// A collection held in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self { items: RwLock::new(items) }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn read(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn write(&self, items: &[Item]) -> Result<(), StoreError> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn write_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        let items = vec![Item::new("popsicle", 1.45), Item::new("apple", 0.5)];
        store.write(&items).await.unwrap();
        assert_eq!(store.read().await.unwrap(), items);
    }

    #[tokio::test]
    async fn writes_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.write(&[Item::new("popsicle", 1.45)]).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "[\n  {\n    \"name\": \"popsicle\",\n    \"price\": 1.45\n  }\n]");
    }

    #[tokio::test]
    async fn write_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.write(&[Item::new("a", 1.0), Item::new("b", 2.0)]).await.unwrap();
        store.write(&[]).await.unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[tokio::test]
    async fn invalid_json_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[{\"name\": \"popsicle\",").unwrap();
        let store = JsonFileStore::new(path);
        assert!(matches!(store.read().await, Err(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn non_array_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{\"name\": \"popsicle\"}").unwrap();
        let store = JsonFileStore::new(path);
        assert!(matches!(store.read().await, Err(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn array_of_non_objects_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[1, \"tea\"]").unwrap();
        let store = JsonFileStore::new(path);
        assert!(matches!(store.read().await, Err(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn unwritable_location_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing").join("data.json"));
        assert!(matches!(store.write(&[]).await, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.read().await.unwrap().is_empty());
        store.write(&[Item::new("tea", 3.0)]).await.unwrap();
        assert_eq!(store.read().await.unwrap(), vec![Item::new("tea", 3.0)]);
    }
}
