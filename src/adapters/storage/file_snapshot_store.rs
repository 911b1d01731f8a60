//! File-based snapshot store adapter.
//!
//! Stores the snapshot as a single JSON file under a base directory, named
//! after the fixed snapshot key. The device-local file plays the role a
//! browser's key-value store would: it survives restarts and is cleared only
//! by explicit action.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{SnapshotStore, SnapshotStoreError, SNAPSHOT_KEY};

/// File-backed storage for the session snapshot.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    base_path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a file store rooted at a base directory.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSnapshotStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn snapshot_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", SNAPSHOT_KEY))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<String>, SnapshotStoreError> {
        let path = self.snapshot_path();

        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)
            .await
            .map_err(|e| SnapshotStoreError::IoError(e.to_string()))?;

        Ok(Some(raw))
    }

    async fn save(&self, snapshot: &str) -> Result<(), SnapshotStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SnapshotStoreError::IoError(e.to_string()))?;

        fs::write(self.snapshot_path(), snapshot)
            .await
            .map_err(|e| SnapshotStoreError::IoError(e.to_string()))
    }

    async fn clear(&self) -> Result<(), SnapshotStoreError> {
        let path = self.snapshot_path();

        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| SnapshotStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_without_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path());

        store.save("{\"showReview\":true}").await.unwrap();

        assert_eq!(
            store.load().await.unwrap(),
            Some("{\"showReview\":true}".to_string())
        );
    }

    #[tokio::test]
    async fn save_creates_the_base_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("session");
        let store = FileSnapshotStore::new(&nested);

        store.save("{}").await.unwrap();

        assert!(nested.join(format!("{}.json", SNAPSHOT_KEY)).exists());
    }

    #[tokio::test]
    async fn clear_removes_the_file() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path());

        store.save("{}").await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_on_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path());
        assert!(store.clear().await.is_ok());
    }
}
