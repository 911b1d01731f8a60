//! In-memory snapshot store adapter.
//!
//! Holds the snapshot in process memory. Useful for tests and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{SnapshotStore, SnapshotStoreError};

/// In-memory storage for the session snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshot: Arc<RwLock<Option<String>>>,
}

impl InMemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a snapshot, as if a previous session
    /// had saved it.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Some(snapshot.into()))),
        }
    }

    /// Current raw contents (useful for assertions).
    pub async fn contents(&self) -> Option<String> {
        self.snapshot.read().await.clone()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<String>, SnapshotStoreError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &str) -> Result<(), SnapshotStoreError> {
        *self.snapshot.write().await = Some(snapshot.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SnapshotStoreError> {
        *self.snapshot.write().await = None;
        Ok(())
    }
}
