//! Snapshot store port - interface for persisting the session snapshot.
//!
//! The store is a device-local key-value string store addressed by a single
//! fixed key. It survives restarts; clearing it is a store-level concern
//! outside the core's control.

use async_trait::async_trait;

/// The single key the session snapshot lives under.
pub const SNAPSHOT_KEY: &str = "playlistBuilderState";

/// Errors that can occur during snapshot store operations.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// Port for persisting and loading the raw session snapshot.
///
/// Payloads are opaque strings; decoding and per-field validation belong to
/// the domain, so a corrupt payload is a successful `load` that the caller
/// degrades gracefully.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot, if one exists.
    async fn load(&self) -> Result<Option<String>, SnapshotStoreError>;

    /// Save a snapshot, replacing any previous one.
    async fn save(&self, snapshot: &str) -> Result<(), SnapshotStoreError>;

    /// Remove the stored snapshot.
    async fn clear(&self) -> Result<(), SnapshotStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn SnapshotStore) {}

    #[test]
    fn error_messages_carry_context() {
        let err = SnapshotStoreError::IoError("disk full".to_string());
        assert!(err.to_string().contains("disk full"));
    }
}
