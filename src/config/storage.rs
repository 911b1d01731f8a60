//! Snapshot storage configuration.

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the file-backed snapshot store keeps its data.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for the snapshot file.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::invalid(
                "storage.data_dir",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
