//! Playlist catalog collaborator configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Maximum latency the simulated catalog may be configured with.
const MAX_LATENCY_MS: u64 = 60_000;

/// Policy knobs for the catalog collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Simulated network latency before a fetch resolves.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_latency_ms() -> u64 {
    1_500
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl CatalogConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.latency_ms > MAX_LATENCY_MS {
            return Err(ValidationError::invalid(
                "catalog.latency_ms",
                format!("must be at most {}", MAX_LATENCY_MS),
            ));
        }
        Ok(())
    }
}
