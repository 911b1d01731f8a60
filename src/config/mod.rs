//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONCIERGE` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use playlist_concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod catalog;
mod error;
mod payment;
mod storage;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
///
/// Every section has working defaults, so a bare environment is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Snapshot storage (data directory).
    #[serde(default)]
    pub storage: StorageConfig,

    /// Playlist catalog collaborator policy.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Payment collaborator policy.
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variable Format
    ///
    /// - `CONCIERGE__STORAGE__DATA_DIR=/tmp/concierge` -> `storage.data_dir`
    /// - `CONCIERGE__CATALOG__LATENCY_MS=0` -> `catalog.latency_ms`
    /// - `CONCIERGE__PAYMENT__FAIL_EVERY=0` -> `payment.fail_every`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its expected
    /// type.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.catalog.validate()?;
        self.payment.validate()?;
        Ok(())
    }
}
