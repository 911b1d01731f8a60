//! Playlist catalog adapters.

mod mock_catalog;

pub use mock_catalog::MockCatalog;
