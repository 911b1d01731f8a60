//! Preview provider port - interface to the playlist catalog.
//!
//! The core depends only on this signature; whether the previews come from a
//! real catalog service or canned data is adapter policy.

use async_trait::async_trait;

use crate::domain::preview::PreviewItem;
use crate::domain::questionnaire::AnswerSet;

/// Errors that can occur while fetching previews.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PreviewError {
    #[error("Playlist catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Playlist catalog returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// Port for fetching playlist previews matching a finalized answer set.
///
/// Results are stored verbatim; the core performs no transformation or
/// re-validation of the returned items.
#[async_trait]
pub trait PreviewProvider: Send + Sync {
    /// Fetch previews for the given answers.
    async fn playlist_previews(&self, answers: &AnswerSet)
        -> Result<Vec<PreviewItem>, PreviewError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PreviewProvider) {}

    #[test]
    fn error_display_names_the_catalog() {
        let err = PreviewError::Unavailable("timeout".to_string());
        assert!(err.to_string().contains("catalog unavailable"));
    }
}
