//! Preview domain module.
//!
//! A preview is a lightweight descriptor for a candidate playlist — label
//! plus listen link — distinct from any full detail data the catalog might
//! serve elsewhere.

use serde::{Deserialize, Serialize};

/// A candidate playlist preview, immutable once produced by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    /// Human-readable playlist name.
    pub label: String,

    /// Listen link for the playlist.
    pub link: String,
}

impl PreviewItem {
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
        }
    }
}

/// Status of the preview fetch. Derived state, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "message")]
pub enum FetchStatus {
    /// No fetch has been attempted this session.
    Idle,

    /// A fetch is in flight.
    Loading,

    /// The last fetch delivered previews.
    Success,

    /// The last fetch failed; the message is shown with a retry affordance.
    Error(String),
}

impl FetchStatus {
    /// Returns true while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    /// Returns the error message, if the last fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_only_for_error() {
        assert_eq!(FetchStatus::Idle.error_message(), None);
        assert_eq!(FetchStatus::Success.error_message(), None);
        assert_eq!(
            FetchStatus::Error("catalog unavailable".to_string()).error_message(),
            Some("catalog unavailable")
        );
    }

    #[test]
    fn is_loading_only_while_loading() {
        assert!(FetchStatus::Loading.is_loading());
        assert!(!FetchStatus::Idle.is_loading());
    }

    #[test]
    fn preview_item_serializes_flat() {
        let item = PreviewItem::new("Morning Vibes – Weekdays", "#");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["label"], "Morning Vibes – Weekdays");
        assert_eq!(json["link"], "#");
    }
}
