//! Client notifier port - outbound notification to the curation team.
//!
//! Managed clients do not pay in-app; their upgrade intent is forwarded to
//! the curation team as a fire-and-forget notification.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::questionnaire::AnswerSet;

/// An upgrade request forwarded to the curation team.
#[derive(Debug, Clone)]
pub struct UpgradeRequest {
    /// Correlation id for the notification.
    pub request_id: Uuid,

    /// The finalized answer set the client confirmed.
    pub answers: AnswerSet,

    /// When the client asked for the upgrade.
    pub requested_at: DateTime<Utc>,
}

impl UpgradeRequest {
    pub fn new(answers: AnswerSet) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            answers,
            requested_at: Utc::now(),
        }
    }
}

/// Errors from the notification channel.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification channel unavailable: {0}")]
    Unavailable(String),
}

/// Port for forwarding upgrade requests. One-way; the session never waits on
/// an answer.
#[async_trait]
pub trait ClientNotifier: Send + Sync {
    /// Forward an upgrade request to the curation team.
    async fn notify_upgrade_request(&self, request: UpgradeRequest) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ClientNotifier) {}

    #[test]
    fn requests_get_distinct_ids() {
        let a = UpgradeRequest::new(AnswerSet::new());
        let b = UpgradeRequest::new(AnswerSet::new());
        assert_ne!(a.request_id, b.request_id);
    }
}
