//! Logging client notifier.
//!
//! Records upgrade requests and writes them to the log. Stands in for a real
//! internal notification channel (email, chat webhook); the recorded list
//! doubles as the assertion surface in tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::ports::{ClientNotifier, NotifyError, UpgradeRequest};

/// Notifier that logs and remembers every request.
#[derive(Default)]
pub struct LoggingNotifier {
    requests: Arc<Mutex<Vec<UpgradeRequest>>>,
}

impl LoggingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<UpgradeRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Clone for LoggingNotifier {
    fn clone(&self) -> Self {
        Self {
            requests: Arc::clone(&self.requests),
        }
    }
}

#[async_trait]
impl ClientNotifier for LoggingNotifier {
    async fn notify_upgrade_request(&self, request: UpgradeRequest) -> Result<(), NotifyError> {
        info!(
            request_id = %request.request_id,
            answers = request.answers.len(),
            "upgrade request forwarded to curation team"
        );
        self.requests.lock().unwrap().push(request);
        Ok(())
    }
}
