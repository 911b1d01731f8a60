//! Mock playlist catalog for development and testing.
//!
//! Serves canned previews after a configurable latency window. Supports:
//! - Pre-configured responses
//! - Error injection (queued, consumed one per call)
//! - Call tracking

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::preview::PreviewItem;
use crate::domain::questionnaire::AnswerSet;
use crate::ports::{PreviewError, PreviewProvider};

/// Mock catalog collaborator.
///
/// # Example
///
/// ```ignore
/// let catalog = MockCatalog::new();
///
/// // Inject a failure for the next call only
/// catalog.fail_times(1, PreviewError::Unavailable("catalog down".into()));
///
/// let result = catalog.playlist_previews(&answers).await; // Err
/// let result = catalog.playlist_previews(&answers).await; // Ok(canned)
/// ```
pub struct MockCatalog {
    inner: Arc<Mutex<MockState>>,
    latency: Duration,
}

#[derive(Default)]
struct MockState {
    /// Previews to return instead of the canned set.
    next_previews: Option<Vec<PreviewItem>>,

    /// Errors to return, consumed front-first, one per call.
    queued_errors: VecDeque<PreviewError>,

    /// Number of fetch calls made.
    call_count: usize,

    /// Answers from the most recent call.
    last_answers: Option<AnswerSet>,
}

impl MockCatalog {
    /// Create a mock with zero latency and the canned preview set.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState::default())),
            latency: Duration::ZERO,
        }
    }

    /// Create a mock that sleeps before answering, to mimic network latency.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState::default())),
            latency,
        }
    }

    /// The canned preview set the mock serves by default.
    pub fn canned_previews() -> Vec<PreviewItem> {
        vec![
            PreviewItem::new("Morning Vibes – Weekdays", "#"),
            PreviewItem::new("Afternoon Chill – Weekdays", "#"),
            PreviewItem::new("Evening Energy – Weekdays", "#"),
            PreviewItem::new("Weekend Brunch – Saturday", "#"),
            PreviewItem::new("Weekend Lounge – Sunday", "#"),
        ]
    }

    /// Set the previews to return on the next successful call.
    pub fn set_previews(&self, previews: Vec<PreviewItem>) {
        self.inner.lock().unwrap().next_previews = Some(previews);
    }

    /// Queue an error for the next call.
    pub fn push_error(&self, error: PreviewError) {
        self.inner.lock().unwrap().queued_errors.push_back(error);
    }

    /// Queue the same error for the next `n` calls.
    pub fn fail_times(&self, n: usize, error: PreviewError) {
        let mut state = self.inner.lock().unwrap();
        for _ in 0..n {
            state.queued_errors.push_back(error.clone());
        }
    }

    /// Number of fetch calls made so far.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().call_count
    }

    /// Answers passed to the most recent call.
    pub fn last_answers(&self) -> Option<AnswerSet> {
        self.inner.lock().unwrap().last_answers.clone()
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockCatalog {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            latency: self.latency,
        }
    }
}

#[async_trait]
impl PreviewProvider for MockCatalog {
    async fn playlist_previews(
        &self,
        answers: &AnswerSet,
    ) -> Result<Vec<PreviewItem>, PreviewError> {
        {
            let mut state = self.inner.lock().unwrap();
            state.call_count += 1;
            state.last_answers = Some(answers.clone());
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.inner.lock().unwrap();

        if let Some(error) = state.queued_errors.pop_front() {
            return Err(error);
        }

        Ok(state
            .next_previews
            .take()
            .unwrap_or_else(Self::canned_previews))
    }
}
