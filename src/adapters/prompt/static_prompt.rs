//! Static confirmation adapter.
//!
//! Answers every prompt the same way. Useful for tests and headless runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::ports::ConfirmationPrompt;

/// Confirmation prompt with a fixed answer.
pub struct StaticConfirmation {
    answer: bool,
    asked: Arc<AtomicUsize>,
}

impl StaticConfirmation {
    /// A prompt that approves everything.
    pub fn accepting() -> Self {
        Self {
            answer: true,
            asked: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A prompt that declines everything.
    pub fn declining() -> Self {
        Self {
            answer: false,
            asked: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times the prompt was shown.
    pub fn asked_count(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmationPrompt for StaticConfirmation {
    async fn confirm(&self, _message: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}
