//! Confirmation prompt port - blocking yes/no interaction.
//!
//! Destructive actions (reset) go through this collaborator before they
//! touch any state.

use async_trait::async_trait;

/// Port for asking the user a yes/no question and waiting for the answer.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Present the message and return true only on explicit approval.
    async fn confirm(&self, message: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ConfirmationPrompt) {}
}
