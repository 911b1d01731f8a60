//! Payment gateway port - interface for processing the paid upgrade.
//!
//! The core only needs a latency-plus-outcome contract: the gateway resolves
//! after some delay and either succeeds or fails with a message. Failure
//! rates, latency windows, and real gateway wiring are adapter policy.

use async_trait::async_trait;

/// Error from a payment attempt.
#[derive(Debug, Clone)]
pub struct PaymentError {
    /// Human-readable message, surfaced to the user per attempt.
    pub message: String,

    /// Whether re-invoking the attempt can reasonably succeed.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a retryable payment error.
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    /// Create a non-retryable payment error.
    pub fn declined(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Port for the payment collaborator.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Run one payment attempt to completion.
    async fn process_payment(&self) -> Result<(), PaymentError>;
}
