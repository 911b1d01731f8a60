//! Simulated payment gateway.
//!
//! Resolves after a latency window and fails attempts according to a
//! deterministic schedule, so the upgrade flow and its retry affordance can
//! be exercised end to end before a real gateway is wired in.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::ports::{PaymentError, PaymentGateway};

/// Which attempts the simulated gateway fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Every attempt succeeds.
    Never,

    /// Every attempt fails.
    Always,

    /// Every nth attempt fails (1-based attempt counter). `EveryNth(5)`
    /// approximates a gateway failing a fifth of attempts.
    EveryNth(u64),

    /// The first `n` attempts fail, everything after succeeds.
    FirstN(u64),
}

impl FailurePolicy {
    fn should_fail(&self, attempt: u64) -> bool {
        match self {
            FailurePolicy::Never => false,
            FailurePolicy::Always => true,
            FailurePolicy::EveryNth(n) => *n > 0 && attempt % n == 0,
            FailurePolicy::FirstN(n) => attempt <= *n,
        }
    }
}

/// Simulated payment collaborator.
pub struct SimulatedPaymentGateway {
    latency: Duration,
    policy: FailurePolicy,
    attempts: Arc<AtomicU64>,
}

impl SimulatedPaymentGateway {
    /// Create a gateway with the given latency and failure schedule.
    pub fn new(latency: Duration, policy: FailurePolicy) -> Self {
        Self {
            latency,
            policy,
            attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Zero-latency gateway that always succeeds.
    pub fn always_succeeding() -> Self {
        Self::new(Duration::ZERO, FailurePolicy::Never)
    }

    /// Zero-latency gateway that fails the first `n` attempts.
    pub fn failing_first(n: u64) -> Self {
        Self::new(Duration::ZERO, FailurePolicy::FirstN(n))
    }

    /// Number of attempts processed so far.
    pub fn attempt_count(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn process_payment(&self) -> Result<(), PaymentError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.policy.should_fail(attempt) {
            return Err(PaymentError::retryable("Payment failed. Please try again."));
        }

        info!(attempt, "payment processed (simulated)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_succeeding_never_fails() {
        let gateway = SimulatedPaymentGateway::always_succeeding();
        for _ in 0..5 {
            assert!(gateway.process_payment().await.is_ok());
        }
        assert_eq!(gateway.attempt_count(), 5);
    }

    #[tokio::test]
    async fn failing_first_fails_then_recovers() {
        let gateway = SimulatedPaymentGateway::failing_first(1);

        let first = gateway.process_payment().await;
        assert!(first.is_err());
        assert!(first.unwrap_err().retryable);

        assert!(gateway.process_payment().await.is_ok());
    }

    #[tokio::test]
    async fn every_nth_fails_on_schedule() {
        let gateway = SimulatedPaymentGateway::new(Duration::ZERO, FailurePolicy::EveryNth(3));

        assert!(gateway.process_payment().await.is_ok()); // 1
        assert!(gateway.process_payment().await.is_ok()); // 2
        assert!(gateway.process_payment().await.is_err()); // 3
        assert!(gateway.process_payment().await.is_ok()); // 4
    }

    #[tokio::test]
    async fn always_fails() {
        let gateway = SimulatedPaymentGateway::new(Duration::ZERO, FailurePolicy::Always);
        assert!(gateway.process_payment().await.is_err());
        assert!(gateway.process_payment().await.is_err());
    }
}
