//! Payment collaborator configuration.

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::payment::FailurePolicy;

use super::error::ValidationError;

const MAX_LATENCY_MS: u64 = 60_000;

/// Policy knobs for the simulated payment gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Simulated latency before an attempt resolves.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Fail every nth attempt; 0 disables simulated failures.
    #[serde(default = "default_fail_every")]
    pub fail_every: u64,
}

fn default_latency_ms() -> u64 {
    1_500
}

fn default_fail_every() -> u64 {
    5
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            fail_every: default_fail_every(),
        }
    }
}

impl PaymentConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Failure schedule for the simulated gateway.
    pub fn failure_policy(&self) -> FailurePolicy {
        match self.fail_every {
            0 => FailurePolicy::Never,
            n => FailurePolicy::EveryNth(n),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.latency_ms > MAX_LATENCY_MS {
            return Err(ValidationError::invalid(
                "payment.latency_ms",
                format!("must be at most {}", MAX_LATENCY_MS),
            ));
        }
        Ok(())
    }
}
