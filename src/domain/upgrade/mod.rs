//! Upgrade domain module.
//!
//! After previews are shown, the session offers a user-type-dependent
//! upgrade branch: managed clients notify the curation team, external users
//! run a payment attempt through the gateway. `UpgradeFlow` tracks one
//! session's payment lifecycle; none of it is persisted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Which upgrade branch the session offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// The curation team handles the upgrade; selecting it only sends a
    /// notification.
    Managed,

    /// Self-serve user; the upgrade runs through the payment gateway.
    External,
}

/// Status of the payment attempt. Ephemeral, per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No attempt started.
    Idle,

    /// An attempt is in flight.
    Processing,

    /// Payment went through. Terminal for the session.
    Succeeded,

    /// The last attempt failed; retry by starting another attempt.
    Failed,
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Idle, Processing)
                | (Processing, Succeeded)
                | (Processing, Failed)
                | (Failed, Processing)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Idle => vec![Processing],
            Processing => vec![Succeeded, Failed],
            Failed => vec![Processing],
            Succeeded => vec![],
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Idle
    }
}

/// One session's upgrade attempt tracker.
///
/// The status enum stays `Copy` for the `StateMachine` impl; the failure
/// message from the last attempt is carried alongside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpgradeFlow {
    status: PaymentStatus,
    last_error: Option<String>,
}

/// What a call to begin an attempt decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// A new attempt was started; the caller should invoke the gateway.
    Started,

    /// Payment already succeeded this session; nothing to do.
    AlreadySucceeded,

    /// An attempt is already in flight; the duplicate is suppressed.
    AlreadyProcessing,
}

impl UpgradeFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current attempt status.
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Failure message from the last attempt, if it failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start (or retry) an attempt.
    ///
    /// Success is terminal: a begin after `Succeeded` is a no-op, as is a
    /// begin while an attempt is in flight.
    pub fn begin(&mut self) -> BeginOutcome {
        match self.status {
            PaymentStatus::Succeeded => BeginOutcome::AlreadySucceeded,
            PaymentStatus::Processing => BeginOutcome::AlreadyProcessing,
            PaymentStatus::Idle | PaymentStatus::Failed => {
                // Idle -> Processing and Failed -> Processing are both valid.
                self.status = PaymentStatus::Processing;
                self.last_error = None;
                BeginOutcome::Started
            }
        }
    }

    /// Record a successful gateway response.
    pub fn complete(&mut self) {
        if self.status.can_transition_to(&PaymentStatus::Succeeded) {
            self.status = PaymentStatus::Succeeded;
            self.last_error = None;
        }
    }

    /// Record a failed gateway response.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status.can_transition_to(&PaymentStatus::Failed) {
            self.status = PaymentStatus::Failed;
            self.last_error = Some(message.into());
        }
    }
}
