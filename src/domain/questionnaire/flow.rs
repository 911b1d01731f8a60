//! Chat flow aggregate.
//!
//! Owns the questionnaire session state and enforces every navigation and
//! answer transition. The aggregate is synchronous and collaborator-free;
//! persistence mirroring and the async fetch/payment boundaries live in the
//! application layer.
//!
//! # Invariants
//!
//! - `step` always indexes a catalog question
//! - `show_review` is true only in the `Reviewing` phase
//! - answers survive every transition except `reset`
//! - entering any step pre-fills the draft from the recorded answer

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, ValidationError};
use crate::domain::preview::PreviewItem;

use super::questions::{question_at, Question, QUESTION_COUNT};
use super::session_state::SessionState;

/// Phase of the questionnaire flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    /// Presenting one question at a time.
    Asking,

    /// All questions answered; summary shown for confirm/edit.
    Reviewing,

    /// Review confirmed; preview results (or their error state) shown.
    PreviewsShown,
}

impl StateMachine for FlowPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FlowPhase::*;
        matches!(
            (self, target),
            (Asking, Reviewing)
                | (Reviewing, Asking)
                | (Reviewing, PreviewsShown)
                | (PreviewsShown, Asking)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FlowPhase::*;
        match self {
            Asking => vec![Reviewing],
            Reviewing => vec![Asking, PreviewsShown],
            PreviewsShown => vec![Asking],
        }
    }
}

/// Outcome of a forward submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Moved on to the next question.
    Advanced,

    /// The last answer landed; the review gate is now open.
    ReviewOpened,
}

/// The questionnaire state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatFlow {
    state: SessionState,
    phase: FlowPhase,
}

impl ChatFlow {
    /// Create a fresh flow at the first question.
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            phase: FlowPhase::Asking,
        }
    }

    /// Rebuild a flow from a restored snapshot.
    ///
    /// The phase is derived from the snapshot: an open review gate restores
    /// to `Reviewing`, anything else to `Asking`. `PreviewsShown` is
    /// deliberately unreachable from a restore — it is session-ephemeral.
    pub fn restore(state: SessionState) -> Self {
        let phase = if state.show_review {
            FlowPhase::Reviewing
        } else {
            FlowPhase::Asking
        };
        Self { state, phase }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the underlying session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    /// Returns the current step index.
    pub fn step(&self) -> usize {
        self.state.step
    }

    /// Returns the in-progress draft.
    pub fn input(&self) -> &str {
        &self.state.input
    }

    /// Returns the question at the current step.
    pub fn current_question(&self) -> &'static Question {
        // The step invariant makes this infallible.
        question_at(self.state.step).expect("step is always within the catalog")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record the in-progress draft for the current step.
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    /// Submit an answer for the current question.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` outside the `Asking` phase
    /// - `EmptyField` for empty or whitespace-only text
    pub fn submit_answer(&mut self, text: &str) -> Result<SubmitOutcome, DomainError> {
        self.ensure_phase(FlowPhase::Asking, "submit_answer")?;

        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("answer").into());
        }

        let key = self.current_question().key;
        self.state.answers.insert(key, text.to_string());

        if self.state.step + 1 == QUESTION_COUNT {
            self.phase = self.phase.transition_to(FlowPhase::Reviewing)?;
            self.state.show_review = true;
            self.state.input.clear();
            Ok(SubmitOutcome::ReviewOpened)
        } else {
            self.enter_step(self.state.step + 1);
            Ok(SubmitOutcome::Advanced)
        }
    }

    /// Step back to the previous question.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` outside the `Asking` phase
    /// - `OutOfRange` at the first question
    pub fn go_back(&mut self) -> Result<(), DomainError> {
        self.ensure_phase(FlowPhase::Asking, "go_back")?;

        if self.state.step == 0 {
            return Err(DomainError::new(
                ErrorCode::OutOfRange,
                "Already at the first question",
            ));
        }

        self.enter_step(self.state.step - 1);
        Ok(())
    }

    /// Jump from the review summary to a specific question for editing.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` outside the `Reviewing` phase
    /// - `OutOfRange` for an index beyond the catalog
    pub fn jump_to_question(&mut self, index: usize) -> Result<(), DomainError> {
        self.ensure_phase(FlowPhase::Reviewing, "jump_to_question")?;

        if index >= QUESTION_COUNT {
            return Err(
                ValidationError::out_of_range("index", 0, QUESTION_COUNT - 1, index).into(),
            );
        }

        self.phase = self.phase.transition_to(FlowPhase::Asking)?;
        self.state.show_review = false;
        self.enter_step(index);
        Ok(())
    }

    /// Confirm the review summary and commit to fetching previews.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` outside the `Reviewing` phase
    pub fn confirm_review(&mut self) -> Result<(), DomainError> {
        self.ensure_phase(FlowPhase::Reviewing, "confirm_review")?;

        self.phase = self.phase.transition_to(FlowPhase::PreviewsShown)?;
        self.state.show_review = false;
        Ok(())
    }

    /// Leave the review summary and re-enter the flow at the first question.
    /// Answers are retained.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` outside the `Reviewing` phase
    pub fn edit_review(&mut self) -> Result<(), DomainError> {
        self.ensure_phase(FlowPhase::Reviewing, "edit_review")?;

        self.phase = self.phase.transition_to(FlowPhase::Asking)?;
        self.state.show_review = false;
        self.enter_step(0);
        Ok(())
    }

    /// Wholesale reset to a fresh session. Valid in any phase.
    ///
    /// Confirmation gating is the caller's job; the aggregate resets
    /// unconditionally.
    pub fn reset(&mut self) {
        *self = ChatFlow::new();
    }

    /// Store previews delivered by a successful fetch.
    pub fn apply_previews(&mut self, items: Vec<PreviewItem>) {
        self.state.playlist_previews = items;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Move to a step and pre-fill the draft from its recorded answer.
    fn enter_step(&mut self, step: usize) {
        self.state.step = step;
        let key = self.current_question().key;
        self.state.input = self.state.answer(key).unwrap_or_default().to_string();
    }

    fn ensure_phase(&self, expected: FlowPhase, operation: &str) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("{} is only valid in the {:?} phase", operation, expected),
            )
            .with_detail("phase", format!("{:?}", self.phase)))
        }
    }
}

impl Default for ChatFlow {
    fn default() -> Self {
        Self::new()
    }
}
