//! Questionnaire domain module.
//!
//! The chat-style interview: a fixed five-question catalog, the persisted
//! session state, and the `ChatFlow` aggregate that governs navigation, the
//! review gate, and reset.

mod flow;
mod questions;
mod session_state;

pub use flow::{ChatFlow, FlowPhase, SubmitOutcome};
pub use questions::{question_at, question_catalog, Question, QuestionKey, QUESTION_COUNT};
pub use session_state::{AnswerSet, SessionState};
