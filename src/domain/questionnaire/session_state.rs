//! Session state value object.
//!
//! The persisted snapshot of one user's questionnaire progress. The state is
//! written to the store after every mutation and restored once at session
//! start.
//!
//! # Restoration
//!
//! Restoration fails closed per field: a malformed or missing field falls
//! back to its default without discarding the fields that did validate.
//! Unknown answer keys and malformed preview entries are skipped the same
//! way. A `step` outside the catalog range counts as malformed.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::preview::PreviewItem;

use super::questions::{QuestionKey, QUESTION_COUNT};

/// Recorded answers, keyed by question.
pub type AnswerSet = HashMap<QuestionKey, String>;

/// Snapshot of questionnaire progress for one session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Recorded answers, keyed by question. Insertion order irrelevant.
    pub answers: AnswerSet,

    /// Index of the question currently presented. Always `< QUESTION_COUNT`.
    pub step: usize,

    /// In-progress draft for the current step. Not required to equal the
    /// recorded answer for that step.
    pub input: String,

    /// True only once every question has been answered via forward
    /// submission and the review gate is open.
    pub show_review: bool,

    /// Previews delivered by the last successful fetch. Empty until then.
    pub playlist_previews: Vec<PreviewItem>,
}

/// Wire shape of the stored snapshot: a flat camelCase JSON record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredSnapshot<'a> {
    answers: &'a HashMap<QuestionKey, String>,
    step: usize,
    input: &'a str,
    show_review: bool,
    playlist_previews: &'a [PreviewItem],
}

impl SessionState {
    /// Encode this state as the stored snapshot record.
    pub fn to_snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&StoredSnapshot {
            answers: &self.answers,
            step: self.step,
            input: &self.input,
            show_review: self.show_review,
            playlist_previews: &self.playlist_previews,
        })
    }

    /// Restore a state from a stored snapshot, field by field.
    ///
    /// Never fails: an unparseable document yields the default state, and
    /// each malformed field degrades to its own default independently.
    pub fn from_snapshot_json(raw: &str) -> Self {
        let parsed: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };

        let mut state = Self::default();

        if let Some(entries) = parsed.get("answers").and_then(Value::as_object) {
            for (key, value) in entries {
                if let (Ok(key), Some(text)) = (key.parse::<QuestionKey>(), value.as_str()) {
                    state.answers.insert(key, text.to_string());
                }
            }
        }

        if let Some(step) = parsed.get("step").and_then(Value::as_u64) {
            let step = step as usize;
            if step < QUESTION_COUNT {
                state.step = step;
            }
        }

        if let Some(input) = parsed.get("input").and_then(Value::as_str) {
            state.input = input.to_string();
        }

        if let Some(show_review) = parsed.get("showReview").and_then(Value::as_bool) {
            state.show_review = show_review;
        }

        if let Some(items) = parsed.get("playlistPreviews").and_then(Value::as_array) {
            state.playlist_previews = items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect();
        }

        state
    }

    /// Recorded answer for a question, if any.
    pub fn answer(&self, key: QuestionKey) -> Option<&str> {
        self.answers.get(&key).map(String::as_str)
    }

    /// True once every question in the catalog has a recorded answer.
    pub fn all_answered(&self) -> bool {
        QuestionKey::all().iter().all(|k| self.answers.contains_key(k))
    }
}
