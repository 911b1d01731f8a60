//! The fixed question catalog.
//!
//! The concierge asks the same five questions, in the same order, every
//! session. There is no dynamic insertion or removal of questions.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five business-profile questions, in interview order.
///
/// Keys serialize as the camelCase strings used in the stored snapshot
/// (`businessType`, `targetAudience`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKey {
    BusinessType,
    TargetAudience,
    BrandMood,
    TimeSlots,
    GenrePrefs,
}

impl QuestionKey {
    /// Returns all question keys in interview order.
    pub fn all() -> &'static [QuestionKey] {
        &[
            QuestionKey::BusinessType,
            QuestionKey::TargetAudience,
            QuestionKey::BrandMood,
            QuestionKey::TimeSlots,
            QuestionKey::GenrePrefs,
        ]
    }

    /// Returns the 0-based position of this question in the interview.
    pub fn order_index(&self) -> usize {
        Self::all()
            .iter()
            .position(|k| k == self)
            .expect("QuestionKey must be in all() array")
    }

    /// Returns the snapshot field name for this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKey::BusinessType => "businessType",
            QuestionKey::TargetAudience => "targetAudience",
            QuestionKey::BrandMood => "brandMood",
            QuestionKey::TimeSlots => "timeSlots",
            QuestionKey::GenrePrefs => "genrePrefs",
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}

/// A single interview question: stable key plus the prompt shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: QuestionKey,
    pub prompt: &'static str,
}

/// Number of questions in the interview.
pub const QUESTION_COUNT: usize = 5;

static CATALOG: Lazy<Vec<Question>> = Lazy::new(|| {
    vec![
        Question {
            key: QuestionKey::BusinessType,
            prompt: "What type of business are you curating music for? (e.g., café, hotel, spa)",
        },
        Question {
            key: QuestionKey::TargetAudience,
            prompt: "Who is your target audience? (Describe demographics or the customer vibe)",
        },
        Question {
            key: QuestionKey::BrandMood,
            prompt: "What brand mood would you like to create? (e.g., chill, energetic, upscale)",
        },
        Question {
            key: QuestionKey::TimeSlots,
            prompt: "Which time slots do you want playlists for? (e.g., morning, afternoon, evening, weekends)",
        },
        Question {
            key: QuestionKey::GenrePrefs,
            prompt: "Any music genres to include or avoid? (List preferences/exclusions)",
        },
    ]
});

/// Returns the full question catalog in interview order.
pub fn question_catalog() -> &'static [Question] {
    &CATALOG
}

/// Returns the question at a given step, if in range.
pub fn question_at(step: usize) -> Option<&'static Question> {
    CATALOG.get(step)
}
