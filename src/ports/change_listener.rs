//! Change listener port - how the presentation layer observes the flow.
//!
//! The core never renders; after every state change it hands subscribed
//! listeners a `FlowView` projection and lets them redraw. This keeps the
//! machine decoupled from any particular UI.

use serde::Serialize;

use crate::domain::preview::{FetchStatus, PreviewItem};
use crate::domain::questionnaire::{FlowPhase, QuestionKey};
use crate::domain::upgrade::{PaymentStatus, UserType};

/// One question with its recorded answer, for the review summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewLine {
    pub key: QuestionKey,
    pub prompt: &'static str,
    pub answer: Option<String>,
}

/// Render-ready projection of the whole session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowView {
    /// Current phase of the questionnaire.
    pub phase: FlowPhase,

    /// 0-based index of the current question.
    pub step: usize,

    /// Total number of questions, for progress display.
    pub question_count: usize,

    /// Prompt of the current question.
    pub prompt: &'static str,

    /// In-progress draft for the current step.
    pub input: String,

    /// Every question with its recorded answer, in interview order.
    pub review: Vec<ReviewLine>,

    /// Previews from the last successful fetch.
    pub previews: Vec<PreviewItem>,

    /// Status of the preview fetch.
    pub fetch_status: FetchStatus,

    /// Which upgrade branch applies.
    pub user_type: UserType,

    /// Status of the payment attempt.
    pub payment_status: PaymentStatus,

    /// Failure message from the last payment attempt, if any.
    pub payment_error: Option<String>,
}

/// Port the presentation layer implements to be redrawn on every change.
///
/// Listeners run on the session's logical thread; they should only capture
/// the view and schedule their own work.
pub trait ChangeListener: Send + Sync {
    fn flow_changed(&self, view: &FlowView);
}
