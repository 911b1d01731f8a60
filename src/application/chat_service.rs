//! ConciergeService - session orchestrator.
//!
//! Owns the `ChatFlow` aggregate plus the ephemeral fetch and upgrade state,
//! and wires them to the ports: every mutation is mirrored to the snapshot
//! store, every change is fanned out to subscribed listeners, and the two
//! async boundaries (preview fetch, payment) are guarded against duplicates
//! and stale completions.
//!
//! # Concurrency
//!
//! All state lives behind one mutex that is never held across an await
//! point, so synchronous user actions apply atomically. Async completions
//! carry the session generation captured at invocation time; a completion
//! whose generation no longer matches (the user reset meanwhile) is
//! discarded.

use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::preview::FetchStatus;
use crate::domain::questionnaire::{
    question_catalog, ChatFlow, FlowPhase, SessionState, SubmitOutcome, QUESTION_COUNT,
};
use crate::domain::upgrade::{BeginOutcome, PaymentStatus, UpgradeFlow, UserType};
use crate::ports::{
    ChangeListener, ClientNotifier, ConfirmationPrompt, FlowView, PaymentGateway, PreviewProvider,
    ReviewLine, SnapshotStore, UpgradeRequest,
};

/// Prompt shown before a destructive reset.
const RESET_PROMPT: &str =
    "Are you sure you want to reset the chat? All your answers will be lost.";

/// Everything that changes over a session, behind one lock.
struct Inner {
    flow: ChatFlow,
    fetch_status: FetchStatus,
    fetch_in_flight: bool,
    upgrade: UpgradeFlow,
    user_type: UserType,
    /// Bumped on reset; async completions from an older generation are stale.
    generation: u64,
}

impl Inner {
    fn fresh() -> Self {
        Self {
            flow: ChatFlow::new(),
            fetch_status: FetchStatus::Idle,
            fetch_in_flight: false,
            upgrade: UpgradeFlow::new(),
            user_type: UserType::External,
            generation: 0,
        }
    }
}

/// Session orchestrator for the questionnaire-review-preview flow.
pub struct ConciergeService {
    inner: Arc<Mutex<Inner>>,
    store: Arc<dyn SnapshotStore>,
    previews: Arc<dyn PreviewProvider>,
    payments: Arc<dyn PaymentGateway>,
    prompt: Arc<dyn ConfirmationPrompt>,
    notifier: Arc<dyn ClientNotifier>,
    listeners: Mutex<Vec<Arc<dyn ChangeListener>>>,
}

impl ConciergeService {
    /// Start a session: restore the stored snapshot if one exists, defaults
    /// otherwise.
    ///
    /// A store that fails to load degrades to a fresh session rather than
    /// blocking the flow.
    pub async fn start(
        store: Arc<dyn SnapshotStore>,
        previews: Arc<dyn PreviewProvider>,
        payments: Arc<dyn PaymentGateway>,
        prompt: Arc<dyn ConfirmationPrompt>,
        notifier: Arc<dyn ClientNotifier>,
    ) -> Self {
        let restored = match store.load().await {
            Ok(Some(raw)) => SessionState::from_snapshot_json(&raw),
            Ok(None) => SessionState::default(),
            Err(err) => {
                warn!(error = %err, "failed to load stored session, starting fresh");
                SessionState::default()
            }
        };

        let mut inner = Inner::fresh();
        inner.flow = ChatFlow::restore(restored);

        Self {
            inner: Arc::new(Mutex::new(inner)),
            store,
            previews,
            payments,
            prompt,
            notifier,
            listeners: Mutex::new(Vec::new()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────────────────

    /// Subscribe a listener; it is handed the current view immediately and
    /// again after every change.
    pub fn subscribe(&self, listener: Arc<dyn ChangeListener>) {
        let view = self.view();
        listener.flow_changed(&view);
        self.listeners.lock().unwrap().push(listener);
    }

    /// Current render-ready projection of the session.
    pub fn view(&self) -> FlowView {
        build_view(&self.inner.lock().unwrap())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Questionnaire intents
    // ─────────────────────────────────────────────────────────────────────────

    /// Record the in-progress draft for the current step.
    pub async fn update_input(&self, text: &str) {
        let payload = {
            let mut inner = self.inner.lock().unwrap();
            inner.flow.update_input(text);
            encode_snapshot(&inner)
        };
        self.persist(payload).await;
        self.publish();
    }

    /// Submit an answer for the current question.
    pub async fn submit_answer(&self, text: &str) -> Result<SubmitOutcome, DomainError> {
        let (outcome, payload) = {
            let mut inner = self.inner.lock().unwrap();
            let outcome = inner.flow.submit_answer(text)?;
            (outcome, encode_snapshot(&inner))
        };
        self.persist(payload).await;
        self.publish();
        Ok(outcome)
    }

    /// Step back to the previous question.
    pub async fn go_back(&self) -> Result<(), DomainError> {
        let payload = {
            let mut inner = self.inner.lock().unwrap();
            inner.flow.go_back()?;
            encode_snapshot(&inner)
        };
        self.persist(payload).await;
        self.publish();
        Ok(())
    }

    /// Jump from the review summary to one question for targeted editing.
    pub async fn jump_to_question(&self, index: usize) -> Result<(), DomainError> {
        let payload = {
            let mut inner = self.inner.lock().unwrap();
            inner.flow.jump_to_question(index)?;
            encode_snapshot(&inner)
        };
        self.persist(payload).await;
        self.publish();
        Ok(())
    }

    /// Leave the review summary for the first question, answers retained.
    pub async fn edit_review(&self) -> Result<(), DomainError> {
        let payload = {
            let mut inner = self.inner.lock().unwrap();
            inner.flow.edit_review()?;
            encode_snapshot(&inner)
        };
        self.persist(payload).await;
        self.publish();
        Ok(())
    }

    /// Confirm the review and fetch previews for the finalized answers.
    ///
    /// The flow moves to `PreviewsShown` regardless of the fetch outcome; a
    /// failed fetch surfaces as a retryable error state, never a rollback.
    pub async fn confirm_review(&self) -> Result<(), DomainError> {
        let payload = {
            let mut inner = self.inner.lock().unwrap();
            inner.flow.confirm_review()?;
            encode_snapshot(&inner)
        };
        self.persist(payload).await;
        self.publish();

        self.run_fetch().await;
        Ok(())
    }

    /// Re-run the preview fetch with the currently stored answers.
    pub async fn retry_previews(&self) -> Result<(), DomainError> {
        {
            let inner = self.inner.lock().unwrap();
            if inner.flow.phase() != FlowPhase::PreviewsShown {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    "retry_previews is only valid once previews are shown",
                ));
            }
        }
        self.run_fetch().await;
        Ok(())
    }

    /// Reset the session to defaults, behind the confirmation prompt.
    ///
    /// Returns true if the user confirmed and the reset happened.
    pub async fn reset(&self) -> Result<bool, DomainError> {
        if !self.prompt.confirm(RESET_PROMPT).await {
            debug!("reset declined");
            return Ok(false);
        }

        let payload = {
            let mut inner = self.inner.lock().unwrap();
            inner.generation += 1;
            inner.flow.reset();
            inner.fetch_status = FetchStatus::Idle;
            inner.fetch_in_flight = false;
            inner.upgrade = UpgradeFlow::new();
            encode_snapshot(&inner)
        };
        info!("session reset");
        self.persist(payload).await;
        self.publish();
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Upgrade intents
    // ─────────────────────────────────────────────────────────────────────────

    /// Select which upgrade branch the session offers. Session-ephemeral.
    pub fn set_user_type(&self, user_type: UserType) {
        self.inner.lock().unwrap().user_type = user_type;
        self.publish();
    }

    /// Run one paid-upgrade attempt through the gateway.
    ///
    /// Only offered to external users. A begin after success is a no-op, as
    /// is a begin while an attempt is in flight; both return the current
    /// status. Failures are retryable by calling again.
    pub async fn begin_upgrade(&self) -> Result<PaymentStatus, DomainError> {
        let generation = {
            let mut inner = self.inner.lock().unwrap();

            if inner.user_type != UserType::External {
                return Err(DomainError::new(
                    ErrorCode::WrongUserType,
                    "Paid upgrade is only offered to external users",
                ));
            }

            match inner.upgrade.begin() {
                BeginOutcome::AlreadySucceeded => {
                    debug!("upgrade already purchased, ignoring");
                    return Ok(PaymentStatus::Succeeded);
                }
                BeginOutcome::AlreadyProcessing => {
                    debug!("payment already in flight, ignoring");
                    return Ok(PaymentStatus::Processing);
                }
                BeginOutcome::Started => inner.generation,
            }
        };
        self.publish();

        let result = self.payments.process_payment().await;

        let status = {
            let mut inner = self.inner.lock().unwrap();

            if inner.generation != generation {
                debug!("discarding stale payment completion");
                return Ok(inner.upgrade.status());
            }

            match result {
                Ok(()) => {
                    info!("upgrade payment succeeded");
                    inner.upgrade.complete();
                }
                Err(err) => {
                    warn!(error = %err, retryable = err.retryable, "upgrade payment failed");
                    inner.upgrade.fail(err.message);
                }
            }
            inner.upgrade.status()
        };
        self.publish();
        Ok(status)
    }

    /// Forward a managed client's upgrade request to the curation team.
    ///
    /// Fire-and-forget: the notification runs in the background and the
    /// session never waits on it.
    pub fn notify_curation_team(&self) -> Result<(), DomainError> {
        let answers = {
            let inner = self.inner.lock().unwrap();

            if inner.user_type != UserType::Managed {
                return Err(DomainError::new(
                    ErrorCode::WrongUserType,
                    "Curation-team notification is only offered to managed clients",
                ));
            }

            inner.flow.state().answers.clone()
        };

        let request = UpgradeRequest::new(answers);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(err) = notifier.notify_upgrade_request(request).await {
                warn!(error = %err, "curation-team notification failed");
            }
        });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Async plumbing
    // ─────────────────────────────────────────────────────────────────────────

    /// One guarded fetch pass: loading state, collaborator call, completion.
    async fn run_fetch(&self) {
        let (generation, answers) = {
            let mut inner = self.inner.lock().unwrap();

            if inner.fetch_in_flight {
                debug!("preview fetch already in flight, ignoring");
                return;
            }
            inner.fetch_in_flight = true;
            inner.fetch_status = FetchStatus::Loading;

            (inner.generation, inner.flow.state().answers.clone())
        };
        self.publish();

        let result = self.previews.playlist_previews(&answers).await;

        let payload = {
            let mut inner = self.inner.lock().unwrap();

            if inner.generation != generation {
                debug!("discarding stale preview fetch completion");
                return;
            }
            inner.fetch_in_flight = false;

            match result {
                Ok(items) => {
                    info!(count = items.len(), "playlist previews fetched");
                    inner.flow.apply_previews(items);
                    inner.fetch_status = FetchStatus::Success;
                    encode_snapshot(&inner)
                }
                Err(err) => {
                    warn!(error = %err, "playlist preview fetch failed");
                    // Keep whatever previews were already displayed.
                    inner.fetch_status = FetchStatus::Error(err.to_string());
                    None
                }
            }
        };
        self.persist(payload).await;
        self.publish();
    }

    /// Write a snapshot to the store; failures are logged, never fatal.
    async fn persist(&self, payload: Option<String>) {
        if let Some(json) = payload {
            if let Err(err) = self.store.save(&json).await {
                warn!(error = %err, "failed to persist session snapshot");
            }
        }
    }

    /// Hand the current view to every subscribed listener.
    fn publish(&self) {
        let view = self.view();
        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener.flow_changed(&view);
        }
    }
}

/// Encode the persisted slice of the session, warning on encode failure.
fn encode_snapshot(inner: &Inner) -> Option<String> {
    match inner.flow.state().to_snapshot_json() {
        Ok(json) => Some(json),
        Err(err) => {
            warn!(error = %err, "failed to encode session snapshot");
            None
        }
    }
}

fn build_view(inner: &Inner) -> FlowView {
    let flow = &inner.flow;
    FlowView {
        phase: flow.phase(),
        step: flow.step(),
        question_count: QUESTION_COUNT,
        prompt: flow.current_question().prompt,
        input: flow.input().to_string(),
        review: question_catalog()
            .iter()
            .map(|q| ReviewLine {
                key: q.key,
                prompt: q.prompt,
                answer: flow.state().answer(q.key).map(str::to_string),
            })
            .collect(),
        previews: flow.state().playlist_previews.clone(),
        fetch_status: inner.fetch_status.clone(),
        user_type: inner.user_type,
        payment_status: inner.upgrade.status(),
        payment_error: inner.upgrade.last_error().map(str::to_string),
    }
}
