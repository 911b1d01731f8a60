//! End-to-end tests for the questionnaire-review-preview flow.
//!
//! Drives `ConciergeService` through the same intents a front end would
//! dispatch, with in-memory adapters standing in for the collaborators.

use std::sync::Arc;

use playlist_concierge::adapters::catalog::MockCatalog;
use playlist_concierge::adapters::notify::LoggingNotifier;
use playlist_concierge::adapters::payment::SimulatedPaymentGateway;
use playlist_concierge::adapters::prompt::StaticConfirmation;
use playlist_concierge::adapters::storage::InMemorySnapshotStore;
use playlist_concierge::application::ConciergeService;
use playlist_concierge::domain::preview::FetchStatus;
use playlist_concierge::domain::questionnaire::{FlowPhase, SessionState, QUESTION_COUNT};
use playlist_concierge::domain::upgrade::{PaymentStatus, UserType};
use playlist_concierge::ports::{PreviewError, SnapshotStore};

const ANSWERS: [&str; QUESTION_COUNT] = ["cafe", "regulars", "chill", "mornings", "jazz"];

struct World {
    store: InMemorySnapshotStore,
    catalog: MockCatalog,
    gateway: Arc<SimulatedPaymentGateway>,
    prompt: Arc<StaticConfirmation>,
    notifier: LoggingNotifier,
}

impl World {
    fn new() -> Self {
        Self {
            store: InMemorySnapshotStore::new(),
            catalog: MockCatalog::new(),
            gateway: Arc::new(SimulatedPaymentGateway::always_succeeding()),
            prompt: Arc::new(StaticConfirmation::accepting()),
            notifier: LoggingNotifier::new(),
        }
    }

    async fn start(&self) -> ConciergeService {
        ConciergeService::start(
            Arc::new(self.store.clone()),
            Arc::new(self.catalog.clone()),
            Arc::clone(&self.gateway) as Arc<dyn playlist_concierge::ports::PaymentGateway>,
            Arc::clone(&self.prompt) as Arc<dyn playlist_concierge::ports::ConfirmationPrompt>,
            Arc::new(self.notifier.clone()),
        )
        .await
    }
}

async fn answer_all(service: &ConciergeService) {
    for answer in ANSWERS {
        service.submit_answer(answer).await.unwrap();
    }
}

// Scenario A: default session with no stored snapshot.
#[tokio::test]
async fn fresh_session_presents_the_first_question() {
    let world = World::new();
    let service = world.start().await;

    let view = service.view();
    assert_eq!(view.phase, FlowPhase::Asking);
    assert_eq!(view.step, 0);
    assert!(view.review.iter().all(|line| line.answer.is_none()));
    assert!(view.previews.is_empty());
}

// Scenario B: a stored snapshot restores straight onto the review screen.
#[tokio::test]
async fn stored_snapshot_restores_the_review_screen() {
    let world = World::new();
    world
        .store
        .save(
            r##"{"answers":{"businessType":"cafe"},"step":2,"input":"chill","showReview":true,"playlistPreviews":[{"label":"Morning Vibes","link":"#"}]}"##,
        )
        .await
        .unwrap();

    let service = world.start().await;
    let view = service.view();

    assert_eq!(view.phase, FlowPhase::Reviewing);
    assert_eq!(view.review[0].answer.as_deref(), Some("cafe"));
    assert_eq!(view.input, "chill");
    // The restored previews exist in state, but nothing has been fetched
    // this session.
    assert_eq!(view.previews.len(), 1);
    assert_eq!(view.fetch_status, FetchStatus::Idle);
}

// Scenario C: the review gate opens exactly once, after the fifth answer.
#[tokio::test]
async fn review_opens_after_the_last_answer_and_never_before() {
    let world = World::new();
    let service = world.start().await;

    for (idx, answer) in ANSWERS.iter().enumerate() {
        assert_eq!(
            service.view().phase,
            FlowPhase::Asking,
            "review must stay closed before answer {}",
            idx + 1
        );
        service.submit_answer(answer).await.unwrap();
    }

    assert_eq!(service.view().phase, FlowPhase::Reviewing);
}

// Scenario D: failed fetch surfaces a retryable error; retry succeeds.
#[tokio::test]
async fn failed_fetch_is_retryable_without_losing_the_flow() {
    let world = World::new();
    world
        .catalog
        .fail_times(1, PreviewError::Unavailable("catalog down".to_string()));
    let service = world.start().await;
    answer_all(&service).await;

    service.confirm_review().await.unwrap();

    let view = service.view();
    assert_eq!(view.phase, FlowPhase::PreviewsShown);
    assert!(matches!(view.fetch_status, FetchStatus::Error(_)));
    assert!(view.previews.is_empty());

    service.retry_previews().await.unwrap();

    let view = service.view();
    assert_eq!(view.fetch_status, FetchStatus::Success);
    assert_eq!(view.previews.len(), 5);
    assert_eq!(world.catalog.call_count(), 2);
}

// Scenario E: payment fails once, retries to success, then stays terminal.
#[tokio::test]
async fn upgrade_retries_after_failure_and_success_is_terminal() {
    let world = World {
        gateway: Arc::new(SimulatedPaymentGateway::failing_first(1)),
        ..World::new()
    };
    let service = world.start().await;
    service.set_user_type(UserType::External);
    answer_all(&service).await;
    service.confirm_review().await.unwrap();

    assert_eq!(
        service.begin_upgrade().await.unwrap(),
        PaymentStatus::Failed
    );
    assert_eq!(
        service.begin_upgrade().await.unwrap(),
        PaymentStatus::Succeeded
    );
    assert_eq!(
        service.begin_upgrade().await.unwrap(),
        PaymentStatus::Succeeded
    );

    // The third invocation never reached the gateway.
    assert_eq!(world.gateway.attempt_count(), 2);
}

// Scenario F: reset is gated on confirmation.
#[tokio::test]
async fn declined_reset_keeps_everything() {
    let world = World {
        prompt: Arc::new(StaticConfirmation::declining()),
        ..World::new()
    };
    let service = world.start().await;
    answer_all(&service).await;
    let before = service.view();

    assert!(!service.reset().await.unwrap());

    assert_eq!(service.view(), before);
    assert_eq!(world.prompt.asked_count(), 1);
}

#[tokio::test]
async fn accepted_reset_returns_every_field_to_defaults() {
    let world = World::new();
    let service = world.start().await;
    answer_all(&service).await;
    service.confirm_review().await.unwrap();

    assert!(service.reset().await.unwrap());

    let view = service.view();
    assert_eq!(view.phase, FlowPhase::Asking);
    assert_eq!(view.step, 0);
    assert!(view.input.is_empty());
    assert!(view.previews.is_empty());
    assert!(view.review.iter().all(|line| line.answer.is_none()));
    assert_eq!(view.fetch_status, FetchStatus::Idle);
    assert_eq!(view.payment_status, PaymentStatus::Idle);

    // The stored snapshot is the default state, not a stale one.
    let stored = world.store.contents().await.unwrap();
    assert_eq!(
        SessionState::from_snapshot_json(&stored),
        SessionState::default()
    );
}

// Back-navigation restores the recorded answer into the draft.
#[tokio::test]
async fn going_back_prefills_the_previous_answer() {
    let world = World::new();
    let service = world.start().await;

    service.submit_answer("cafe").await.unwrap();
    service.update_input("half-typed").await;

    service.go_back().await.unwrap();

    let view = service.view();
    assert_eq!(view.step, 0);
    assert_eq!(view.input, "cafe");
}

// Confirm / edit / identical re-answer / confirm leaves the answers intact.
#[tokio::test]
async fn review_round_trip_is_idempotent() {
    let world = World::new();
    let service = world.start().await;
    answer_all(&service).await;
    service.confirm_review().await.unwrap();
    let first = service.view().review.clone();

    // A second session runs the same answers through an edit round.
    let world = World::new();
    let service = world.start().await;
    answer_all(&service).await;
    service.edit_review().await.unwrap();
    answer_all(&service).await;
    service.confirm_review().await.unwrap();

    assert_eq!(service.view().review, first);
}

// Progress survives a restart through the store, like a page reload.
#[tokio::test]
async fn session_survives_a_restart_via_the_store() {
    let world = World::new();

    {
        let service = world.start().await;
        service.submit_answer("cafe").await.unwrap();
        service.submit_answer("regulars").await.unwrap();
        service.update_input("chi").await;
    }

    let service = world.start().await;
    let view = service.view();

    assert_eq!(view.step, 2);
    assert_eq!(view.input, "chi");
    assert_eq!(view.review[0].answer.as_deref(), Some("cafe"));
    assert_eq!(view.review[1].answer.as_deref(), Some("regulars"));
}

// A corrupt stored snapshot degrades per field instead of blocking startup.
#[tokio::test]
async fn corrupt_snapshot_fields_degrade_independently() {
    let world = World::new();
    world
        .store
        .save(r#"{"answers":{"brandMood":"warm"},"step":"broken","showReview":"yes"}"#)
        .await
        .unwrap();

    let service = world.start().await;
    let view = service.view();

    assert_eq!(view.phase, FlowPhase::Asking);
    assert_eq!(view.step, 0);
    assert_eq!(view.review[2].answer.as_deref(), Some("warm"));
}

// The managed branch notifies instead of paying.
#[tokio::test]
async fn managed_clients_notify_the_curation_team() {
    let world = World::new();
    let service = world.start().await;
    service.set_user_type(UserType::Managed);
    answer_all(&service).await;
    service.confirm_review().await.unwrap();

    assert!(service.begin_upgrade().await.is_err());
    service.notify_curation_team().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(world.notifier.request_count(), 1);
    assert_eq!(world.notifier.requests()[0].answers.len(), QUESTION_COUNT);
}
