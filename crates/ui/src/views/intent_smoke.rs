use std::sync::Arc;

use async_trait::async_trait;
use practice_core::Clock;
use practice_core::model::{Problem, ProblemEntry, ProblemId};
use practice_core::session::{EmptyReason, SessionPhase};
use practice_core::time::fixed_now;
use storage::InMemoryRepository;
use storage::repository::{ProblemSuspension, ReviewHistory, Storage, StorageError};

use crate::vm::{CORRECT_MESSAGE, EMPTY_MESSAGE, PracticeIntent};

use super::practice::PracticeTestHandles;
use super::test_harness::{
    ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_storage,
};

fn two_problem_repo() -> InMemoryRepository {
    let repo = InMemoryRepository::new().with_clock(Clock::fixed(fixed_now()));
    let powers = Problem::new(
        ProblemId::new(1),
        "What is $2^{10}$?",
        vec!["1000".into(), "1024".into(), "2048".into()],
        1,
    )
    .unwrap();
    let squares = Problem::new(
        ProblemId::new(2),
        "What is $12^2$?",
        vec!["124".into(), "144".into()],
        1,
    )
    .unwrap();
    repo.seed_problem("powers_of_two", powers).unwrap();
    repo.seed_problem("squares", squares).unwrap();
    repo
}

fn handles(harness: &ViewHarness) -> PracticeTestHandles {
    harness
        .practice_handles
        .clone()
        .expect("practice harness has handles")
}

async fn drive(harness: &mut ViewHarness) {
    for _ in 0..5 {
        harness.drive_async().await;
    }
}

#[tokio::test(flavor = "current_thread")]
async fn practice_intents_smoke_answer_advance_suspend() {
    let repo = two_problem_repo();
    let mut harness = setup_view_harness(ViewKind::Practice, repo.clone());
    harness.settle().await;

    let handles = handles(&harness);
    let dispatch = handles.dispatch();
    let session = handles.session();
    assert_eq!(session.read().phase(), SessionPhase::Ready);
    assert_eq!(
        session.read().current_problem().map(Problem::id),
        Some(ProblemId::new(1))
    );

    dispatch.call(PracticeIntent::Select(0));
    dispatch.call(PracticeIntent::Select(1));
    drive(&mut harness).await;
    assert_eq!(session.read().selected_option(), Some(1));

    dispatch.call(PracticeIntent::Submit);
    dispatch.call(PracticeIntent::Submit);
    drive(&mut harness).await;

    let reviews = repo.list_reviews(0, 10).await.expect("list reviews");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].problem_id, ProblemId::new(1));
    assert!(reviews[0].correct);
    let html = harness.render();
    assert!(html.contains("Score: 1/1"), "missing score in {html}");
    assert!(html.contains(CORRECT_MESSAGE), "missing result in {html}");

    dispatch.call(PracticeIntent::Next);
    drive(&mut harness).await;
    assert_eq!(
        session.read().current_problem().map(Problem::id),
        Some(ProblemId::new(2))
    );
    let html = harness.render();
    assert!(html.contains("144"), "missing second problem in {html}");
    assert!(html.contains("Score: 1/1"), "score should carry over in {html}");

    dispatch.call(PracticeIntent::OpenSuspend);
    dispatch.call(PracticeIntent::SetSuspendReason("typo in options".into()));
    drive(&mut harness).await;
    assert!(harness.render().contains("Suspend problem"));

    dispatch.call(PracticeIntent::ConfirmSuspend);
    drive(&mut harness).await;

    let suspended = repo.list_suspended().await.expect("list suspended");
    assert_eq!(suspended.len(), 1);
    assert_eq!(suspended[0].id, ProblemId::new(2));
    assert_eq!(suspended[0].suspend_reason.as_deref(), Some("typo in options"));
    assert_eq!(session.read().attempted_count(), 1);

    let html = harness.render();
    assert!(html.contains(EMPTY_MESSAGE), "missing empty text in {html}");
    assert!(!html.contains("inline-error"), "unexpected error in {html}");
    assert_eq!(repo.list_reviews(0, 10).await.expect("list reviews").len(), 1);
}

#[derive(Clone)]
struct RefusingSuspension;

#[async_trait]
impl ProblemSuspension for RefusingSuspension {
    async fn suspend(
        &self,
        _id: ProblemId,
        _reason: Option<&str>,
    ) -> Result<ProblemEntry, StorageError> {
        Err(StorageError::Connection("refused".into()))
    }

    async fn unsuspend(&self, _id: ProblemId) -> Result<ProblemEntry, StorageError> {
        Err(StorageError::Connection("refused".into()))
    }

    async fn list_suspended(&self) -> Result<Vec<ProblemEntry>, StorageError> {
        Err(StorageError::Connection("refused".into()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn practice_intents_smoke_failed_suspend_still_moves_on() {
    let repo = two_problem_repo();
    let mut storage = Storage::from_backend(repo.clone());
    storage.suspensions = Arc::new(RefusingSuspension);
    let mut harness = setup_view_harness_with_storage(ViewKind::Practice, storage);
    harness.settle().await;

    let handles = handles(&harness);
    let dispatch = handles.dispatch();
    let session = handles.session();
    assert_eq!(session.read().phase(), SessionPhase::Ready);

    dispatch.call(PracticeIntent::OpenSuspend);
    dispatch.call(PracticeIntent::ConfirmSuspend);
    drive(&mut harness).await;

    // The refused problem is still due remotely; the session skips it.
    assert!(session.read().pending_fetch().is_none());
    assert_eq!(session.read().phase(), SessionPhase::Empty);
    assert_eq!(
        session.read().empty_reason(),
        Some(&EmptyReason::AlreadySuspended(ProblemId::new(1)))
    );
    let html = harness.render();
    assert!(html.contains("inline-error"), "missing error in {html}");
    assert!(
        html.contains("could not suspend problem 1"),
        "missing suspend failure in {html}"
    );
    assert!(html.contains("Check again"), "missing retry in {html}");

    dispatch.call(PracticeIntent::Next);
    drive(&mut harness).await;
    assert!(!harness.render().contains("inline-error"));
    assert!(repo.list_reviews(0, 10).await.expect("list reviews").is_empty());
}
