use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use practice_core::model::{Problem, ProblemEntry, ProblemId, ReviewOutcome};
use practice_core::session::{EmptyReason, FetchFailure, PracticeSession, SessionPhase};
use practice_core::time::fixed_now;
use services::{Clock, PracticeConfig, PracticeError, PracticeLoopService};
use storage::repository::{ProblemSource, ProblemSuspension, ReviewRecorder, StorageError};

//
// ─── FAKES ────────────────────────────────────────────────────────────────────
//

/// Hands out queued responses, then reports nothing due.
#[derive(Default)]
struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Option<Problem>, StorageError>>>,
    calls: Mutex<u32>,
}

impl ScriptedSource {
    fn with(responses: Vec<Result<Option<Problem>, StorageError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(0),
        })
    }

    fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ProblemSource for ScriptedSource {
    async fn next_due(&self) -> Result<Option<Problem>, StorageError> {
        *self.calls.lock().unwrap() += 1;
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

struct StalledSource;

#[async_trait]
impl ProblemSource for StalledSource {
    async fn next_due(&self) -> Result<Option<Problem>, StorageError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }
}

#[derive(Default)]
struct RecordingReviews {
    recorded: Mutex<Vec<ReviewOutcome>>,
    fail: bool,
}

#[async_trait]
impl ReviewRecorder for RecordingReviews {
    async fn record_review(&self, outcome: &ReviewOutcome) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Connection("offline".into()));
        }
        self.recorded.lock().unwrap().push(*outcome);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSuspensions {
    calls: Mutex<Vec<(ProblemId, Option<String>)>>,
    fail: bool,
}

#[async_trait]
impl ProblemSuspension for RecordingSuspensions {
    async fn suspend(
        &self,
        id: ProblemId,
        reason: Option<&str>,
    ) -> Result<ProblemEntry, StorageError> {
        self.calls
            .lock()
            .unwrap()
            .push((id, reason.map(ToOwned::to_owned)));
        if self.fail {
            return Err(StorageError::Status(500));
        }
        let mut entry = ProblemEntry::new(id, "fake", fixed_now());
        entry.suspend(reason);
        Ok(entry)
    }

    async fn unsuspend(&self, id: ProblemId) -> Result<ProblemEntry, StorageError> {
        Ok(ProblemEntry::new(id, "fake", fixed_now()))
    }

    async fn list_suspended(&self) -> Result<Vec<ProblemEntry>, StorageError> {
        Ok(Vec::new())
    }
}

fn two_plus_two() -> Problem {
    Problem::new(
        ProblemId::new(1),
        "2+2=?",
        vec!["3".into(), "4".into(), "5".into()],
        1,
    )
    .unwrap()
}

fn other_problem() -> Problem {
    Problem::new(ProblemId::new(2), "3+3=?", vec!["6".into(), "7".into()], 0).unwrap()
}

struct Harness {
    service: PracticeLoopService,
    reviews: Arc<RecordingReviews>,
    suspensions: Arc<RecordingSuspensions>,
}

fn harness(
    problems: Arc<dyn ProblemSource>,
    reviews: RecordingReviews,
    suspensions: RecordingSuspensions,
) -> Harness {
    let reviews = Arc::new(reviews);
    let suspensions = Arc::new(suspensions);
    let service = PracticeLoopService::new(
        Clock::fixed(fixed_now()),
        problems,
        Arc::clone(&reviews) as Arc<dyn ReviewRecorder>,
        Arc::clone(&suspensions) as Arc<dyn ProblemSuspension>,
    );
    Harness {
        service,
        reviews,
        suspensions,
    }
}

//
// ─── SCENARIOS ────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn correct_answer_is_scored_and_recorded() {
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two()))]);
    let h = harness(source, RecordingReviews::default(), RecordingSuspensions::default());
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    assert_eq!(session.phase(), SessionPhase::Ready);

    session.select_option(1).unwrap();
    let submission = h.service.submit(&mut session).expect("submit enabled");
    assert!(submission.result.is_correct);
    submission.delivery.await.unwrap();

    assert_eq!(session.score_count(), 1);
    assert_eq!(session.attempted_count(), 1);
    let recorded = h.reviews.recorded.lock().unwrap().clone();
    assert_eq!(
        recorded,
        vec![ReviewOutcome::new(ProblemId::new(1), true, fixed_now())]
    );
}

#[tokio::test]
async fn wrong_answer_reveals_correct_option() {
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two()))]);
    let h = harness(source, RecordingReviews::default(), RecordingSuspensions::default());
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    session.select_option(0).unwrap();
    let submission = h.service.submit(&mut session).unwrap();
    submission.delivery.await.unwrap();

    assert!(!submission.result.is_correct);
    assert_eq!(submission.result.correct_answer.as_deref(), Some("4"));
    assert_eq!(session.score_count(), 0);
    assert_eq!(session.attempted_count(), 1);
    assert!(!h.reviews.recorded.lock().unwrap()[0].correct);
}

#[tokio::test]
async fn empty_response_shows_empty_state() {
    let source = ScriptedSource::with(vec![Ok(None)]);
    let h = harness(source, RecordingReviews::default(), RecordingSuspensions::default());
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    assert_eq!(session.phase(), SessionPhase::Empty);
    assert!(session.no_problem_available());
    assert_eq!(session.empty_reason(), Some(&EmptyReason::NothingDue));
}

#[tokio::test]
async fn suspend_sends_reason_then_fetches_next_problem() {
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two())), Ok(Some(other_problem()))]);
    let h = harness(
        Arc::clone(&source) as Arc<dyn ProblemSource>,
        RecordingReviews::default(),
        RecordingSuspensions::default(),
    );
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    session.open_suspend().unwrap();
    session.set_suspend_reason("ambiguous wording").unwrap();
    h.service.confirm_suspend(&mut session).await.unwrap();

    assert_eq!(
        *h.suspensions.calls.lock().unwrap(),
        vec![(ProblemId::new(1), Some("ambiguous wording".to_string()))]
    );
    assert_eq!(source.calls(), 2);
    assert_eq!(
        session.current_problem().map(Problem::id),
        Some(ProblemId::new(2))
    );
    assert_eq!(session.attempted_count(), 0);
    assert!(h.reviews.recorded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn last_selection_wins() {
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two()))]);
    let h = harness(source, RecordingReviews::default(), RecordingSuspensions::default());
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    session.select_option(2).unwrap();
    session.select_option(0).unwrap();
    let submission = h.service.submit(&mut session).unwrap();
    assert_eq!(submission.result.selected, 0);
    assert!(!submission.result.is_correct);
}

//
// ─── FAILURE PATHS ────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn record_failure_does_not_block_the_session() {
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two())), Ok(Some(other_problem()))]);
    let reviews = RecordingReviews {
        fail: true,
        ..RecordingReviews::default()
    };
    let h = harness(source, reviews, RecordingSuspensions::default());
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    session.select_option(1).unwrap();
    let submission = h.service.submit(&mut session).unwrap();
    submission.delivery.await.unwrap();

    assert_eq!(session.score_count(), 1);
    assert!(h.service.next(&mut session).await);
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn resubmitting_dispatches_nothing() {
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two()))]);
    let h = harness(source, RecordingReviews::default(), RecordingSuspensions::default());
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    session.select_option(1).unwrap();
    h.service.submit(&mut session).unwrap().delivery.await.unwrap();
    assert!(h.service.submit(&mut session).is_none());
    assert_eq!(h.reviews.recorded.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn stalled_fetch_times_out_to_empty() {
    let h = harness(
        Arc::new(StalledSource),
        RecordingReviews::default(),
        RecordingSuspensions::default(),
    );
    let service = h
        .service
        .with_config(PracticeConfig::with_fetch_timeout(Duration::from_secs(10)));
    let mut session = PracticeSession::new();

    service.start(&mut session).await;
    assert_eq!(session.phase(), SessionPhase::Empty);
    assert_eq!(
        session.empty_reason(),
        Some(&EmptyReason::Failed(FetchFailure::Timeout))
    );
}

#[tokio::test]
async fn malformed_and_transport_failures_become_empty() {
    let source = ScriptedSource::with(vec![
        Err(StorageError::Serialization("missing id".into())),
        Err(StorageError::Status(502)),
    ]);
    let h = harness(source, RecordingReviews::default(), RecordingSuspensions::default());
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    assert!(matches!(
        session.empty_reason(),
        Some(EmptyReason::Failed(FetchFailure::Malformed(_)))
    ));

    assert!(h.service.next(&mut session).await);
    assert!(matches!(
        session.empty_reason(),
        Some(EmptyReason::Failed(FetchFailure::Transport(_)))
    ));
}

#[tokio::test]
async fn failed_suspend_is_reported_but_session_advances() {
    // The server did not suspend, so it hands the same problem back.
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two())), Ok(Some(two_plus_two()))]);
    let suspensions = RecordingSuspensions {
        fail: true,
        ..RecordingSuspensions::default()
    };
    let h = harness(source, RecordingReviews::default(), suspensions);
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    session.open_suspend().unwrap();
    let err = h.service.confirm_suspend(&mut session).await.unwrap_err();

    assert!(matches!(
        err,
        PracticeError::SuspendFailed {
            problem_id,
            source: StorageError::Status(500),
        } if problem_id == ProblemId::new(1)
    ));
    assert_eq!(session.phase(), SessionPhase::Empty);
    assert_eq!(
        session.empty_reason(),
        Some(&EmptyReason::AlreadySuspended(ProblemId::new(1)))
    );
}

#[tokio::test]
async fn confirm_without_prompt_is_rejected() {
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two()))]);
    let h = harness(
        Arc::clone(&source) as Arc<dyn ProblemSource>,
        RecordingReviews::default(),
        RecordingSuspensions::default(),
    );
    let mut session = PracticeSession::new();

    h.service.start(&mut session).await;
    assert!(matches!(
        h.service.confirm_suspend(&mut session).await,
        Err(PracticeError::Session(_))
    ));
    assert_eq!(source.calls(), 1);
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn split_primitives_drop_stale_fetches() {
    let source = ScriptedSource::with(vec![Ok(Some(two_plus_two())), Ok(Some(other_problem()))]);
    let h = harness(source, RecordingReviews::default(), RecordingSuspensions::default());
    let mut session = PracticeSession::new();

    let practice_core::session::Command::FetchProblem { ticket: first } = session.start() else {
        panic!("start must fetch");
    };
    let stale = h.service.fetch_problem().await;

    // The learner retried before the first fetch landed.
    let practice_core::session::Command::FetchProblem { ticket: second } = session.start() else {
        panic!("start must fetch");
    };
    let fresh = h.service.fetch_problem().await;

    assert!(session.receive_problem(second, fresh));
    assert!(!session.receive_problem(first, stale));
    assert_eq!(
        session.current_problem().map(Problem::id),
        Some(ProblemId::new(2))
    );
}
