use async_trait::async_trait;
use practice_core::Clock;
use practice_core::model::{
    AnalyticsReport, Problem, ProblemEntry, ProblemId, Review, ReviewOutcome, TagName,
};
use practice_core::time::fixed_now;
use storage::repository::{
    AnalyticsSource, ProblemCatalog, ProblemSource, ProblemSuspension, ReviewHistory,
    ReviewRecorder, Storage, StorageError,
};
use storage::InMemoryRepository;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

fn seeded_repo() -> InMemoryRepository {
    let repo = InMemoryRepository::new().with_clock(Clock::fixed(fixed_now()));
    let problem = Problem::new(
        ProblemId::new(1),
        "What is $2^{10}$?",
        vec!["1000".into(), "1024".into(), "2048".into()],
        1,
    )
    .unwrap();
    repo.seed_problem("powers_of_two", problem).unwrap();
    repo
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_first_problem() {
    let mut harness = setup_view_harness(ViewKind::Practice, seeded_repo());
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Score: 0/0"), "missing score in {html}");
    assert!(html.contains("1024"), "missing option in {html}");
    assert!(html.contains("math-inline"), "missing math markup in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Practice, InMemoryRepository::new());
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No problems due right now."), "missing empty text in {html}");
    assert!(html.contains("Check again"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_rows() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, seeded_repo());
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Total Problems"), "missing summary card in {html}");
    assert!(html.contains("Powers Of Two"), "missing problem row in {html}");
    assert!(html.contains("Due Today"), "missing due chip in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn browse_view_smoke_renders_tags() {
    let repo = seeded_repo();
    repo.add_tag(ProblemId::new(1), &TagName::new("binary").unwrap())
        .await
        .unwrap();
    let mut harness = setup_view_harness(ViewKind::Browse, repo);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Browse problems"), "missing title in {html}");
    assert!(html.contains("binary"), "missing tag in {html}");
    assert!(html.contains("Suspend"), "missing toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn suspended_view_smoke_lists_reason() {
    let repo = seeded_repo();
    repo.suspend(ProblemId::new(1), Some("too easy")).await.unwrap();
    let mut harness = setup_view_harness(ViewKind::Suspended, repo);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Reason: too easy"), "missing reason in {html}");
    assert!(html.contains("Unsuspend"), "missing action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_empty_history() {
    let mut harness = setup_view_harness(ViewKind::Progress, seeded_repo());
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No items to display."), "missing empty text in {html}");
}

#[derive(Clone)]
struct Unreachable;

#[async_trait]
impl AnalyticsSource for Unreachable {
    async fn analytics(&self) -> Result<AnalyticsReport, StorageError> {
        Err(StorageError::Connection("refused".into()))
    }
}

#[async_trait]
impl ReviewHistory for Unreachable {
    async fn list_reviews(&self, _skip: u32, _limit: u32) -> Result<Vec<Review>, StorageError> {
        Err(StorageError::Connection("refused".into()))
    }
}

#[async_trait]
impl ProblemSource for Unreachable {
    async fn next_due(&self) -> Result<Option<Problem>, StorageError> {
        Err(StorageError::Connection("refused".into()))
    }
}

#[async_trait]
impl ReviewRecorder for Unreachable {
    async fn record_review(&self, _outcome: &ReviewOutcome) -> Result<(), StorageError> {
        Err(StorageError::Connection("refused".into()))
    }
}

#[async_trait]
impl ProblemSuspension for Unreachable {
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

#[async_trait]
impl ProblemCatalog for Unreachable {
    async fn list_all(&self) -> Result<Vec<ProblemEntry>, StorageError> {
        Err(StorageError::Connection("refused".into()))
    }

    async fn add_tag(&self, _id: ProblemId, _tag: &TagName) -> Result<(), StorageError> {
        Err(StorageError::Connection("refused".into()))
    }

    async fn remove_tag(&self, _id: ProblemId, _tag: &TagName) -> Result<(), StorageError> {
        Err(StorageError::Connection("refused".into()))
    }

    async fn demo(&self, _id: ProblemId) -> Result<Problem, StorageError> {
        Err(StorageError::Connection("refused".into()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_error_state() {
    let storage = Storage::from_backend(Unreachable);
    let mut harness = setup_view_harness_with_storage(ViewKind::Dashboard, storage);
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Something went wrong. Please try again."),
        "missing error text in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_treats_fetch_failure_as_empty() {
    let storage = Storage::from_backend(Unreachable);
    let mut harness = setup_view_harness_with_storage(ViewKind::Practice, storage);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No problems due right now."), "missing empty text in {html}");
}
