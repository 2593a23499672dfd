use practice_core::model::{Problem, ProblemId, ReviewOutcome};
use practice_core::time::fixed_now;
use services::{AppServices, CatalogError, Clock, PracticeConfig, ReviewPage};
use storage::repository::{ReviewRecorder, Storage};
use storage::InMemoryRepository;

fn seeded_repo() -> InMemoryRepository {
    let repo = InMemoryRepository::new().with_clock(Clock::fixed(fixed_now()));
    for id in 1..=3 {
        let problem = Problem::new(
            ProblemId::new(id),
            format!("{id} x 2 = ?"),
            vec![(id * 2).to_string(), (id * 3).to_string()],
            0,
        )
        .unwrap();
        repo.seed_problem("doubling", problem).unwrap();
    }
    repo
}

#[tokio::test]
async fn catalog_suspend_round_trip() {
    let repo = seeded_repo();
    let services = AppServices::new(
        &Storage::from_backend(repo),
        Clock::fixed(fixed_now()),
        PracticeConfig::default(),
    );
    let catalog = services.catalog();

    let entry = catalog
        .suspend(ProblemId::new(2), Some("   "))
        .await
        .unwrap();
    assert!(entry.suspended);
    assert_eq!(entry.suspend_reason, None);

    let suspended = catalog.list_suspended().await.unwrap();
    assert_eq!(suspended.len(), 1);

    let restored = catalog.toggle_suspended(&suspended[0]).await.unwrap();
    assert!(!restored.suspended);
    assert!(catalog.list_suspended().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_tags_are_rejected_before_storage() {
    let services = AppServices::new(
        &Storage::from_backend(seeded_repo()),
        Clock::fixed(fixed_now()),
        PracticeConfig::default(),
    );
    let catalog = services.catalog();

    assert!(matches!(
        catalog.add_tag(ProblemId::new(1), "  ").await,
        Err(CatalogError::Tag(_))
    ));
    let tag = catalog.add_tag(ProblemId::new(1), " units ").await.unwrap();
    assert_eq!(tag.as_str(), "units");

    let all = catalog.list_all().await.unwrap();
    assert!(all[0].has_tag(&tag));
    assert!(matches!(
        catalog.add_tag(ProblemId::new(42), "units").await,
        Err(CatalogError::Storage(_))
    ));
}

#[tokio::test]
async fn practice_through_in_memory_backend_updates_progress() {
    let repo = seeded_repo();
    let services = AppServices::new(
        &Storage::from_backend(repo.clone()),
        Clock::fixed(fixed_now()),
        PracticeConfig::default(),
    );
    let practice = services.practice();
    let mut session = practice_core::session::PracticeSession::new();

    practice.start(&mut session).await;
    for _ in 0..3 {
        session.select_option(0).unwrap();
        practice
            .submit(&mut session)
            .unwrap()
            .delivery
            .await
            .unwrap();
        practice.next(&mut session).await;
    }
    assert!(session.no_problem_available());
    assert_eq!(session.score_count(), 3);

    repo.record_review(&ReviewOutcome::new(ProblemId::new(1), false, fixed_now()))
        .await
        .unwrap();

    let progress = services.progress();
    let report = progress.analytics().await.unwrap();
    assert_eq!(report.summary.total_reviews, 4);
    assert_eq!(report.summary.overall_accuracy, 75.0);

    let page = progress.reviews(ReviewPage::first(2).next_page()).await.unwrap();
    assert_eq!(page.len(), 2);
    assert!(!page[1].correct);
}
