//! In-process backend for offline practice and tests.
//!
//! A problem is due while it is neither suspended nor reviewed. This is a
//! stand-in, not a scheduler: the real due policy lives on the server.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use practice_core::Clock;
use practice_core::model::{
    AnalyticsReport, AnalyticsSummary, Problem, ProblemAnalytics, ProblemEntry, ProblemId, Review,
    ReviewId, ReviewOutcome, TagName,
};

use crate::repository::{
    AnalyticsSource, ProblemCatalog, ProblemSource, ProblemSuspension, ReviewHistory,
    ReviewRecorder, StorageError,
};

/// Ease factor reported for every problem; the in-memory backend has no scheduler.
const NEUTRAL_EASE_FACTOR: f64 = 2.5;

#[derive(Debug, Clone)]
struct StoredProblem {
    entry: ProblemEntry,
    problem: Problem,
}

#[derive(Debug, Default)]
struct MemoryState {
    problems: BTreeMap<ProblemId, StoredProblem>,
    reviews: Vec<Review>,
}

impl MemoryState {
    fn stored_mut(&mut self, id: ProblemId) -> Result<&mut StoredProblem, StorageError> {
        self.problems.get_mut(&id).ok_or(StorageError::NotFound)
    }

    fn reviews_for(&self, id: ProblemId) -> impl Iterator<Item = &Review> {
        self.reviews.iter().filter(move |review| review.problem_id == id)
    }
}

/// Simple in-memory repository implementation for testing and offline use.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
    clock: Clock,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Add (or replace) a problem under the given generator name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the state lock is poisoned.
    pub fn seed_problem(
        &self,
        name: impl Into<String>,
        problem: Problem,
    ) -> Result<(), StorageError> {
        let entry = ProblemEntry::new(problem.id(), name, self.clock.now());
        let mut guard = self.lock()?;
        guard
            .problems
            .insert(problem.id(), StoredProblem { entry, problem });
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl ProblemSource for InMemoryRepository {
    async fn next_due(&self) -> Result<Option<Problem>, StorageError> {
        let guard = self.lock()?;
        let due = guard
            .problems
            .values()
            .filter(|stored| !stored.entry.suspended)
            .find(|stored| guard.reviews_for(stored.problem.id()).next().is_none())
            .map(|stored| stored.problem.clone());
        Ok(due)
    }
}

#[async_trait]
impl ReviewRecorder for InMemoryRepository {
    async fn record_review(&self, outcome: &ReviewOutcome) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if !guard.problems.contains_key(&outcome.problem_id) {
            return Err(StorageError::NotFound);
        }
        let id = ReviewId::new(guard.reviews.len() as u64 + 1);
        guard.reviews.push(Review::new(
            id,
            outcome.problem_id,
            outcome.correct,
            outcome.answered_at,
        ));
        Ok(())
    }
}

#[async_trait]
impl ProblemSuspension for InMemoryRepository {
    async fn suspend(
        &self,
        id: ProblemId,
        reason: Option<&str>,
    ) -> Result<ProblemEntry, StorageError> {
        let mut guard = self.lock()?;
        let stored = guard.stored_mut(id)?;
        stored.entry.suspend(reason);
        Ok(stored.entry.clone())
    }

    async fn unsuspend(&self, id: ProblemId) -> Result<ProblemEntry, StorageError> {
        let mut guard = self.lock()?;
        let stored = guard.stored_mut(id)?;
        stored.entry.unsuspend();
        Ok(stored.entry.clone())
    }

    async fn list_suspended(&self) -> Result<Vec<ProblemEntry>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .problems
            .values()
            .filter(|stored| stored.entry.suspended)
            .map(|stored| stored.entry.clone())
            .collect())
    }
}

#[async_trait]
impl ProblemCatalog for InMemoryRepository {
    async fn list_all(&self) -> Result<Vec<ProblemEntry>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .problems
            .values()
            .map(|stored| stored.entry.clone())
            .collect())
    }

    async fn add_tag(&self, id: ProblemId, tag: &TagName) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.stored_mut(id)?.entry.add_tag(tag.clone());
        Ok(())
    }

    async fn remove_tag(&self, id: ProblemId, tag: &TagName) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.stored_mut(id)?.entry.remove_tag(tag);
        Ok(())
    }

    async fn demo(&self, id: ProblemId) -> Result<Problem, StorageError> {
        let guard = self.lock()?;
        guard
            .problems
            .get(&id)
            .map(|stored| stored.problem.clone())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ReviewHistory for InMemoryRepository {
    async fn list_reviews(&self, skip: u32, limit: u32) -> Result<Vec<Review>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .reviews
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AnalyticsSource for InMemoryRepository {
    async fn analytics(&self) -> Result<AnalyticsReport, StorageError> {
        let guard = self.lock()?;

        let problems: Vec<ProblemAnalytics> = guard
            .problems
            .values()
            .map(|stored| {
                let id = stored.problem.id();
                let total = guard.reviews_for(id).count() as u32;
                let correct = guard.reviews_for(id).filter(|r| r.correct).count() as u32;
                ProblemAnalytics {
                    problem_id: id,
                    problem_name: stored.entry.name.clone(),
                    total_reviews: total,
                    correct_reviews: correct,
                    ease_factor: NEUTRAL_EASE_FACTOR,
                    current_interval_days: 1,
                    next_review_at: None,
                    due_at: None,
                    days_until_due: 0,
                }
            })
            .collect();

        let total_reviews = guard.reviews.len() as u32;
        let correct_reviews = guard.reviews.iter().filter(|r| r.correct).count() as u32;
        let overall_accuracy = if total_reviews == 0 {
            0.0
        } else {
            let percent = f64::from(correct_reviews) / f64::from(total_reviews) * 100.0;
            (percent * 10.0).round() / 10.0
        };
        let problems_due_today = guard
            .problems
            .values()
            .filter(|stored| {
                !stored.entry.suspended && guard.reviews_for(stored.problem.id()).next().is_none()
            })
            .count() as u32;

        Ok(AnalyticsReport {
            summary: AnalyticsSummary {
                total_problems: problems.len() as u32,
                total_reviews,
                overall_accuracy,
                average_ease_factor: NEUTRAL_EASE_FACTOR,
                problems_due_today,
                problems_due_this_week: 0,
                problems_due_this_month: 0,
                problems_overdue: 0,
            },
            problems,
            generated_at: self.clock.now(),
        })
    }
}
