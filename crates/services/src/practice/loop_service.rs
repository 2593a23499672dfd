use std::sync::Arc;

use practice_core::model::{ProblemId, ReviewOutcome};
use practice_core::session::{
    AnswerResult, Command, FetchFailure, FetchTicket, PracticeSession, ProblemFetch,
};
use storage::repository::{ProblemSource, ProblemSuspension, ReviewRecorder, StorageError};
use tokio::task::JoinHandle;

use super::PracticeConfig;
use crate::Clock;
use crate::error::PracticeError;

/// A graded answer plus the background delivery of its review.
///
/// Dropping `delivery` does not cancel it; callers normally ignore it.
#[derive(Debug)]
pub struct Submission {
    pub result: AnswerResult,
    pub delivery: JoinHandle<()>,
}

/// Drives a `PracticeSession` against the remote collaborators.
///
/// Each learner action has two forms. The `&mut PracticeSession` methods run
/// a whole transition. The split primitives (`fetch_problem`, `record`,
/// `suspend`) let a UI apply the transition itself and await I/O without
/// holding the session, relying on fetch tickets to drop stale results.
#[derive(Clone)]
pub struct PracticeLoopService {
    clock: Clock,
    config: PracticeConfig,
    problems: Arc<dyn ProblemSource>,
    reviews: Arc<dyn ReviewRecorder>,
    suspensions: Arc<dyn ProblemSuspension>,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        problems: Arc<dyn ProblemSource>,
        reviews: Arc<dyn ReviewRecorder>,
        suspensions: Arc<dyn ProblemSuspension>,
    ) -> Self {
        Self {
            clock,
            config: PracticeConfig::default(),
            problems,
            reviews,
            suspensions,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: PracticeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> PracticeConfig {
        self.config
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    // ─── Primitives ────────────────────────────────────────────────────────

    /// Ask the problem source for the next due problem.
    ///
    /// Never fails: errors and timeouts come back as `ProblemFetch::Failed`.
    pub async fn fetch_problem(&self) -> ProblemFetch {
        let fetched =
            tokio::time::timeout(self.config.fetch_timeout, self.problems.next_due()).await;
        match fetched {
            Ok(Ok(Some(problem))) => ProblemFetch::Due(problem),
            Ok(Ok(None)) => ProblemFetch::NothingDue,
            Ok(Err(StorageError::Serialization(detail))) => {
                ProblemFetch::Failed(FetchFailure::Malformed(detail))
            }
            Ok(Err(e)) => ProblemFetch::Failed(FetchFailure::Transport(e.to_string())),
            Err(_) => {
                tracing::warn!(timeout = ?self.config.fetch_timeout, "problem fetch timed out");
                ProblemFetch::Failed(FetchFailure::Timeout)
            }
        }
    }

    /// Deliver a review in the background. Failures are logged, never retried.
    pub fn record(&self, outcome: ReviewOutcome) -> JoinHandle<()> {
        let reviews = Arc::clone(&self.reviews);
        tokio::spawn(async move {
            match reviews.record_review(&outcome).await {
                Ok(()) => tracing::debug!(
                    problem_id = %outcome.problem_id,
                    correct = outcome.correct,
                    "review recorded"
                ),
                Err(e) => tracing::warn!(
                    problem_id = %outcome.problem_id,
                    error = %e,
                    "failed to record review"
                ),
            }
        })
    }

    /// Suspend a problem remotely.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::SuspendFailed` if the suspension service rejects the call.
    pub async fn suspend(
        &self,
        problem_id: ProblemId,
        reason: Option<&str>,
    ) -> Result<(), PracticeError> {
        match self.suspensions.suspend(problem_id, reason).await {
            Ok(_) => {
                tracing::info!(%problem_id, "problem suspended");
                Ok(())
            }
            Err(source) => {
                tracing::warn!(%problem_id, error = %source, "failed to suspend problem");
                Err(PracticeError::SuspendFailed { problem_id, source })
            }
        }
    }

    // ─── Session transitions ───────────────────────────────────────────────

    /// Start the session and wait for the first problem.
    pub async fn start(&self, session: &mut PracticeSession) {
        let Command::FetchProblem { ticket } = session.start() else {
            return;
        };
        self.load(session, ticket).await;
    }

    /// Advance past a graded problem (or retry from empty).
    ///
    /// Returns `false` when the session cannot advance right now.
    pub async fn next(&self, session: &mut PracticeSession) -> bool {
        let Some(Command::FetchProblem { ticket }) = session.next() else {
            return false;
        };
        self.load(session, ticket).await;
        true
    }

    /// Grade the current selection and dispatch its review.
    ///
    /// Returns `None` when submitting is not enabled.
    pub fn submit(&self, session: &mut PracticeSession) -> Option<Submission> {
        let Some(Command::RecordReview(outcome)) = session.submit(self.clock.now()) else {
            return None;
        };
        let result = session.result()?.clone();
        Some(Submission {
            result,
            delivery: self.record(outcome),
        })
    }

    /// Suspend the current problem, then always fetch the next one.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Session` if the suspend prompt is not open
    /// (nothing happens in that case), or `PracticeError::SuspendFailed`
    /// after the session has already moved on to the next problem.
    pub async fn confirm_suspend(
        &self,
        session: &mut PracticeSession,
    ) -> Result<(), PracticeError> {
        let Command::SuspendProblem {
            problem_id,
            reason,
            then,
        } = session.confirm_suspend()?
        else {
            return Ok(());
        };

        let suspended = self.suspend(problem_id, reason.as_deref()).await;
        self.load(session, then).await;
        suspended
    }

    async fn load(&self, session: &mut PracticeSession, ticket: FetchTicket) {
        let fetch = self.fetch_problem().await;
        session.receive_problem(ticket, fetch);
    }
}
