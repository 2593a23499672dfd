use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Problem, ProblemId, ReviewOutcome};

use super::command::{Command, EmptyReason, FetchTicket, ProblemFetch};
use super::grading::{AnswerResult, grade};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Learner actions the current state does not accept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no problem is being shown")]
    NoProblem,
    #[error("option {index} is out of range ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("the result has already been revealed")]
    ResultRevealed,
    #[error("the suspend prompt is open")]
    SuspendPromptOpen,
    #[error("the suspend prompt is not open")]
    NoSuspendPrompt,
}

//
// ─── PHASES ───────────────────────────────────────────────────────────────────
//

/// Primary state of the practice loop. The suspend prompt is an overlay on
/// top of `Ready`, `AnswerSelected` or `ResultShown`, see
/// [`PracticeSession::suspend_prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Ready,
    AnswerSelected,
    ResultShown,
    Empty,
}

/// Ephemeral state of the suspend dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuspendPrompt {
    reason: String,
}

impl SuspendPrompt {
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn normalized_reason(&self) -> Option<String> {
        let trimmed = self.reason.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// State of one practice session.
///
/// Owns every piece of session state and performs no I/O: each transition
/// returns the [`Command`] a driver must execute. Counters only grow for the
/// lifetime of the value.
#[derive(Clone, Default)]
pub struct PracticeSession {
    current_problem: Option<Problem>,
    selected_option: Option<usize>,
    result: Option<AnswerResult>,
    empty_reason: Option<EmptyReason>,
    score_count: u32,
    attempted_count: u32,
    suspend_prompt: Option<SuspendPrompt>,
    pending_fetch: Option<FetchTicket>,
    issued_tickets: u64,
    suspended: HashSet<ProblemId>,
}

impl PracticeSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with pre-set counters, e.g. to resume a tally.
    #[must_use]
    pub fn with_counters(score_count: u32, attempted_count: u32) -> Self {
        Self {
            score_count,
            attempted_count,
            ..Self::default()
        }
    }

    // ─── Queries ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.pending_fetch.is_some() {
            return SessionPhase::Loading;
        }
        if self.empty_reason.is_some() {
            return SessionPhase::Empty;
        }
        match (&self.current_problem, &self.result, self.selected_option) {
            (None, _, _) => SessionPhase::Loading,
            (Some(_), Some(_), _) => SessionPhase::ResultShown,
            (Some(_), None, Some(_)) => SessionPhase::AnswerSelected,
            (Some(_), None, None) => SessionPhase::Ready,
        }
    }

    #[must_use]
    pub fn current_problem(&self) -> Option<&Problem> {
        self.current_problem.as_ref()
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    #[must_use]
    pub fn result(&self) -> Option<&AnswerResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn result_revealed(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn no_problem_available(&self) -> bool {
        self.empty_reason.is_some()
    }

    #[must_use]
    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        self.empty_reason.as_ref()
    }

    #[must_use]
    pub fn score_count(&self) -> u32 {
        self.score_count
    }

    #[must_use]
    pub fn attempted_count(&self) -> u32 {
        self.attempted_count
    }

    #[must_use]
    pub fn suspend_prompt(&self) -> Option<&SuspendPrompt> {
        self.suspend_prompt.as_ref()
    }

    #[must_use]
    pub fn pending_fetch(&self) -> Option<FetchTicket> {
        self.pending_fetch
    }

    /// Options are clickable only before the result is revealed.
    #[must_use]
    pub fn can_select(&self) -> bool {
        self.current_problem.is_some()
            && self.result.is_none()
            && self.pending_fetch.is_none()
            && self.suspend_prompt.is_none()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.can_select() && self.selected_option.is_some()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.suspend_prompt.is_none()
            && matches!(self.phase(), SessionPhase::ResultShown | SessionPhase::Empty)
    }

    // ─── Fetching ──────────────────────────────────────────────────────────

    /// Begin the session by requesting the first problem.
    pub fn start(&mut self) -> Command {
        let ticket = self.begin_fetch();
        Command::FetchProblem { ticket }
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `false` (and changes nothing) when `ticket` is not the
    /// outstanding fetch.
    pub fn receive_problem(&mut self, ticket: FetchTicket, fetch: ProblemFetch) -> bool {
        if self.pending_fetch != Some(ticket) {
            debug!(ticket = ticket.value(), "ignoring stale problem fetch");
            return false;
        }
        self.pending_fetch = None;

        match fetch {
            ProblemFetch::Due(problem) if self.suspended.contains(&problem.id()) => {
                warn!(problem_id = %problem.id(), "source returned a problem suspended in this session");
                self.empty_reason = Some(EmptyReason::AlreadySuspended(problem.id()));
            }
            ProblemFetch::Due(problem) if problem.options().is_empty() => {
                warn!(problem_id = %problem.id(), "source returned a problem without options");
                self.empty_reason = Some(EmptyReason::NoOptions(problem.id()));
            }
            ProblemFetch::Due(problem) => {
                debug!(problem_id = %problem.id(), options = problem.options().len(), "problem ready");
                self.current_problem = Some(problem);
                self.selected_option = None;
                self.result = None;
            }
            ProblemFetch::NothingDue => {
                debug!("no problem due");
                self.empty_reason = Some(EmptyReason::NothingDue);
            }
            ProblemFetch::Failed(failure) => {
                warn!(error = %failure, "problem fetch failed; showing empty queue");
                self.empty_reason = Some(EmptyReason::Failed(failure));
            }
        }
        true
    }

    // ─── Answering ─────────────────────────────────────────────────────────

    /// Select (or re-select) an option. Only the latest selection is graded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when no problem is shown, the result is already
    /// revealed, the suspend prompt is open, or `index` is out of range.
    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        if self.suspend_prompt.is_some() {
            return Err(SessionError::SuspendPromptOpen);
        }
        if self.pending_fetch.is_some() {
            return Err(SessionError::NoProblem);
        }
        let problem = self.current_problem.as_ref().ok_or(SessionError::NoProblem)?;
        if self.result.is_some() {
            return Err(SessionError::ResultRevealed);
        }
        if !problem.has_option(index) {
            return Err(SessionError::OptionOutOfRange {
                index,
                len: problem.options().len(),
            });
        }

        self.selected_option = Some(index);
        Ok(())
    }

    /// Grade the current selection.
    ///
    /// Returns the review to record, or `None` when submitting is not enabled
    /// (nothing selected, no problem, or already graded).
    pub fn submit(&mut self, answered_at: DateTime<Utc>) -> Option<Command> {
        if !self.can_submit() {
            return None;
        }
        let problem = self.current_problem.as_ref()?;
        let selected = self.selected_option?;

        let result = grade(problem, selected);
        self.attempted_count = self.attempted_count.saturating_add(1);
        if result.is_correct {
            self.score_count = self.score_count.saturating_add(1);
        }
        debug!(
            problem_id = %result.problem_id,
            correct = result.is_correct,
            score = self.score_count,
            attempted = self.attempted_count,
            "answer graded"
        );

        let outcome = ReviewOutcome::new(result.problem_id, result.is_correct, answered_at);
        self.result = Some(result);
        Some(Command::RecordReview(outcome))
    }

    /// Move on after a graded answer, or retry from the empty state.
    pub fn next(&mut self) -> Option<Command> {
        if !self.can_advance() {
            return None;
        }
        let ticket = self.begin_fetch();
        Some(Command::FetchProblem { ticket })
    }

    // ─── Suspending ────────────────────────────────────────────────────────

    /// Open the suspend prompt over the current problem.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoProblem` when there is nothing to suspend.
    pub fn open_suspend(&mut self) -> Result<(), SessionError> {
        if self.pending_fetch.is_some() || self.current_problem.is_none() {
            return Err(SessionError::NoProblem);
        }
        if self.suspend_prompt.is_none() {
            self.suspend_prompt = Some(SuspendPrompt::default());
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoSuspendPrompt` if the prompt is closed.
    pub fn set_suspend_reason(&mut self, reason: impl Into<String>) -> Result<(), SessionError> {
        let prompt = self
            .suspend_prompt
            .as_mut()
            .ok_or(SessionError::NoSuspendPrompt)?;
        prompt.reason = reason.into();
        Ok(())
    }

    /// Close the prompt and drop the reason; the underlying state is untouched.
    pub fn cancel_suspend(&mut self) -> bool {
        self.suspend_prompt.take().is_some()
    }

    /// Suspend the current problem and move on to the next one.
    ///
    /// The current attempt is abandoned without recording an outcome.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSuspendPrompt` if the prompt is closed.
    pub fn confirm_suspend(&mut self) -> Result<Command, SessionError> {
        let reason = self
            .suspend_prompt
            .as_ref()
            .ok_or(SessionError::NoSuspendPrompt)?
            .normalized_reason();
        let problem_id = self
            .current_problem
            .as_ref()
            .map(Problem::id)
            .ok_or(SessionError::NoProblem)?;

        self.suspended.insert(problem_id);
        debug!(%problem_id, has_reason = reason.is_some(), "problem suspended");

        let then = self.begin_fetch();
        Ok(Command::SuspendProblem {
            problem_id,
            reason,
            then,
        })
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_tickets += 1;
        let ticket = FetchTicket::new(self.issued_tickets);

        self.current_problem = None;
        self.selected_option = None;
        self.result = None;
        self.empty_reason = None;
        self.suspend_prompt = None;
        self.pending_fetch = Some(ticket);
        ticket
    }
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("phase", &self.phase())
            .field("problem_id", &self.current_problem.as_ref().map(Problem::id))
            .field("selected_option", &self.selected_option)
            .field("score_count", &self.score_count)
            .field("attempted_count", &self.attempted_count)
            .field("suspend_prompt", &self.suspend_prompt.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
