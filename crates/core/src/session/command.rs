use thiserror::Error;

use crate::model::{Problem, ProblemId, ReviewOutcome};

/// Identifies one outstanding problem fetch.
///
/// Completions carrying any other ticket are stale and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What the problem source produced for a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemFetch {
    Due(Problem),
    NothingDue,
    Failed(FetchFailure),
}

/// Why a fetch failed. The session treats every variant as "nothing due".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchFailure {
    #[error("problem fetch timed out")]
    Timeout,
    #[error("problem fetch failed: {0}")]
    Transport(String),
    #[error("problem payload was malformed: {0}")]
    Malformed(String),
}

/// Why the session ended up in the empty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    NothingDue,
    Failed(FetchFailure),
    /// The source handed back a problem suspended earlier in this session.
    AlreadySuspended(ProblemId),
    /// The source handed back a problem with nothing to choose from.
    NoOptions(ProblemId),
}

/// Side effect requested by a session transition.
///
/// The session never performs I/O; a driver executes these against the
/// collaborators and feeds fetch results back via `receive_problem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchProblem {
        ticket: FetchTicket,
    },
    /// Fire-and-forget: the session does not wait for, or hear about, delivery.
    RecordReview(ReviewOutcome),
    /// Suspend, then fetch with `then`.
    SuspendProblem {
        problem_id: ProblemId,
        reason: Option<String>,
        then: FetchTicket,
    },
}
