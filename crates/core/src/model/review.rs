use chrono::{DateTime, Utc};

use crate::model::ids::{ProblemId, ReviewId};

//
// ─── REVIEW OUTCOME ───────────────────────────────────────────────────────────
//

/// A graded attempt, handed to the review recorder.
///
/// There is no partial credit: an attempt is either correct or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub problem_id: ProblemId,
    pub correct: bool,
    pub answered_at: DateTime<Utc>,
}

impl ReviewOutcome {
    #[must_use]
    pub fn new(problem_id: ProblemId, correct: bool, answered_at: DateTime<Utc>) -> Self {
        Self {
            problem_id,
            correct,
            answered_at,
        }
    }
}

//
// ─── REVIEW ───────────────────────────────────────────────────────────────────
//

/// A review as recorded by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub problem_id: ProblemId,
    pub correct: bool,
    pub created_at: DateTime<Utc>,
}

impl Review {
    #[must_use]
    pub fn new(
        id: ReviewId,
        problem_id: ProblemId,
        correct: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            problem_id,
            correct,
            created_at,
        }
    }
}
