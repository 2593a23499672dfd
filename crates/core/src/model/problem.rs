use thiserror::Error;

use crate::model::ids::ProblemId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a problem payload cannot be turned into a `Problem`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("problem is missing an id")]
    MissingId,
    #[error("problem is missing a question")]
    MissingQuestion,
    #[error("problem question cannot be empty")]
    EmptyQuestion,
    #[error("problem options must be a sequence")]
    InvalidOptions,
    #[error("problem is missing the correct option index")]
    MissingCorrect,
}

//
// ─── PROBLEM ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice practice item.
///
/// Problems are produced by a `ProblemSource` and never mutated afterwards.
/// `correct` is usually a valid index into `options`, but nothing here relies
/// on it: an out-of-range index simply means no option grades as correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    id: ProblemId,
    question: String,
    options: Vec<String>,
    correct: usize,
    solution_explanation: Option<String>,
}

impl Problem {
    /// Build a problem from already-decoded fields.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::EmptyQuestion` if the question is blank.
    pub fn new(
        id: ProblemId,
        question: impl Into<String>,
        options: Vec<String>,
        correct: usize,
    ) -> Result<Self, ProblemError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(ProblemError::EmptyQuestion);
        }

        Ok(Self {
            id,
            question,
            options,
            correct,
            solution_explanation: None,
        })
    }

    /// Attach a markup-formatted explanation, shown once the result is revealed.
    #[must_use]
    pub fn with_explanation(mut self, explanation: Option<String>) -> Self {
        self.solution_explanation = explanation.filter(|text| !text.trim().is_empty());
        self
    }

    #[must_use]
    pub fn id(&self) -> ProblemId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn solution_explanation(&self) -> Option<&str> {
        self.solution_explanation.as_deref()
    }

    /// Text of the correct option, if `correct` points inside `options`.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct).map(String::as_str)
    }

    #[must_use]
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }
}
