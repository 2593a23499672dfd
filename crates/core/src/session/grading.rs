use crate::model::{Problem, ProblemId};

/// Result of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub problem_id: ProblemId,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    /// `None` when the problem's correct index points outside its options.
    pub correct_answer: Option<String>,
}

/// Grade a selection: exact index match, no partial credit.
#[must_use]
pub fn grade(problem: &Problem, selected: usize) -> AnswerResult {
    let correct_index = problem.correct_index();
    AnswerResult {
        problem_id: problem.id(),
        selected,
        correct_index,
        is_correct: problem.has_option(selected) && selected == correct_index,
        correct_answer: problem.correct_option().map(ToOwned::to_owned),
    }
}
