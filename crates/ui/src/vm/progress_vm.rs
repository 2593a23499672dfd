use practice_core::model::Review;

use super::time_fmt::format_datetime;

pub const NO_REVIEWS_MESSAGE: &str = "No items to display.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub id: u64,
    pub problem_id: u64,
    pub outcome: &'static str,
    pub correct: bool,
    pub recorded_at: String,
}

#[must_use]
pub fn map_review_rows(reviews: &[Review]) -> Vec<ReviewRowVm> {
    reviews
        .iter()
        .map(|review| ReviewRowVm {
            id: review.id.value(),
            problem_id: review.problem_id.value(),
            outcome: if review.correct { "Correct" } else { "Incorrect" },
            correct: review.correct,
            recorded_at: format_datetime(review.created_at),
        })
        .collect()
}
