mod analytics;
mod catalog;
mod ids;
mod problem;
mod review;
mod tag;

pub use analytics::{
    AccuracyBand, AnalyticsReport, AnalyticsSummary, DueStatus, ProblemAnalytics,
};
pub use catalog::ProblemEntry;
pub use ids::{ParseIdError, ProblemId, ReviewId};
pub use problem::{Problem, ProblemError};
pub use review::{Review, ReviewOutcome};
pub use tag::{TagError, TagName};
