use chrono::{DateTime, Utc};

use crate::model::ids::ProblemId;

//
// ─── ANALYTICS ────────────────────────────────────────────────────────────────
//

/// Aggregate progress numbers computed by the remote scheduler.
///
/// Ease factor and interval are opaque here; the client only displays them.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub total_problems: u32,
    pub total_reviews: u32,
    /// Percentage in `0.0..=100.0`.
    pub overall_accuracy: f64,
    pub average_ease_factor: f64,
    pub problems_due_today: u32,
    pub problems_due_this_week: u32,
    pub problems_due_this_month: u32,
    pub problems_overdue: u32,
}

/// Per-problem scheduling snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemAnalytics {
    pub problem_id: ProblemId,
    pub problem_name: String,
    pub total_reviews: u32,
    pub correct_reviews: u32,
    pub ease_factor: f64,
    pub current_interval_days: u32,
    pub next_review_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub days_until_due: i64,
}

impl ProblemAnalytics {
    #[must_use]
    pub fn due_status(&self) -> DueStatus {
        DueStatus::from_days_until_due(self.days_until_due)
    }

    /// Share of correct reviews in percent, `None` before the first review.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        if self.total_reviews == 0 {
            return None;
        }
        Some(f64::from(self.correct_reviews) / f64::from(self.total_reviews) * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub summary: AnalyticsSummary,
    pub problems: Vec<ProblemAnalytics>,
    pub generated_at: DateTime<Utc>,
}

//
// ─── DUE STATUS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    DueToday,
    /// Due within the next three days.
    DueSoon(i64),
    Later(i64),
}

impl DueStatus {
    #[must_use]
    pub fn from_days_until_due(days: i64) -> Self {
        match days {
            d if d < 0 => Self::Overdue,
            0 => Self::DueToday,
            d if d <= 3 => Self::DueSoon(d),
            d => Self::Later(d),
        }
    }
}

//
// ─── ACCURACY BAND ────────────────────────────────────────────────────────────
//

/// Coarse bucket used to color accuracy figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    Good,
    Fair,
    Poor,
}

impl AccuracyBand {
    #[must_use]
    pub fn from_percent(accuracy: f64) -> Self {
        if accuracy >= 80.0 {
            Self::Good
        } else if accuracy >= 60.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}
