use practice_core::model::{AccuracyBand, AnalyticsReport, DueStatus, ProblemAnalytics};

use super::time_fmt::format_datetime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Neutral => "tone-neutral",
            Self::Info => "tone-info",
            Self::Success => "tone-success",
            Self::Warning => "tone-warning",
            Self::Error => "tone-error",
        }
    }
}

impl From<AccuracyBand> for Tone {
    fn from(band: AccuracyBand) -> Self {
        match band {
            AccuracyBand::Good => Self::Success,
            AccuracyBand::Fair => Self::Warning,
            AccuracyBand::Poor => Self::Error,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCardVm {
    pub label: &'static str,
    pub value: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DueChipVm {
    pub label: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemRowVm {
    pub id: u64,
    pub name: String,
    pub reviews: String,
    pub accuracy: String,
    pub accuracy_tone: Tone,
    pub ease_factor: String,
    pub interval: String,
    pub due_chip: DueChipVm,
    pub next_review: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub cards: Vec<StatCardVm>,
    pub rows: Vec<ProblemRowVm>,
    pub generated_at: String,
}

/// `bytes_to_bits` -> `Bytes To Bits`.
#[must_use]
pub fn display_problem_name(raw: &str) -> String {
    raw.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn due_chip(status: DueStatus) -> DueChipVm {
    match status {
        DueStatus::Overdue => DueChipVm {
            label: "Overdue".into(),
            tone: Tone::Error,
        },
        DueStatus::DueToday => DueChipVm {
            label: "Due Today".into(),
            tone: Tone::Warning,
        },
        DueStatus::DueSoon(days) => DueChipVm {
            label: format!("Due in {days} days"),
            tone: Tone::Info,
        },
        DueStatus::Later(days) => DueChipVm {
            label: format!("Due in {days} days"),
            tone: Tone::Neutral,
        },
    }
}

fn map_row(problem: &ProblemAnalytics) -> ProblemRowVm {
    let (accuracy, accuracy_tone) = match problem.accuracy() {
        Some(percent) => (
            format!("{percent:.1}%"),
            Tone::from(AccuracyBand::from_percent(percent)),
        ),
        None => ("—".to_string(), Tone::Neutral),
    };
    ProblemRowVm {
        id: problem.problem_id.value(),
        name: display_problem_name(&problem.problem_name),
        reviews: problem.total_reviews.to_string(),
        accuracy,
        accuracy_tone,
        ease_factor: format!("{:.1}", problem.ease_factor),
        interval: problem.current_interval_days.to_string(),
        due_chip: due_chip(problem.due_status()),
        next_review: problem
            .next_review_at
            .map_or_else(|| "—".to_string(), format_datetime),
    }
}

#[must_use]
pub fn map_dashboard(report: &AnalyticsReport) -> DashboardVm {
    let s = &report.summary;
    let count = |label, value: u32, tone| StatCardVm {
        label,
        value: value.to_string(),
        tone,
    };
    let cards = vec![
        count("Total Problems", s.total_problems, Tone::Neutral),
        StatCardVm {
            label: "Overall Accuracy",
            value: format!("{:.1}%", s.overall_accuracy),
            tone: Tone::from(AccuracyBand::from_percent(s.overall_accuracy)),
        },
        StatCardVm {
            label: "Avg Ease Factor",
            value: format!("{:.1}", s.average_ease_factor),
            tone: Tone::Neutral,
        },
        count("Total Reviews", s.total_reviews, Tone::Neutral),
        count("Due Today", s.problems_due_today, Tone::Warning),
        count("Due This Week", s.problems_due_this_week, Tone::Info),
        count("Due This Month", s.problems_due_this_month, Tone::Neutral),
        count("Overdue", s.problems_overdue, Tone::Error),
    ];

    DashboardVm {
        cards,
        rows: report.problems.iter().map(map_row).collect(),
        generated_at: format_datetime(report.generated_at),
    }
}
