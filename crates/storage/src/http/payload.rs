//! Wire DTOs and their mapping into core types.
//!
//! The server emits naive ISO timestamps (no offset); they are read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use practice_core::model::{
    AnalyticsReport, AnalyticsSummary, Problem, ProblemAnalytics, ProblemEntry, ProblemError,
    ProblemId, Review, ReviewId, TagName,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| StorageError::Serialization(format!("invalid timestamp {raw:?}: {e}")))
}

fn parse_optional_timestamp(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, StorageError> {
    raw.map(parse_timestamp).transpose()
}

//
// ─── DUE PROBLEM ──────────────────────────────────────────────────────────────
//

/// Decode the body of `GET api/problems/`.
///
/// `{}` (or `null`) means nothing is due. Anything else must be a complete
/// problem; a partial one is a `Serialization` error rather than `None`.
pub(crate) fn decode_due_problem(body: &Value) -> Result<Option<Problem>, StorageError> {
    match body {
        Value::Null => Ok(None),
        Value::Object(fields) if fields.is_empty() => Ok(None),
        Value::Object(_) => decode_problem(body).map(Some),
        other => Err(ser(format!("expected a problem object, got {other}"))),
    }
}

pub(crate) fn decode_problem(body: &Value) -> Result<Problem, StorageError> {
    let id = body
        .get("id")
        .and_then(Value::as_u64)
        .ok_or(ProblemError::MissingId)
        .map_err(ser)?;
    let question = body
        .get("question")
        .and_then(Value::as_str)
        .ok_or(ProblemError::MissingQuestion)
        .map_err(ser)?;
    let options = body
        .get("options")
        .and_then(Value::as_array)
        .ok_or(ProblemError::InvalidOptions)
        .map_err(ser)?
        .iter()
        .map(option_text)
        .collect::<Result<Vec<_>, _>>()?;
    let correct = body
        .get("correct")
        .and_then(Value::as_u64)
        .ok_or(ProblemError::MissingCorrect)
        .map_err(ser)?;
    let correct = usize::try_from(correct).map_err(|_| ser(ProblemError::MissingCorrect))?;
    let explanation = body
        .get("solution_explanation")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    Problem::new(ProblemId::new(id), question, options, correct)
        .map(|problem| problem.with_explanation(explanation))
        .map_err(ser)
}

/// Options are usually strings, but generators sometimes emit bare numbers.
fn option_text(value: &Value) -> Result<String, StorageError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ser(ProblemError::InvalidOptions)),
    }
}

//
// ─── PROBLEM ENTRIES ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TagPayload {
    Name(String),
    Object { name: String },
}

impl TagPayload {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProblemEntryPayload {
    id: u64,
    name: String,
    created_date: String,
    #[serde(default)]
    suspended: bool,
    #[serde(default)]
    suspend_reason: Option<String>,
    #[serde(default)]
    tags: Vec<TagPayload>,
}

impl TryFrom<ProblemEntryPayload> for ProblemEntry {
    type Error = StorageError;

    fn try_from(payload: ProblemEntryPayload) -> Result<Self, Self::Error> {
        let mut entry = ProblemEntry::new(
            ProblemId::new(payload.id),
            payload.name,
            parse_timestamp(&payload.created_date)?,
        );
        if payload.suspended {
            entry.suspend(payload.suspend_reason.as_deref());
        }
        for tag in payload.tags {
            match TagName::new(tag.into_name()) {
                Ok(name) => {
                    entry.add_tag(name);
                }
                Err(e) => tracing::warn!(problem = payload.id, error = %e, "skipping tag"),
            }
        }
        Ok(entry)
    }
}

pub(crate) fn map_entries(
    payloads: Vec<ProblemEntryPayload>,
) -> Result<Vec<ProblemEntry>, StorageError> {
    payloads.into_iter().map(ProblemEntry::try_from).collect()
}

//
// ─── REVIEWS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewPayload {
    id: u64,
    problem_id: u64,
    correct: bool,
    created_date: String,
}

impl TryFrom<ReviewPayload> for Review {
    type Error = StorageError;

    fn try_from(payload: ReviewPayload) -> Result<Self, Self::Error> {
        Ok(Review::new(
            ReviewId::new(payload.id),
            ProblemId::new(payload.problem_id),
            payload.correct,
            parse_timestamp(&payload.created_date)?,
        ))
    }
}

//
// ─── ANALYTICS ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyticsPayload {
    summary: SummaryPayload,
    #[serde(default)]
    problems: Vec<ProblemAnalyticsPayload>,
    generated_at: String,
}

#[derive(Debug, Deserialize)]
struct SummaryPayload {
    total_problems: u32,
    total_reviews: u32,
    overall_accuracy: f64,
    average_ease_factor: f64,
    problems_due_today: u32,
    problems_due_this_week: u32,
    problems_due_this_month: u32,
    problems_overdue: u32,
}

#[derive(Debug, Deserialize)]
struct ProblemAnalyticsPayload {
    problem_id: u64,
    problem_name: String,
    total_reviews: u32,
    correct_reviews: u32,
    ease_factor: f64,
    current_interval: u32,
    next_review_date: Option<String>,
    due_date: Option<String>,
    #[serde(default)]
    days_until_due: i64,
}

impl TryFrom<AnalyticsPayload> for AnalyticsReport {
    type Error = StorageError;

    fn try_from(payload: AnalyticsPayload) -> Result<Self, Self::Error> {
        let s = payload.summary;
        let problems = payload
            .problems
            .into_iter()
            .map(|p| {
                Ok(ProblemAnalytics {
                    problem_id: ProblemId::new(p.problem_id),
                    problem_name: p.problem_name,
                    total_reviews: p.total_reviews,
                    correct_reviews: p.correct_reviews,
                    ease_factor: p.ease_factor,
                    current_interval_days: p.current_interval,
                    next_review_at: parse_optional_timestamp(p.next_review_date.as_deref())?,
                    due_at: parse_optional_timestamp(p.due_date.as_deref())?,
                    days_until_due: p.days_until_due,
                })
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        Ok(AnalyticsReport {
            summary: AnalyticsSummary {
                total_problems: s.total_problems,
                total_reviews: s.total_reviews,
                overall_accuracy: s.overall_accuracy,
                average_ease_factor: s.average_ease_factor,
                problems_due_today: s.problems_due_today,
                problems_due_this_week: s.problems_due_this_week,
                problems_due_this_month: s.problems_due_this_month,
                problems_overdue: s.problems_overdue,
            },
            problems,
            generated_at: parse_timestamp(&payload.generated_at)?,
        })
    }
}

//
// ─── REQUEST BODIES ───────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct ReviewRequest {
    pub problem_id: u64,
    pub correct: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct SuspendRequest<'a> {
    pub reason: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TagRequest<'a> {
    pub tag_name: &'a str,
}
