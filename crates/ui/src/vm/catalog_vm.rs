use practice_core::model::{Problem, ProblemEntry};

use super::analytics_vm::display_problem_name;
use super::markdown_vm::{inline_markdown_to_html, markdown_to_html};
use super::time_fmt::format_date;

pub const NO_SUSPENDED_MESSAGE: &str = "No suspended problems.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemEntryVm {
    pub id: u64,
    pub name: String,
    pub created: String,
    pub suspended: bool,
    pub status_label: &'static str,
    pub toggle_label: &'static str,
    pub reason: Option<String>,
    pub tags: Vec<String>,
}

/// A generated sample shown in the browse preview dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoVm {
    pub problem_name: String,
    pub question_html: String,
    pub options_html: Vec<String>,
    pub correct_index: usize,
    pub explanation_html: Option<String>,
}

#[must_use]
pub fn map_problem_entry(entry: &ProblemEntry) -> ProblemEntryVm {
    ProblemEntryVm {
        id: entry.id.value(),
        name: display_problem_name(&entry.name),
        created: format_date(entry.created_at),
        suspended: entry.suspended,
        status_label: if entry.suspended { "Suspended" } else { "Active" },
        toggle_label: if entry.suspended { "Unsuspend" } else { "Suspend" },
        reason: entry
            .suspend_reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .map(str::to_string),
        tags: entry.tags.iter().map(|tag| tag.as_str().to_string()).collect(),
    }
}

#[must_use]
pub fn map_problem_entries(entries: &[ProblemEntry]) -> Vec<ProblemEntryVm> {
    entries.iter().map(map_problem_entry).collect()
}

#[must_use]
pub fn map_demo(name: &str, problem: &Problem) -> DemoVm {
    DemoVm {
        problem_name: display_problem_name(name),
        question_html: markdown_to_html(problem.question()),
        options_html: problem
            .options()
            .iter()
            .map(|option| inline_markdown_to_html(option))
            .collect(),
        correct_index: problem.correct_index(),
        explanation_html: problem.solution_explanation().map(markdown_to_html),
    }
}
