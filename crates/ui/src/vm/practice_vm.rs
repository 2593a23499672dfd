use practice_core::session::{AnswerResult, EmptyReason, PracticeSession, SessionPhase};

use super::markdown_vm::{inline_markdown_to_html, markdown_to_html};

pub const CORRECT_MESSAGE: &str = "🎉 Correct! Well done!";
pub const EMPTY_MESSAGE: &str = "No problems due right now.";

/// Learner actions on the practice screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PracticeIntent {
    Select(usize),
    Submit,
    Next,
    OpenSuspend,
    SetSuspendReason(String),
    CancelSuspend,
    ConfirmSuspend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionTone {
    Idle,
    Selected,
    Correct,
    Incorrect,
    Muted,
}

impl OptionTone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Idle => "option",
            Self::Selected => "option option--selected",
            Self::Correct => "option option--correct",
            Self::Incorrect => "option option--incorrect",
            Self::Muted => "option option--muted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub html: String,
    pub tone: OptionTone,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub is_correct: bool,
    pub message: String,
    pub explanation_html: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuspendDialogVm {
    pub reason: String,
}

/// Everything the practice view renders, derived from the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeScreenVm {
    pub phase: SessionPhase,
    pub question_html: Option<String>,
    pub options: Vec<OptionVm>,
    pub can_submit: bool,
    pub can_advance: bool,
    pub can_suspend: bool,
    pub result: Option<ResultVm>,
    pub empty_message: Option<String>,
    pub score_line: String,
    pub suspend_dialog: Option<SuspendDialogVm>,
}

#[must_use]
pub fn result_message(result: &AnswerResult) -> String {
    if result.is_correct {
        return CORRECT_MESSAGE.to_string();
    }
    match result.correct_answer.as_deref() {
        Some(answer) => format!("❌ Incorrect. The correct answer is: {answer}"),
        None => "❌ Incorrect.".to_string(),
    }
}

#[must_use]
pub fn score_line(score: u32, attempted: u32) -> String {
    format!("Score: {score}/{attempted}")
}

fn empty_message(reason: Option<&EmptyReason>) -> String {
    match reason {
        Some(EmptyReason::Failed(_)) => {
            format!("{EMPTY_MESSAGE} The practice server could not be reached.")
        }
        _ => EMPTY_MESSAGE.to_string(),
    }
}

fn option_tone(
    index: usize,
    selected: Option<usize>,
    result: Option<&AnswerResult>,
) -> OptionTone {
    match result {
        Some(result) if index == result.correct_index => OptionTone::Correct,
        Some(result) if index == result.selected => OptionTone::Incorrect,
        Some(_) => OptionTone::Muted,
        None if selected == Some(index) => OptionTone::Selected,
        None => OptionTone::Idle,
    }
}

#[must_use]
pub fn map_practice_screen(session: &PracticeSession) -> PracticeScreenVm {
    let problem = session.current_problem();
    let result = session.result();
    let selectable = session.can_select();

    let options = problem
        .map(|problem| {
            problem
                .options()
                .iter()
                .enumerate()
                .map(|(index, text)| OptionVm {
                    index,
                    html: inline_markdown_to_html(text),
                    tone: option_tone(index, session.selected_option(), result),
                    disabled: !selectable,
                })
                .collect()
        })
        .unwrap_or_default();

    let result_vm = result.map(|result| ResultVm {
        is_correct: result.is_correct,
        message: result_message(result),
        explanation_html: problem
            .and_then(|problem| problem.solution_explanation())
            .map(markdown_to_html),
    });

    PracticeScreenVm {
        phase: session.phase(),
        question_html: problem.map(|problem| markdown_to_html(problem.question())),
        options,
        can_submit: session.can_submit(),
        can_advance: session.can_advance(),
        can_suspend: problem.is_some() && session.suspend_prompt().is_none(),
        result: result_vm,
        empty_message: session
            .no_problem_available()
            .then(|| empty_message(session.empty_reason())),
        score_line: score_line(session.score_count(), session.attempted_count()),
        suspend_dialog: session.suspend_prompt().map(|prompt| SuspendDialogVm {
            reason: prompt.reason().to_string(),
        }),
    }
}
