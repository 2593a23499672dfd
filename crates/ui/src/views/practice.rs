use dioxus::prelude::*;
use practice_core::session::{Command, PracticeSession, SessionError, SessionPhase};

use crate::context::AppContext;
use crate::vm::{
    OptionVm, PracticeIntent, PracticeScreenVm, ResultVm, SuspendDialogVm, map_practice_screen,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

fn log_rejected(intent: &'static str, result: Result<(), SessionError>) {
    if let Err(err) = result {
        tracing::debug!(intent, error = %err, "practice intent ignored");
    }
}

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let practice = ctx.practice();

    let mut first_fetch = None;
    let session = use_signal(|| {
        let mut session = PracticeSession::new();
        first_fetch = Some(session.start());
        session
    });
    let suspend_error = use_signal(|| None::<String>);

    // Executes session commands. Fetch results are fed back with their
    // ticket, so a late answer to an abandoned fetch is dropped.
    let run_command = {
        let practice = practice.clone();
        use_callback(move |command: Command| {
            let practice = practice.clone();
            let mut session = session;
            let mut suspend_error = suspend_error;

            match command {
                Command::FetchProblem { ticket } => {
                    spawn(async move {
                        let fetch = practice.fetch_problem().await;
                        session.write().receive_problem(ticket, fetch);
                    });
                }
                Command::RecordReview(outcome) => {
                    // Delivery is fire-and-forget; the handle is not awaited.
                    drop(practice.record(outcome));
                }
                Command::SuspendProblem {
                    problem_id,
                    reason,
                    then,
                } => {
                    spawn(async move {
                        let suspended = practice.suspend(problem_id, reason.as_deref()).await;
                        suspend_error.set(suspended.err().map(|err| err.to_string()));
                        let fetch = practice.fetch_problem().await;
                        session.write().receive_problem(then, fetch);
                    });
                }
            }
        })
    };

    use_hook(move || {
        if let Some(command) = first_fetch {
            run_command.call(command);
        }
    });

    let dispatch = {
        let clock = practice.clock();
        use_callback(move |intent: PracticeIntent| {
            let mut session = session;
            let mut suspend_error = suspend_error;

            let command = match intent {
                PracticeIntent::Select(index) => {
                    log_rejected("select", session.write().select_option(index));
                    None
                }
                PracticeIntent::Submit => session.write().submit(clock.now()),
                PracticeIntent::Next => {
                    suspend_error.set(None);
                    session.write().next()
                }
                PracticeIntent::OpenSuspend => {
                    log_rejected("open_suspend", session.write().open_suspend());
                    None
                }
                PracticeIntent::SetSuspendReason(reason) => {
                    log_rejected("suspend_reason", session.write().set_suspend_reason(reason));
                    None
                }
                PracticeIntent::CancelSuspend => {
                    session.write().cancel_suspend();
                    None
                }
                PracticeIntent::ConfirmSuspend => match session.write().confirm_suspend() {
                    Ok(command) => Some(command),
                    Err(err) => {
                        tracing::debug!(error = %err, "suspend confirmation ignored");
                        None
                    }
                },
            };

            if let Some(command) = command {
                run_command.call(command);
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<PracticeTestHandles>() {
                handles.register(dispatch, session);
            }
        }
    }

    let screen = map_practice_screen(&session.read());
    let PracticeScreenVm {
        phase,
        question_html,
        options,
        can_submit,
        can_advance,
        can_suspend,
        result,
        empty_message,
        score_line,
        suspend_dialog,
    } = screen;

    rsx! {
        div { class: "page practice",
            header { class: "practice-header",
                h2 { "Practice" }
                span { class: "score", "{score_line}" }
            }

            if let Some(message) = suspend_error() {
                p { class: "inline-error", role: "alert", "{message}" }
            }

            match phase {
                SessionPhase::Loading => rsx! {
                    p { class: "loading", "Loading problem..." }
                },
                SessionPhase::Empty => rsx! {
                    div { class: "empty",
                        p { "{empty_message.unwrap_or_default()}" }
                        button {
                            id: "practice-retry",
                            class: "btn btn-secondary",
                            onclick: move |_| dispatch.call(PracticeIntent::Next),
                            "Check again"
                        }
                    }
                },
                SessionPhase::Ready | SessionPhase::AnswerSelected | SessionPhase::ResultShown => rsx! {
                    div { class: "problem",
                        div {
                            class: "question",
                            dangerous_inner_html: "{question_html.unwrap_or_default()}",
                        }
                        ul { class: "options",
                            for option in options {
                                OptionButton { key: "{option.index}", option, on_intent: dispatch }
                            }
                        }
                        if let Some(result) = result {
                            ResultPanel { result }
                        }
                        div { class: "practice-actions",
                            button {
                                id: "practice-submit",
                                class: "btn btn-primary",
                                disabled: !can_submit,
                                onclick: move |_| dispatch.call(PracticeIntent::Submit),
                                "Submit"
                            }
                            button {
                                id: "practice-next",
                                class: "btn btn-secondary",
                                disabled: !can_advance,
                                onclick: move |_| dispatch.call(PracticeIntent::Next),
                                "Next problem"
                            }
                            button {
                                id: "practice-suspend",
                                class: "btn btn-ghost",
                                disabled: !can_suspend,
                                onclick: move |_| dispatch.call(PracticeIntent::OpenSuspend),
                                "Suspend"
                            }
                        }
                    }
                },
            }

            if let Some(dialog) = suspend_dialog {
                SuspendDialog { dialog, on_intent: dispatch }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct PracticeTestHandles {
    dispatch: Rc<RefCell<Option<Callback<PracticeIntent>>>>,
    session: Rc<RefCell<Option<Signal<PracticeSession>>>>,
}

#[cfg(test)]
impl PracticeTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<PracticeIntent>,
        session: Signal<PracticeSession>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<PracticeIntent> {
        (*self.dispatch.borrow()).expect("practice dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<PracticeSession> {
        (*self.session.borrow()).expect("practice session registered")
    }
}

#[component]
fn OptionButton(option: OptionVm, on_intent: Callback<PracticeIntent>) -> Element {
    let index = option.index;
    rsx! {
        li {
            button {
                class: "{option.tone.class()}",
                disabled: option.disabled,
                onclick: move |_| on_intent.call(PracticeIntent::Select(index)),
                span { dangerous_inner_html: "{option.html}" }
            }
        }
    }
}

#[component]
fn ResultPanel(result: ResultVm) -> Element {
    let class = if result.is_correct {
        "result result--correct"
    } else {
        "result result--incorrect"
    };
    rsx! {
        div { class: "{class}", role: "status",
            p { class: "result-message", "{result.message}" }
            if let Some(explanation) = result.explanation_html {
                div { class: "explanation",
                    h3 { "Solution" }
                    div { dangerous_inner_html: "{explanation}" }
                }
            }
        }
    }
}

#[component]
fn SuspendDialog(dialog: SuspendDialogVm, on_intent: Callback<PracticeIntent>) -> Element {
    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog",
                h3 { "Suspend problem" }
                p { "Suspended problems are skipped until you unsuspend them." }
                label { r#for: "suspend-reason", "Reason (optional)" }
                textarea {
                    id: "suspend-reason",
                    value: "{dialog.reason}",
                    oninput: move |evt| on_intent.call(PracticeIntent::SetSuspendReason(evt.value())),
                }
                div { class: "dialog-actions",
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| on_intent.call(PracticeIntent::CancelSuspend),
                        "Cancel"
                    }
                    button {
                        id: "suspend-confirm",
                        class: "btn btn-danger",
                        onclick: move |_| on_intent.call(PracticeIntent::ConfirmSuspend),
                        "Suspend"
                    }
                }
            }
        }
    }
}
