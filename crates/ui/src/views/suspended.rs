use dioxus::prelude::*;
use practice_core::model::ProblemId;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{NO_SUSPENDED_MESSAGE, ProblemEntryVm, map_problem_entries};

#[component]
pub fn SuspendedView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let action_error = use_signal(|| None::<String>);

    let resource = {
        let catalog = catalog.clone();
        use_resource(move || {
            let catalog = catalog.clone();
            async move {
                let entries = catalog.list_suspended().await.map_err(|err| {
                    tracing::warn!(error = %err, "failed to list suspended problems");
                    ViewError::Unknown
                })?;
                Ok::<_, ViewError>(map_problem_entries(&entries))
            }
        })
    };

    let unsuspend = use_callback(move |id: ProblemId| {
        let catalog = catalog.clone();
        let mut action_error = action_error;
        let mut resource = resource;
        spawn(async move {
            match catalog.unsuspend(id).await {
                Ok(_) => {
                    action_error.set(None);
                    resource.restart();
                }
                Err(err) => {
                    tracing::warn!(problem_id = %id, error = %err, "failed to unsuspend");
                    action_error.set(Some(err.to_string()));
                }
            }
        });
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Suspended problems" }

            if let Some(message) = action_error() {
                p { class: "inline-error", role: "alert", "{message}" }
            }

            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "{NO_SUSPENDED_MESSAGE}" }
                    } else {
                        ul { class: "problem-list",
                            for row in rows {
                                SuspendedItem { key: "{row.id}", row, on_unsuspend: unsuspend }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "inline-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn SuspendedItem(row: ProblemEntryVm, on_unsuspend: Callback<ProblemId>) -> Element {
    let id = ProblemId::new(row.id);
    rsx! {
        li { class: "problem-item",
            div { class: "problem-item-header",
                span { class: "problem-name", "{row.name}" }
                span { class: "muted", "Added {row.created}" }
            }
            if let Some(reason) = row.reason.as_ref() {
                p { class: "suspend-reason", "Reason: {reason}" }
            }
            button {
                class: "btn btn-secondary",
                onclick: move |_| on_unsuspend.call(id),
                "Unsuspend"
            }
        }
    }
}
