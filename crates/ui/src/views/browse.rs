use std::sync::Arc;

use dioxus::prelude::*;
use practice_core::model::{ProblemEntry, ProblemId};
use services::CatalogService;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DemoVm, ProblemEntryVm, map_demo, map_problem_entry};

#[derive(Clone, Debug, PartialEq)]
struct BrowseRow {
    entry: ProblemEntry,
    vm: ProblemEntryVm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum CatalogAction {
    ToggleSuspended,
    AddTag(String),
    RemoveTag(String),
    Demo,
}

#[component]
pub fn BrowseView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let action_error = use_signal(|| None::<String>);
    let mut demo = use_signal(|| None::<DemoVm>);

    let resource = {
        let catalog = catalog.clone();
        use_resource(move || {
            let catalog = catalog.clone();
            async move {
                let entries = catalog.list_all().await.map_err(|err| {
                    tracing::warn!(error = %err, "failed to list problems");
                    ViewError::Unknown
                })?;
                Ok::<_, ViewError>(
                    entries
                        .into_iter()
                        .map(|entry| BrowseRow {
                            vm: map_problem_entry(&entry),
                            entry,
                        })
                        .collect::<Vec<_>>(),
                )
            }
        })
    };

    let on_action = use_callback(move |(entry, action): (ProblemEntry, CatalogAction)| {
        let catalog = Arc::clone(&catalog);
        let mut action_error = action_error;
        let mut demo = demo;
        let mut resource = resource;
        spawn(async move {
            let outcome = run_action(&catalog, &entry, action).await;
            match outcome {
                Ok(Some(preview)) => demo.set(Some(preview)),
                Ok(None) => {
                    action_error.set(None);
                    resource.restart();
                }
                Err(message) => action_error.set(Some(message)),
            }
        });
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Browse problems" }

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
                        p { "No items to display." }
                    } else {
                        ul { class: "problem-list",
                            for row in rows {
                                BrowseItem { key: "{row.vm.id}", row, on_action }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "inline-error", "{err.message()}" }
                },
            }

            if let Some(preview) = demo() {
                DemoDialog { preview, on_close: move |()| demo.set(None) }
            }
        }
    }
}

/// `Ok(Some(_))` carries a demo preview; `Ok(None)` means the listing changed.
async fn run_action(
    catalog: &CatalogService,
    entry: &ProblemEntry,
    action: CatalogAction,
) -> Result<Option<DemoVm>, String> {
    let result = match action {
        CatalogAction::ToggleSuspended => catalog.toggle_suspended(entry).await.map(|_| None),
        CatalogAction::AddTag(name) => catalog.add_tag(entry.id, &name).await.map(|_| None),
        CatalogAction::RemoveTag(name) => catalog.remove_tag(entry.id, &name).await.map(|()| None),
        CatalogAction::Demo => catalog
            .demo(entry.id)
            .await
            .map(|problem| Some(map_demo(&entry.name, &problem))),
    };
    result.map_err(|err| {
        tracing::warn!(problem_id = %entry.id, error = %err, "catalog action failed");
        err.to_string()
    })
}

#[component]
fn BrowseItem(row: BrowseRow, on_action: Callback<(ProblemEntry, CatalogAction)>) -> Element {
    let mut new_tag = use_signal(String::new);
    let BrowseRow { entry, vm } = row;
    let status_class = if vm.suspended { "chip tone-warning" } else { "chip tone-success" };
    let id = ProblemId::new(vm.id);

    let toggle_entry = entry.clone();
    let demo_entry = entry.clone();
    let tag_entry = entry.clone();

    rsx! {
        li { class: "problem-item", "data-problem-id": "{id}",
            div { class: "problem-item-header",
                span { class: "problem-name", "{vm.name}" }
                span { class: "{status_class}", "{vm.status_label}" }
                span { class: "muted", "Added {vm.created}" }
            }
            if let Some(reason) = vm.reason.as_ref() {
                p { class: "suspend-reason", "Reason: {reason}" }
            }
            div { class: "tags",
                for tag in vm.tags.clone() {
                    TagChip { key: "{tag}", entry: entry.clone(), tag, on_action }
                }
                input {
                    class: "tag-input",
                    placeholder: "Add tag",
                    value: "{new_tag}",
                    oninput: move |evt| new_tag.set(evt.value()),
                }
                button {
                    class: "btn btn-ghost",
                    disabled: new_tag().trim().is_empty(),
                    onclick: move |_| {
                        let name = new_tag().trim().to_string();
                        new_tag.set(String::new());
                        on_action.call((tag_entry.clone(), CatalogAction::AddTag(name)));
                    },
                    "Add"
                }
            }
            div { class: "problem-item-actions",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_action.call((demo_entry.clone(), CatalogAction::Demo)),
                    "Preview"
                }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_action.call((toggle_entry.clone(), CatalogAction::ToggleSuspended)),
                    "{vm.toggle_label}"
                }
            }
        }
    }
}

#[component]
fn TagChip(
    entry: ProblemEntry,
    tag: String,
    on_action: Callback<(ProblemEntry, CatalogAction)>,
) -> Element {
    let name = tag.clone();
    rsx! {
        span { class: "chip tag",
            "{tag}"
            button {
                class: "chip-remove",
                title: "Remove tag",
                onclick: move |_| {
                    on_action.call((entry.clone(), CatalogAction::RemoveTag(name.clone())));
                },
                "×"
            }
        }
    }
}

#[component]
fn DemoDialog(preview: DemoVm, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog",
                h3 { "{preview.problem_name}" }
                div { class: "question", dangerous_inner_html: "{preview.question_html}" }
                ol { class: "options",
                    for (index, option) in preview.options_html.iter().enumerate() {
                        li {
                            class: if index == preview.correct_index { "option option--correct" } else { "option" },
                            dangerous_inner_html: "{option}",
                        }
                    }
                }
                if let Some(explanation) = preview.explanation_html.as_ref() {
                    div { class: "explanation", dangerous_inner_html: "{explanation}" }
                }
                div { class: "dialog-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
