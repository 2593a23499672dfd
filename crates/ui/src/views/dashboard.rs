use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, ProblemRowVm, StatCardVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let mut resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let report = progress.analytics().await.map_err(|err| {
                tracing::warn!(error = %err, "failed to load analytics");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(map_dashboard(&report))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            header { class: "page-header",
                h2 { "Dashboard" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| resource.restart(),
                    "Refresh"
                }
            }

            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    Dashboard { data }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "inline-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn Dashboard(data: DashboardVm) -> Element {
    rsx! {
        section { class: "stat-grid",
            for card in data.cards {
                StatCard { card }
            }
        }

        if data.rows.is_empty() {
            p { "No items to display." }
        } else {
            table { class: "analytics-table",
                thead {
                    tr {
                        th { "Problem" }
                        th { "Reviews" }
                        th { "Accuracy" }
                        th { "Ease" }
                        th { "Interval (days)" }
                        th { "Status" }
                        th { "Next review" }
                    }
                }
                tbody {
                    for row in data.rows {
                        ProblemRow { key: "{row.id}", row }
                    }
                }
            }
        }

        p { class: "muted", "Updated {data.generated_at}" }
    }
}

#[component]
fn StatCard(card: StatCardVm) -> Element {
    rsx! {
        div { class: "stat-card {card.tone.class()}",
            span { class: "stat-label", "{card.label}" }
            span { class: "stat-value", "{card.value}" }
        }
    }
}

#[component]
fn ProblemRow(row: ProblemRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.name}" }
            td { "{row.reviews}" }
            td { class: "{row.accuracy_tone.class()}", "{row.accuracy}" }
            td { "{row.ease_factor}" }
            td { "{row.interval}" }
            td {
                span { class: "chip {row.due_chip.tone.class()}", "{row.due_chip.label}" }
            }
            td { "{row.next_review}" }
        }
    }
}
