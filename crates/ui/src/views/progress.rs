use dioxus::prelude::*;
use services::ReviewPage;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{NO_REVIEWS_MESSAGE, ReviewRowVm, map_review_rows};

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let mut page = use_signal(ReviewPage::default);

    let resource = use_resource(move || {
        let progress = progress.clone();
        let page = page();
        async move {
            let reviews = progress.reviews(page).await.map_err(|err| {
                tracing::warn!(error = %err, "failed to load reviews");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(map_review_rows(&reviews))
        }
    });

    let state = view_state_from_resource(&resource);
    let current = page();

    rsx! {
        div { class: "page",
            h2 { "Progress" }

            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => {
                    let full_page = rows.len() == current.limit as usize;
                    rsx! {
                        if rows.is_empty() {
                            p { "{NO_REVIEWS_MESSAGE}" }
                        } else {
                            table { class: "review-table",
                                thead {
                                    tr {
                                        th { "Review" }
                                        th { "Problem" }
                                        th { "Outcome" }
                                        th { "Recorded" }
                                    }
                                }
                                tbody {
                                    for row in rows {
                                        ReviewRow { key: "{row.id}", row }
                                    }
                                }
                            }
                        }
                        div { class: "pager",
                            button {
                                class: "btn btn-secondary",
                                disabled: current.skip == 0,
                                onclick: move |_| page.set(ReviewPage::default()),
                                "First page"
                            }
                            button {
                                class: "btn btn-secondary",
                                disabled: !full_page,
                                onclick: move |_| page.set(current.next_page()),
                                "Next page"
                            }
                        }
                    }
                }
                ViewState::Error(err) => rsx! {
                    p { class: "inline-error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ReviewRow(row: ReviewRowVm) -> Element {
    let class = if row.correct { "tone-success" } else { "tone-error" };
    rsx! {
        tr {
            td { "#{row.id}" }
            td { "{row.problem_id}" }
            td { class: "{class}", "{row.outcome}" }
            td { "{row.recorded_at}" }
        }
    }
}
