use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{BrowseView, DashboardView, PracticeView, ProgressView, SuspendedView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", PracticeView)] Practice {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/browse", BrowseView)] Browse {},
        #[route("/suspended", SuspendedView)] Suspended {},
        #[route("/progress", ProgressView)] Progress {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Math Practice" }
            ul {
                li { Link { to: Route::Practice {}, "Practice" } }
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Browse {}, "Browse" } }
                li { Link { to: Route::Suspended {}, "Suspended" } }
                li { Link { to: Route::Progress {}, "Progress" } }
            }
        }
    }
}
