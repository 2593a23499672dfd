use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

const KATEX_CSS: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.css";
const KATEX_JS: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.js";

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Stylesheet { href: KATEX_CSS }
        document::Script { src: KATEX_JS }
        document::Script { src: asset!("/assets/math.js") }

        document::Title { "Math Practice" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        p { "Restart the app. If it keeps happening, run with -v and check the log." }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
