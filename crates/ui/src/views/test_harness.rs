use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use practice_core::time::fixed_now;
use services::{
    AppServices, CatalogService, Clock, PracticeConfig, PracticeLoopService, ProgressService,
};
use storage::{InMemoryRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::practice::PracticeTestHandles;
use crate::views::{BrowseView, DashboardView, PracticeView, ProgressView, SuspendedView};

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn practice(&self) -> Arc<PracticeLoopService> {
        self.services.practice()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Practice,
    Dashboard,
    Browse,
    Suspended,
    Progress,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    practice_handles: Option<PracticeTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.practice_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Practice => rsx! { PracticeView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Browse => rsx! { BrowseView {} },
        ViewKind::Suspended => rsx! { SuspendedView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub practice_handles: Option<PracticeTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let spawned tasks and resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, repo: InMemoryRepository) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::from_backend(repo))
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let services = AppServices::new(
        &storage,
        Clock::fixed(fixed_now()),
        PracticeConfig::default(),
    );
    let app = Arc::new(TestApp { services });
    let practice_handles = match view {
        ViewKind::Practice => Some(PracticeTestHandles::default()),
        _ => None,
    };
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            practice_handles: practice_handles.clone(),
        },
    );
    ViewHarness {
        dom,
        practice_handles,
    }
}
