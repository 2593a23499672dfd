use std::sync::Arc;

use services::{CatalogService, PracticeLoopService, ProgressService};

pub trait UiApp: Send + Sync {
    fn practice(&self) -> Arc<PracticeLoopService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn progress(&self) -> Arc<ProgressService>;
}

#[derive(Clone)]
pub struct AppContext {
    practice: Arc<PracticeLoopService>,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            practice: app.practice(),
            catalog: app.catalog(),
            progress: app.progress(),
        }
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
