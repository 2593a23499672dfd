use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::practice::{PracticeConfig, PracticeLoopService};
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one `Storage` backend.
#[derive(Clone)]
pub struct AppServices {
    practice: Arc<PracticeLoopService>,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, config: PracticeConfig) -> Self {
        let practice = PracticeLoopService::new(
            clock,
            Arc::clone(&storage.problems),
            Arc::clone(&storage.reviews),
            Arc::clone(&storage.suspensions),
        )
        .with_config(config);
        let catalog = CatalogService::new(
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.suspensions),
        );
        let progress =
            ProgressService::new(Arc::clone(&storage.analytics), Arc::clone(&storage.history));

        Self {
            practice: Arc::new(practice),
            catalog: Arc::new(catalog),
            progress: Arc::new(progress),
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
