use std::sync::Arc;

use practice_core::model::{AnalyticsReport, Review};
use storage::repository::{AnalyticsSource, ReviewHistory};

use crate::error::ProgressError;

/// Offset/limit window into the review history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewPage {
    pub skip: u32,
    pub limit: u32,
}

impl ReviewPage {
    pub const DEFAULT_LIMIT: u32 = 100;

    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }

    #[must_use]
    pub fn next_page(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for ReviewPage {
    fn default() -> Self {
        Self::first(Self::DEFAULT_LIMIT)
    }
}

/// Read-only progress data: analytics report and review history.
#[derive(Clone)]
pub struct ProgressService {
    analytics: Arc<dyn AnalyticsSource>,
    history: Arc<dyn ReviewHistory>,
}

impl ProgressService {
    #[must_use]
    pub fn new(analytics: Arc<dyn AnalyticsSource>, history: Arc<dyn ReviewHistory>) -> Self {
        Self { analytics, history }
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the report cannot be loaded.
    pub async fn analytics(&self) -> Result<AnalyticsReport, ProgressError> {
        let report = self.analytics.analytics().await?;
        tracing::debug!(
            problems = report.problems.len(),
            reviews = report.summary.total_reviews,
            "analytics loaded"
        );
        Ok(report)
    }

    /// List one page of recorded reviews, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::EmptyPage` for a zero limit.
    /// Returns `ProgressError::Storage` if repository access fails.
    pub async fn reviews(&self, page: ReviewPage) -> Result<Vec<Review>, ProgressError> {
        if page.limit == 0 {
            return Err(ProgressError::EmptyPage);
        }
        Ok(self.history.list_reviews(page.skip, page.limit).await?)
    }
}
