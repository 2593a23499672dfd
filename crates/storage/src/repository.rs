use std::sync::Arc;

use async_trait::async_trait;
use practice_core::model::{
    AnalyticsReport, Problem, ProblemEntry, ProblemId, Review, ReviewOutcome, TagName,
};
use thiserror::Error;

use crate::memory::InMemoryRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Supplies the next due problem.
#[async_trait]
pub trait ProblemSource: Send + Sync {
    /// Fetch the next problem due for practice.
    ///
    /// `Ok(None)` means nothing is due. A payload that cannot be turned into a
    /// `Problem` is a `StorageError::Serialization`, so callers can tell a
    /// broken response from an exhausted queue.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport failures or malformed payloads.
    async fn next_due(&self) -> Result<Option<Problem>, StorageError>;
}

/// Accepts graded attempts.
#[async_trait]
pub trait ReviewRecorder: Send + Sync {
    /// Record one graded attempt.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for unknown problems, or other storage errors.
    async fn record_review(&self, outcome: &ReviewOutcome) -> Result<(), StorageError>;
}

/// Excludes problems from (and restores them to) due selection.
#[async_trait]
pub trait ProblemSuspension: Send + Sync {
    /// Suspend a problem with an optional free-text reason.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for unknown problems, or other storage errors.
    async fn suspend(
        &self,
        id: ProblemId,
        reason: Option<&str>,
    ) -> Result<ProblemEntry, StorageError>;

    /// Reverse a suspension.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for unknown problems, or other storage errors.
    async fn unsuspend(&self, id: ProblemId) -> Result<ProblemEntry, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the listing cannot be loaded.
    async fn list_suspended(&self) -> Result<Vec<ProblemEntry>, StorageError>;
}

/// Read/administrative access to every problem, used by browsing views.
#[async_trait]
pub trait ProblemCatalog: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the listing cannot be loaded.
    async fn list_all(&self) -> Result<Vec<ProblemEntry>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for unknown problems, or other storage errors.
    async fn add_tag(&self, id: ProblemId, tag: &TagName) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for unknown problems, or other storage errors.
    async fn remove_tag(&self, id: ProblemId, tag: &TagName) -> Result<(), StorageError>;

    /// Generate a sample instance of a problem without scheduling it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for unknown problems, or other storage errors.
    async fn demo(&self, id: ProblemId) -> Result<Problem, StorageError>;
}

#[async_trait]
pub trait ReviewHistory: Send + Sync {
    /// List recorded reviews in recording order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing cannot be loaded.
    async fn list_reviews(&self, skip: u32, limit: u32) -> Result<Vec<Review>, StorageError>;
}

#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the report cannot be loaded.
    async fn analytics(&self) -> Result<AnalyticsReport, StorageError>;
}

/// Aggregates the collaborator contracts behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub problems: Arc<dyn ProblemSource>,
    pub reviews: Arc<dyn ReviewRecorder>,
    pub suspensions: Arc<dyn ProblemSuspension>,
    pub catalog: Arc<dyn ProblemCatalog>,
    pub history: Arc<dyn ReviewHistory>,
    pub analytics: Arc<dyn AnalyticsSource>,
}

impl Storage {
    /// Wire every contract to one backend implementing all of them.
    #[must_use]
    pub fn from_backend<B>(backend: B) -> Self
    where
        B: ProblemSource
            + ReviewRecorder
            + ProblemSuspension
            + ProblemCatalog
            + ReviewHistory
            + AnalyticsSource
            + Clone
            + 'static,
    {
        Self {
            problems: Arc::new(backend.clone()),
            reviews: Arc::new(backend.clone()),
            suspensions: Arc::new(backend.clone()),
            catalog: Arc::new(backend.clone()),
            history: Arc::new(backend.clone()),
            analytics: Arc::new(backend),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_backend(InMemoryRepository::new())
    }
}
