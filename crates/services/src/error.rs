//! Shared error types for the services crate.

use thiserror::Error;

use practice_core::model::{ProblemId, TagError};
use practice_core::session::SessionError;
use storage::repository::StorageError;

/// Errors emitted by `PracticeLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error(transparent)]
    Session(#[from] SessionError),
    /// The remote suspension failed. The session has still moved on.
    #[error("could not suspend problem {problem_id}: {source}")]
    SuspendFailed {
        problem_id: ProblemId,
        #[source]
        source: StorageError,
    },
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("page size must be at least 1")]
    EmptyPage,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
