#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod practice;
pub mod progress_service;

pub use practice_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use error::{CatalogError, PracticeError, ProgressError};
pub use practice::{
    DEFAULT_FETCH_TIMEOUT_SECS, PracticeConfig, PracticeLoopService, Submission,
};
pub use progress_service::{ProgressService, ReviewPage};
