mod config;
mod loop_service;

pub use config::{DEFAULT_FETCH_TIMEOUT_SECS, PracticeConfig};
pub use loop_service::{PracticeLoopService, Submission};
