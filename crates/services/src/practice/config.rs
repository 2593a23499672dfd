use std::time::Duration;

/// Seconds to wait for the problem source before showing the empty state.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Runtime knobs for the practice loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeConfig {
    pub fetch_timeout: Duration,
}

impl PracticeConfig {
    #[must_use]
    pub fn with_fetch_timeout(fetch_timeout: Duration) -> Self {
        Self { fetch_timeout }
    }
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self::with_fetch_timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }
}
