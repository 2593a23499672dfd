mod browse;
mod dashboard;
mod practice;
mod progress;
mod state;
mod suspended;

#[cfg(test)]
mod intent_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use browse::BrowseView;
pub use dashboard::DashboardView;
pub use practice::PracticeView;
pub use progress::ProgressView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use suspended::SuspendedView;
