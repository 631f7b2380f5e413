mod auth;
mod dashboard;
mod exercise;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use dashboard::DashboardView;
pub use exercise::{EnglishView, ExerciseView, MathView};
pub use state::{ViewError, ViewState, view_state_from_resource};
