#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod dashboard_service;
pub mod error;
pub mod exercise_service;

pub use learniverse_core::Clock;

pub use app_services::AppServices;
pub use auth_service::{AuthProvider, AuthService, AuthUser, LocalAuthProvider, SignUpOutcome};
pub use dashboard_service::{DASHBOARD_LIST_LIMIT, DashboardService, DashboardSnapshot, SubjectCard};
pub use error::{
    AppServicesError, AuthError, DashboardError, DashboardSection, ExerciseServiceError,
};
pub use exercise_service::ExerciseService;
