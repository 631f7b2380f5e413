use std::sync::Arc;

use learniverse_core::model::UserId;
use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::{AuthService, LocalAuthProvider};
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::exercise_service::ExerciseService;

/// Assembles app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    dashboard: Arc<DashboardService>,
    exercises: Arc<ExerciseService>,
    auth: Arc<AuthService>,
}

impl AppServices {
    /// Build services over in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the initial session cannot be restored.
    pub fn in_memory(clock: Clock, signed_in: Option<UserId>) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), clock, signed_in)
    }

    /// Wire services to existing storage, optionally starting signed in.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the initial session cannot be restored.
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        signed_in: Option<UserId>,
    ) -> Result<Self, AppServicesError> {
        let provider = LocalAuthProvider::new(
            clock,
            Arc::clone(&storage.profiles),
            Arc::clone(&storage.stats),
        );
        if let Some(user_id) = signed_in {
            provider.restore_session(user_id)?;
        }

        Ok(Self {
            dashboard: Arc::new(DashboardService::new(storage)),
            exercises: Arc::new(ExerciseService::new(
                clock,
                Arc::clone(&storage.catalog),
                Arc::clone(&storage.progress),
            )),
            auth: Arc::new(AuthService::new(Arc::new(provider))),
        })
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn exercises(&self) -> Arc<ExerciseService> {
        Arc::clone(&self.exercises)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }
}
