use std::sync::Arc;

use dioxus::prelude::*;
use learniverse_core::model::UserId;
use services::{AuthService, DashboardService, ExerciseService};

pub trait UiApp: Send + Sync {
    fn dashboard(&self) -> Arc<DashboardService>;
    fn exercises(&self) -> Arc<ExerciseService>;
    fn auth(&self) -> Arc<AuthService>;
}

#[derive(Clone)]
pub struct AppContext {
    dashboard: Arc<DashboardService>,
    exercises: Arc<ExerciseService>,
    auth: Arc<AuthService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            dashboard: app.dashboard(),
            exercises: app.exercises(),
            auth: app.auth(),
        }
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

    /// Signed-in user, read fresh on every call.
    #[must_use]
    pub fn current_user(&self) -> Option<UserId> {
        self.auth.current_user().map(|user| user.user_id)
    }
}

/// Reactive view of who is signed in. Components that read it re-render
/// on sign-in and sign-out.
#[derive(Clone, Copy, PartialEq)]
pub struct AuthSession {
    user: Signal<Option<UserId>>,
}

impl AuthSession {
    #[must_use]
    pub fn user(&self) -> Option<UserId> {
        (self.user)()
    }

    pub fn set_user(&self, user: Option<UserId>) {
        let mut signal = self.user;
        signal.set(user);
    }
}

/// Provide an `AuthSession` seeded with `initial` to the subtree.
pub fn use_auth_session_provider(initial: Option<UserId>) -> AuthSession {
    let user = use_signal(move || initial);
    use_context_provider(|| AuthSession { user })
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
