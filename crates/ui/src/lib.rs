pub mod app;
pub mod context;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{AppContext, AuthSession, UiApp, build_app_context, use_auth_session_provider};
