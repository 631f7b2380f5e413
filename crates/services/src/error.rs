//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use learniverse_core::model::CredentialsError;
use storage::repository::StorageError;

/// Dashboard sections that are loaded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardSection {
    Profile,
    Stats,
    Achievements,
    Subjects,
    Progress,
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DashboardSection::Profile => "profile",
            DashboardSection::Stats => "stats",
            DashboardSection::Achievements => "achievements",
            DashboardSection::Subjects => "subjects",
            DashboardSection::Progress => "progress",
        };
        f.write_str(name)
    }
}

/// A failed read for one dashboard section.
#[derive(Debug, Error)]
#[error("failed to load dashboard {section}")]
pub struct DashboardError {
    pub section: DashboardSection,
    #[source]
    pub source: StorageError,
}

/// Errors emitted by `ExerciseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExerciseServiceError {
    #[error("no exercise is available for {subject}")]
    NoExercise { subject: &'static str },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by auth providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] CredentialsError),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    AlreadyRegistered,
    #[error("please confirm your email before signing in")]
    EmailNotConfirmed,
    #[error("auth state unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}
