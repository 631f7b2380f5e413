use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use learniverse_core::model::{
    Credentials, UserId, UserProfile, UserStats, normalize_display_name,
};
use storage::repository::{ProfileRepository, StatsRepository};

use crate::Clock;
use crate::error::AuthError;

/// The signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    /// `None` for sessions restored from configuration.
    pub email: Option<String>,
}

/// Result of creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(AuthUser),
    /// The account exists but must be confirmed before signing in.
    ConfirmationRequired { email: String },
}

/// Contract of an identity provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown account or
    /// wrong password.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::AlreadyRegistered` if the email is taken.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::Unavailable` if session state cannot be updated.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::Unavailable` if session state cannot be read.
    fn current_user(&self) -> Result<Option<AuthUser>, AuthError>;
}

struct Account {
    user_id: UserId,
    password: String,
    confirmed: bool,
}

#[derive(Default)]
struct LocalState {
    accounts: HashMap<String, Account>,
    current: Option<AuthUser>,
    next_user_id: u64,
}

/// In-process provider for development and tests. Accounts live only as
/// long as the process.
#[derive(Clone)]
pub struct LocalAuthProvider {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
    stats: Arc<dyn StatsRepository>,
    require_confirmation: bool,
    state: Arc<Mutex<LocalState>>,
}

impl LocalAuthProvider {
    #[must_use]
    pub fn new(
        clock: Clock,
        profiles: Arc<dyn ProfileRepository>,
        stats: Arc<dyn StatsRepository>,
    ) -> Self {
        Self {
            clock,
            profiles,
            stats,
            require_confirmation: false,
            state: Arc::new(Mutex::new(LocalState {
                next_user_id: 1,
                ..LocalState::default()
            })),
        }
    }

    /// New accounts must be confirmed with `confirm_email` before sign-in.
    #[must_use]
    pub fn with_email_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    /// Ids handed to new accounts start after `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unavailable` if session state cannot be updated.
    pub fn reserve_user_id(&self, user_id: UserId) -> Result<(), AuthError> {
        let mut state = self.lock()?;
        state.next_user_id = state.next_user_id.max(user_id.value().saturating_add(1));
        Ok(())
    }

    /// Start signed in as an existing user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unavailable` if session state cannot be updated.
    pub fn restore_session(&self, user_id: UserId) -> Result<AuthUser, AuthError> {
        self.reserve_user_id(user_id)?;
        let user = AuthUser {
            user_id,
            email: None,
        };
        self.lock()?.current = Some(user.clone());
        Ok(user)
    }

    /// Marks a pending account as confirmed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email.
    pub fn confirm_email(&self, email: &str) -> Result<(), AuthError> {
        let mut state = self.lock()?;
        let account = state
            .accounts
            .get_mut(&email.trim().to_lowercase())
            .ok_or(AuthError::InvalidCredentials)?;
        account.confirmed = true;
        Ok(())
    }

    async fn create_learner(&self, user_id: UserId, display_name: &str) -> Result<(), AuthError> {
        self.profiles
            .upsert_profile(&UserProfile {
                user_id,
                display_name: display_name.to_string(),
                avatar: None,
                created_at: self.clock.now(),
            })
            .await?;
        self.stats.upsert_stats(user_id, &UserStats::default()).await?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, LocalState>, AuthError> {
        self.state
            .lock()
            .map_err(|e| AuthError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        let mut state = self.lock()?;
        let account = state
            .accounts
            .get(credentials.email())
            .filter(|account| account.password == credentials.password())
            .ok_or(AuthError::InvalidCredentials)?;
        if !account.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }
        let user = AuthUser {
            user_id: account.user_id,
            email: Some(credentials.email().to_string()),
        };
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let user_id = {
            let mut state = self.lock()?;
            if state.accounts.contains_key(credentials.email()) {
                return Err(AuthError::AlreadyRegistered);
            }
            let user_id = UserId::new(state.next_user_id);
            state.next_user_id = state
                .next_user_id
                .checked_add(1)
                .ok_or_else(|| AuthError::Unavailable("user ids exhausted".into()))?;
            state.accounts.insert(
                credentials.email().to_string(),
                Account {
                    user_id,
                    password: credentials.password().to_string(),
                    confirmed: !self.require_confirmation,
                },
            );
            user_id
        };

        if let Err(err) = self.create_learner(user_id, display_name).await {
            tracing::warn!(user = %user_id, error = %err, "sign-up rolled back");
            self.lock()?.accounts.remove(credentials.email());
            return Err(err);
        }

        if self.require_confirmation {
            return Ok(SignUpOutcome::ConfirmationRequired {
                email: credentials.email().to_string(),
            });
        }

        let user = AuthUser {
            user_id,
            email: Some(credentials.email().to_string()),
        };
        self.lock()?.current = Some(user.clone());
        Ok(SignUpOutcome::SignedIn(user))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.lock()?.current = None;
        Ok(())
    }

    fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.lock()?.current.clone())
    }
}

/// Validates form input before it reaches the provider.
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
}

impl AuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// # Errors
    ///
    /// Returns `AuthError::Validation` for malformed input, or whatever the
    /// provider rejects.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let credentials = Credentials::new(email, password)?;
        let user = self.provider.sign_in(&credentials).await.map_err(|err| {
            tracing::debug!(error = %err, "sign-in rejected");
            err
        })?;
        tracing::info!(user = %user.user_id, "signed in");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Validation` for malformed input, or whatever the
    /// provider rejects.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let credentials = Credentials::new(email, password)?;
        let display_name = normalize_display_name(display_name)?;
        let outcome = self.provider.sign_up(&credentials, &display_name).await?;
        tracing::info!(email = credentials.email(), "account created");
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Unavailable` if the provider cannot clear the session.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await
    }

    /// The signed-in user, if any. Unreadable state counts as signed out.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthUser> {
        self.provider.current_user().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "auth state unreadable");
            None
        })
    }
}
