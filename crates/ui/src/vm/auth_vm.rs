use learniverse_core::model::{CredentialsError, MIN_PASSWORD_LEN};
use services::{AuthError, SignUpOutcome};

pub const CONFIRM_EMAIL_NOTICE: &str = "Please check your email to confirm your account!";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Create Account",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Welcome back! Sign in to continue your learning journey.",
            AuthMode::SignUp => "Join thousands of students already learning with us!",
        }
    }

    #[must_use]
    pub fn submit_label(self, loading: bool) -> &'static str {
        match (self, loading) {
            (AuthMode::SignIn, false) => "Sign In",
            (AuthMode::SignIn, true) => "Signing In...",
            (AuthMode::SignUp, false) => "Create Account",
            (AuthMode::SignUp, true) => "Creating Account...",
        }
    }

    #[must_use]
    pub fn toggle_prompt(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Don't have an account?",
            AuthMode::SignUp => "Already have an account?",
        }
    }

    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Create one here",
            AuthMode::SignUp => "Sign in here",
        }
    }
}

/// Message shown under the form. `Info` is rendered as a neutral alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthNotice {
    Info(String),
    Error(String),
}

impl AuthNotice {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            AuthNotice::Info(text) | AuthNotice::Error(text) => text,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, AuthNotice::Error(_))
    }
}

/// What the form does after a successful sign-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthNext {
    GoToDashboard,
    Stay(AuthNotice),
}

#[must_use]
pub fn sign_up_next(outcome: &SignUpOutcome) -> AuthNext {
    match outcome {
        SignUpOutcome::SignedIn(_) => AuthNext::GoToDashboard,
        SignUpOutcome::ConfirmationRequired { .. } => {
            AuthNext::Stay(AuthNotice::Info(CONFIRM_EMAIL_NOTICE.to_string()))
        }
    }
}

/// User-facing wording for a failed sign-in or sign-up.
#[must_use]
pub fn auth_error_notice(err: &AuthError) -> AuthNotice {
    let text = match err {
        AuthError::Validation(CredentialsError::InvalidEmail) => {
            "Please enter a valid email address.".to_string()
        }
        AuthError::Validation(CredentialsError::PasswordTooShort) => {
            format!("Password should be at least {MIN_PASSWORD_LEN} characters.")
        }
        AuthError::Validation(CredentialsError::EmptyDisplayName) => {
            "Please enter a display name.".to_string()
        }
        AuthError::InvalidCredentials => "Invalid login credentials".to_string(),
        AuthError::AlreadyRegistered => "User already registered".to_string(),
        AuthError::EmailNotConfirmed => "Email not confirmed".to_string(),
        _ => UNEXPECTED_ERROR.to_string(),
    };
    AuthNotice::Error(text)
}
