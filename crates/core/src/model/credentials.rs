use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("please enter a valid email address")]
    InvalidEmail,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("display name cannot be empty")]
    EmptyDisplayName,
}

/// Email/password pair checked before it reaches the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Normalizes the email (trimmed, lowercased) and checks both fields.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError` if the email has no `@` or the password is short.
    pub fn new(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let email = email.trim().to_lowercase();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(CredentialsError::InvalidEmail),
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::PasswordTooShort);
        }
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Trims a display name for sign-up.
///
/// # Errors
///
/// Returns `CredentialsError::EmptyDisplayName` when nothing is left after trimming.
pub fn normalize_display_name(raw: &str) -> Result<String, CredentialsError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CredentialsError::EmptyDisplayName);
    }
    Ok(name.to_string())
}
