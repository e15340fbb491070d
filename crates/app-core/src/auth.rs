//! Authentication service for Rahasia Dapur
//!
//! This module provides the login, registration and logout flows behind the
//! auth screens: client-side form validation, the backend calls, persisting
//! the session, and turning backend failures into Indonesian messages.

use app_state::SessionStore;
use recipe_client::{AuthApi, LoginRequest, RegisterRequest, User};
use std::sync::Arc;
use thiserror::Error;

/// Shown when the login form has an empty field
pub const MSG_LOGIN_INCOMPLETE: &str = "Mohon isi email dan password";

/// Shown when the register form has an empty field
pub const MSG_REGISTER_INCOMPLETE: &str = "Mohon lengkapi semua data";

/// Shown when password and confirmation differ
pub const MSG_PASSWORD_MISMATCH: &str = "Password tidak cocok";

/// Fallback for failures without a server message
pub const MSG_GENERIC_ERROR: &str = "Terjadi kesalahan";

/// Authentication service error types
#[derive(Debug, Error)]
pub enum AuthError {
    /// Form rejected before any request was made
    #[error("Validation failed: {0}")]
    Validation(&'static str),

    /// Backend rejected the request or was unreachable
    #[error("API error: {0}")]
    Api(#[from] recipe_client::Error),

    /// Session could not be persisted
    #[error("Session error: {0}")]
    Session(#[from] storage::KvError),
}

impl AuthError {
    /// Message to show on the auth screens
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Validation(message) => (*message).to_string(),
            AuthError::Api(e) => localize_auth_error(e.server_message()),
            AuthError::Session(_) => MSG_GENERIC_ERROR.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Substring rules mapping backend messages to screen copy
///
/// The backend only reports failures as free text, so this table is the one
/// place that depends on its wording. Patterns are lowercase.
const AUTH_ERROR_TABLE: &[(&[&str], &str)] = &[
    (&["invalid credentials", "invalid password"], "Password salah"),
    (&["not found", "no user"], "Email tidak ditemukan"),
];

/// Translate a backend error message for display
///
/// Known phrases are matched case-insensitively; anything else is passed
/// through unchanged, and a missing or blank message becomes a generic one.
pub fn localize_auth_error(server_message: Option<&str>) -> String {
    let message = match server_message {
        Some(m) if !m.trim().is_empty() => m,
        _ => return MSG_GENERIC_ERROR.to_string(),
    };

    let lowered = message.to_lowercase();
    AUTH_ERROR_TABLE
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| lowered.contains(p)))
        .map(|(_, localized)| (*localized).to_string())
        .unwrap_or_else(|| message.to_string())
}

/// Login form input
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Email
    pub email: String,
    /// Password
    pub password: String,
}

impl LoginForm {
    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation(MSG_LOGIN_INCOMPLETE));
        }
        Ok(())
    }
}

/// Registration form input
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub confirm_password: String,
}

impl RegisterForm {
    /// Check required fields and password confirmation
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(AuthError::Validation(MSG_REGISTER_INCOMPLETE));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::Validation(MSG_PASSWORD_MISMATCH));
        }
        Ok(())
    }
}

/// Authentication service
///
/// A successful login saves the session, which flips the session status
/// and lets navigation redirect to the app screens. Registration does not
/// sign the user in.
pub struct AuthService<A: AuthApi + ?Sized> {
    api: Arc<A>,
    sessions: Arc<SessionStore>,
}

impl<A: AuthApi + ?Sized> AuthService<A> {
    /// Create a new authentication service
    pub fn new(api: Arc<A>, sessions: Arc<SessionStore>) -> Self {
        Self { api, sessions }
    }

    /// Validate, sign in and persist the session
    pub async fn login(&self, form: &LoginForm) -> Result<User> {
        form.validate()?;

        let response = self
            .api
            .login(&LoginRequest { email: form.email.clone(), password: form.password.clone() })
            .await?;

        self.sessions.save_session(response.token, response.user.clone())?;
        tracing::info!("logged in");
        tracing::debug!(email = %response.user.email, "session user");
        Ok(response.user)
    }

    /// Validate and create an account
    pub async fn register(&self, form: &RegisterForm) -> Result<()> {
        form.validate()?;

        self.api
            .register(&RegisterRequest {
                name: form.name.clone(),
                email: form.email.clone(),
                password: form.password.clone(),
            })
            .await?;

        tracing::info!("registered");
        Ok(())
    }

    /// Clear the persisted session
    ///
    /// The user is signed out in memory even when this returns an error.
    pub fn logout(&self) -> Result<()> {
        let result = self.sessions.clear_session();
        tracing::info!("logged out");
        result.map_err(AuthError::from)
    }

    /// Session store this service writes to
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }
}
