//! Rahasia Dapur API client
//!
//! This crate talks to the recipe backend: the recipe list and detail
//! endpoints and the login/register endpoints. Response shapes the backend
//! is inconsistent about are normalized here, before anything reaches the
//! state or core crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiConfig, AuthApi, RecipeApi, TokenProvider, API_URL_ENV};
pub use types::{AuthResponse, Difficulty, Envelope, LoginRequest, Recipe, RegisterRequest, User};

/// Result type for API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for API operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// API error with status code and the server's message, if any
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from server
        message: Option<String>,
    },
}

impl Error {
    /// The human-readable message the server attached to a failed response
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a failed response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::NotFound(_) => Some(404),
            Error::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
