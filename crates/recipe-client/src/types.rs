//! Wire types for the recipe backend
//!
//! Recipes are server-owned and read-only on the client.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Response Envelope
// =============================================================================

/// A response body that is either `{ "data": T }` or a bare `T`
///
/// The backend returns both shapes depending on the endpoint and deployment.
/// Callers should unwrap with [`Envelope::into_inner`] immediately.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{ "data": T }`
    Wrapped {
        /// Payload
        data: T,
    },
    /// Bare payload
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwrap to the payload regardless of shape
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

/// Error body returned by the backend on failures
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Recipes
// =============================================================================

/// Recipe difficulty as labelled by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Easy
    Mudah,
    /// Medium
    Sedang,
    /// Hard
    Sulit,
}

impl Difficulty {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Mudah => "Mudah",
            Difficulty::Sedang => "Sedang",
            Difficulty::Sulit => "Sulit",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A recipe as served by `GET /recipes` and `GET /recipes/{id}`
///
/// The list endpoint may omit the long-form fields, so those default to
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe ID (numeric IDs are accepted and stringified)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Title
    pub title: String,
    /// Category label, e.g. "Nasi" or "Sup"
    pub category: String,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Cooking time, free text ("30 menit")
    #[serde(default)]
    pub time: String,
    /// Servings, free text ("4 porsi")
    #[serde(default)]
    pub servings: String,
    /// Image URL
    #[serde(default)]
    pub image: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Step lines
    #[serde(default)]
    pub steps: Vec<String>,
    /// Video URL (YouTube)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Cooking tips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

// =============================================================================
// Auth
// =============================================================================

/// Authenticated user profile
///
/// Only `name` and `email` are relied upon; any other fields the server sends
/// are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Additional server-provided fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Create a user with no extra fields
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), extra: Map::new() }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email
    pub email: String,
    /// Password
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Password
    pub password: String,
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token
    pub token: String,
    /// Authenticated user
    pub user: User,
}
