//! HTTP client for the recipe backend
//!
//! Every request is JSON and carries `Authorization: Bearer <token>` when a
//! [`TokenProvider`] is attached and yields a token. Failures are returned to
//! the caller as [`Error`]; nothing here retries.

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::types::{AuthResponse, Envelope, ErrorBody, LoginRequest, Recipe, RegisterRequest};
use crate::{Error, Result};

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "RAHASIA_DAPUR_API_URL";

// =============================================================================
// Seams
// =============================================================================

/// Source of the bearer token attached to outgoing requests
pub trait TokenProvider: Send + Sync {
    /// Current token, if the user is signed in
    fn token(&self) -> Option<String>;
}

/// Recipe endpoints
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// `GET /recipes`
    async fn list_recipes(&self) -> Result<Vec<Recipe>>;

    /// `GET /recipes/{id}`
    async fn get_recipe(&self, id: &str) -> Result<Recipe>;
}

/// Authentication endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> Result<()>;
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "https://api.example.com")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl ApiConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Rahasia-Dapur/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }

    /// Read the base URL from [`API_URL_ENV`]
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Ok(Self::new(url.trim())),
            _ => Err(Error::Config(format!("{} is not set", API_URL_ENV))),
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Join a path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Client
// =============================================================================

/// Recipe backend client
#[derive(Clone)]
pub struct ApiClient {
    client: ReqwestClient,
    config: ApiConfig,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl ApiClient {
    /// Create a new client
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(Error::Config("base URL cannot be empty".to_string()));
        }

        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config, token_provider: None })
    }

    /// Attach the source of bearer tokens
    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.config.url(path))
            .header("Content-Type", "application/json");

        for (key, value) in &self.config.default_headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if let Some(token) = self.token_provider.as_ref().and_then(|p| p.token()) {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Vec<u8>> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        tracing::debug!(%status, path, "request failed");

        if status == StatusCode::NOT_FOUND && path.starts_with("/recipes/") {
            return Err(Error::NotFound(path.to_string()));
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());

        Err(Error::Api { status: status.as_u16(), message })
    }

    async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.send(self.request(Method::GET, path), path).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.into_inner())
    }
}

#[async_trait]
impl RecipeApi for ApiClient {
    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let recipes: Vec<Recipe> = self.get_json("/recipes").await?;
        tracing::debug!(count = recipes.len(), "fetched recipes");
        Ok(recipes)
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe> {
        if id.trim().is_empty() {
            return Err(Error::NotFound("/recipes/".to_string()));
        }
        let path = format!("/recipes/{}", urlencoding::encode(id));
        self.get_json(&path).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let path = "/auth/login";
        let body = self
            .send(self.request(Method::POST, path).json(request), path)
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let path = "/auth/register";
        self.send(self.request(Method::POST, path).json(request), path)
            .await?;
        Ok(())
    }
}
