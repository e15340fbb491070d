//! Rahasia Dapur client core
//!
//! [`AppContext`] is built once at process start and owns every piece of
//! shared state: the key-value store, the theme resolver, the session store,
//! the API client and the navigation state. Screens borrow from it instead of
//! reaching for globals.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::Arc;

use app_core::auth::{AuthService, LoginForm, RegisterForm};
use app_core::recipes::RecipeFeed;
use app_state::{ColorScheme, SessionStatus, SessionStore, ThemeResolver};
use app_ui::navigation::{NavigationState, Notice, NoticeKind, Route};
use app_ui::theme::{get_theme, Theme};
use recipe_client::{ApiClient, ApiConfig, User};
use storage::{KeyValueStore, KvConfig, KvStore};
use thiserror::Error;
use tokio::sync::watch;

pub use app_core;
pub use app_state;
pub use app_ui;
pub use recipe_client;
pub use storage;

/// Application errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Key-value store could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] storage::KvError),

    /// API client could not be configured
    #[error("API error: {0}")]
    Api(#[from] recipe_client::Error),
}

/// Result type for application setup
pub type Result<T> = std::result::Result<T, AppError>;

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`. Returns false if a subscriber
/// was already installed.
pub fn init_tracing() -> bool {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).try_init().is_ok()
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Key-value store settings
    pub kv: KvConfig,
    /// Backend settings
    pub api: ApiConfig,
}

impl AppConfig {
    /// Create a configuration
    pub fn new(kv: KvConfig, api: ApiConfig) -> Self {
        Self { kv, api }
    }

    /// Default store location with the backend URL from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self { kv: KvConfig::default(), api: ApiConfig::from_env()? })
    }
}

/// Process-wide application state
pub struct AppContext {
    theme: Arc<ThemeResolver>,
    sessions: Arc<SessionStore>,
    api: Arc<ApiClient>,
    auth: AuthService<ApiClient>,
    feed: RecipeFeed<ApiClient>,
    navigation: NavigationState,
    session_rx: watch::Receiver<SessionStatus>,
}

impl AppContext {
    /// Open the store and wire everything together
    pub fn new(config: AppConfig, os_scheme: Option<ColorScheme>) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(KvStore::new(config.kv)?);
        Self::with_store(store, config.api, os_scheme)
    }

    /// Wire everything together over an existing store
    pub fn with_store(
        store: Arc<dyn KeyValueStore>,
        api_config: ApiConfig,
        os_scheme: Option<ColorScheme>,
    ) -> Result<Self> {
        let theme = Arc::new(ThemeResolver::new(store.clone(), os_scheme));
        let sessions = Arc::new(SessionStore::new(store));
        let api = Arc::new(ApiClient::new(api_config)?.with_token_provider(sessions.clone()));

        let session_rx = sessions.subscribe();
        let navigation = NavigationState::new(sessions.status());

        tracing::info!(
            base_url = %api.config().base_url,
            signed_in = sessions.status().is_authenticated(),
            "application context ready"
        );

        Ok(Self {
            auth: AuthService::new(api.clone(), sessions.clone()),
            feed: RecipeFeed::new(api.clone()),
            theme,
            sessions,
            api,
            navigation,
            session_rx,
        })
    }

    /// Theme resolver
    pub fn theme(&self) -> &Arc<ThemeResolver> {
        &self.theme
    }

    /// Palette for the current effective scheme
    pub fn palette(&self) -> Theme {
        get_theme(self.theme.effective_scheme())
    }

    /// Session store
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Signed-in user
    pub fn current_user(&self) -> Option<User> {
        self.sessions.current_user()
    }

    /// API client
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Recipe feed
    pub fn feed(&self) -> &RecipeFeed<ApiClient> {
        &self.feed
    }

    /// Navigation state
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Mutable navigation state
    pub fn navigation_mut(&mut self) -> &mut NavigationState {
        &mut self.navigation
    }

    /// Apply a pending session status change to navigation
    ///
    /// Returns true if navigation was redirected.
    pub fn sync_navigation(&mut self) -> bool {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return false;
        }
        let status = *self.session_rx.borrow_and_update();
        self.navigation.on_session_change(status);
        true
    }

    /// Sign in and redirect to the app screens
    pub async fn login(&mut self, form: &LoginForm) -> app_core::auth::Result<User> {
        let user = self.auth.login(form).await?;
        self.sync_navigation();
        Ok(user)
    }

    /// Create an account, then show the login screen
    pub async fn register(&mut self, form: &RegisterForm) -> app_core::auth::Result<()> {
        self.auth.register(form).await?;
        self.navigation.navigate(Route::Login);
        self.navigation.show_notice(Notice::registered());
        Ok(())
    }

    /// Confirm logout: clear the session and redirect to login
    ///
    /// The redirect happens even if the stored session could not be
    /// removed; the error is returned and shown as a notice.
    pub fn logout(&mut self) -> app_core::auth::Result<()> {
        let notice = self.navigation.logout_notice();
        self.navigation.cancel_logout();
        self.feed.cancel_pending();
        let result = self.auth.logout();
        self.sync_navigation();

        match &result {
            Ok(()) => self.navigation.show_notice(notice),
            Err(e) => {
                let notice = Notice::new(NoticeKind::Error, e.user_message(), None);
                self.navigation.show_notice(notice);
            }
        }
        result
    }
}
