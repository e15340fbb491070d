//! Theme preference and effective color scheme
//!
//! The user picks one of system/light/dark. The scheme actually rendered is
//! derived from that preference and the last appearance reported by the OS,
//! and is never stored.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use storage::KeyValueStore;
use thiserror::Error;
use tokio::sync::watch;

/// Storage key for the persisted preference
pub const THEME_PREFERENCE_KEY: &str = "theme_preference";

/// Theme errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    /// Raw input is not one of "system", "light", "dark"
    #[error("Invalid theme preference: {0}")]
    InvalidPreference(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;

/// User-selected appearance mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the OS
    #[default]
    System,
    /// Always light
    Light,
    /// Always dark
    Dark,
}

impl ThemePreference {
    /// All preferences in settings-menu order
    pub const ALL: [ThemePreference; 3] =
        [ThemePreference::System, ThemePreference::Light, ThemePreference::Dark];

    /// Persisted string value
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::System => "system",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Label shown in the settings modal
    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::System => "Sistem",
            ThemePreference::Light => "Terang",
            ThemePreference::Dark => "Gelap",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = ThemeError;

    /// Exact lowercase match only
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "system" => Ok(ThemePreference::System),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            _ => Err(ThemeError::InvalidPreference(s.to_string())),
        }
    }
}

/// Rendered appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light mode
    #[default]
    Light,
    /// Dark mode
    Dark,
}

impl ColorScheme {
    /// Check if this is the dark scheme
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

/// Derive the effective scheme from a preference and the OS signal
///
/// With `System`, the OS scheme wins; an OS with no preference yields light.
pub fn resolve_scheme(preference: ThemePreference, os: Option<ColorScheme>) -> ColorScheme {
    match preference {
        ThemePreference::System => os.unwrap_or(ColorScheme::Light),
        ThemePreference::Light => ColorScheme::Light,
        ThemePreference::Dark => ColorScheme::Dark,
    }
}

#[derive(Debug, Clone, Copy)]
struct ThemeState {
    preference: ThemePreference,
    os_scheme: Option<ColorScheme>,
}

/// Owner of the active appearance mode
///
/// Construct once at startup and share through the application context.
/// Every preference or OS change re-derives the effective scheme and
/// publishes it to subscribers before returning.
pub struct ThemeResolver {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<ThemeState>,
    scheme_tx: watch::Sender<ColorScheme>,
}

impl ThemeResolver {
    /// Load the persisted preference
    ///
    /// A missing, unrecognized or unreadable value falls back to `System`.
    pub fn new(store: Arc<dyn KeyValueStore>, os_scheme: Option<ColorScheme>) -> Self {
        let preference = Self::load(store.as_ref());
        let (scheme_tx, _) = watch::channel(resolve_scheme(preference, os_scheme));

        Self { store, state: RwLock::new(ThemeState { preference, os_scheme }), scheme_tx }
    }

    fn load(store: &dyn KeyValueStore) -> ThemePreference {
        match store.get(THEME_PREFERENCE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(value = %raw, "ignoring unrecognized theme preference");
                ThemePreference::System
            }),
            Ok(None) => ThemePreference::System,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference");
                ThemePreference::System
            }
        }
    }

    /// Current preference
    pub fn preference(&self) -> ThemePreference {
        self.state.read().preference
    }

    /// Currently rendered scheme
    pub fn effective_scheme(&self) -> ColorScheme {
        let state = self.state.read();
        resolve_scheme(state.preference, state.os_scheme)
    }

    /// Last appearance reported by the OS
    pub fn os_scheme(&self) -> Option<ColorScheme> {
        self.state.read().os_scheme
    }

    /// Change and persist the preference
    ///
    /// The write is not awaited for success: a storage failure is logged and
    /// the in-memory preference still changes.
    pub fn set_preference(&self, preference: ThemePreference) {
        {
            let mut state = self.state.write();
            state.preference = preference;
        }

        if let Err(e) = self.store.set(THEME_PREFERENCE_KEY, preference.as_str()) {
            tracing::warn!(error = %e, %preference, "failed to persist theme preference");
        }

        tracing::debug!(%preference, "theme preference changed");
        self.publish();
    }

    /// Change the preference from raw input
    pub fn set_preference_str(&self, raw: &str) -> Result<()> {
        let preference = raw.parse()?;
        self.set_preference(preference);
        Ok(())
    }

    /// Feed the OS appearance signal
    pub fn set_os_scheme(&self, os_scheme: Option<ColorScheme>) {
        self.state.write().os_scheme = os_scheme;
        self.publish();
    }

    /// Subscribe to effective scheme changes
    pub fn subscribe(&self) -> watch::Receiver<ColorScheme> {
        self.scheme_tx.subscribe()
    }

    fn publish(&self) {
        let scheme = self.effective_scheme();
        self.scheme_tx.send_if_modified(|current| {
            if *current == scheme {
                false
            } else {
                *current = scheme;
                true
            }
        });
    }
}
