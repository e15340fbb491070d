//! Application state for Rahasia Dapur
//!
//! This crate owns the two pieces of process-wide state the screens read:
//! the theme preference (resolved against the OS appearance signal) and the
//! persisted login session. Both are backed by a [`storage::KeyValueStore`]
//! and publish changes over `tokio::sync::watch` channels.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;
pub mod theme;

pub use session::{Session, SessionStatus, SessionStore, SESSION_KEY};
pub use theme::{
    resolve_scheme, ColorScheme, ThemeError, ThemePreference, ThemeResolver, THEME_PREFERENCE_KEY,
};
