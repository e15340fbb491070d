//! Persisted login session
//!
//! The session (bearer token plus user profile) is written as one JSON record
//! so token and user are always set and cleared together. Stores written by
//! older clients kept them under separate `token` and `user` keys; those are
//! still read when no record exists.

use parking_lot::RwLock;
use recipe_client::{TokenProvider, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::KeyValueStore;
use tokio::sync::watch;

/// Storage key for the session record
pub const SESSION_KEY: &str = "session";

const LEGACY_TOKEN_KEY: &str = "token";
const LEGACY_USER_KEY: &str = "user";

// Written in place of the record when it cannot be removed
const SESSION_TOMBSTONE: &str = "";

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token
    pub token: String,
    /// Signed-in user
    pub user: User,
}

/// Whether a session is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// A session is stored
    Authenticated,
    /// No session
    Unauthenticated,
}

impl SessionStatus {
    /// Check if authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated)
    }
}

/// Accessor for the persisted session
///
/// The loaded session is cached in memory so the API client can read the
/// token on every request without touching storage.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    current: RwLock<Option<Session>>,
    status_tx: watch::Sender<SessionStatus>,
}

impl SessionStore {
    /// Load any persisted session
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let current = read_session(store.as_ref());
        let (status_tx, _) = watch::channel(status_of(&current));

        Self { store, current: RwLock::new(current), status_tx }
    }

    /// Persist a new session
    ///
    /// The token is stored as given. Returns an error only if the write
    /// itself fails, in which case the in-memory session is left unchanged.
    pub fn save_session(&self, token: impl Into<String>, user: User) -> storage::Result<()> {
        let session = Session { token: token.into(), user };
        let raw = serde_json::to_string(&session)?;
        self.store.set(SESSION_KEY, &raw)?;

        *self.current.write() = Some(session);
        tracing::debug!("session saved");
        self.publish(SessionStatus::Authenticated);
        Ok(())
    }

    /// Re-read the session from storage
    ///
    /// Returns `None` if nothing is stored or the stored data does not parse.
    pub fn load_session(&self) -> Option<Session> {
        let session = read_session(self.store.as_ref());
        *self.current.write() = session.clone();
        self.publish(status_of(&session));
        session
    }

    /// Remove the session; safe to call when none exists
    ///
    /// The in-memory session is always dropped. If a key cannot be removed,
    /// the record is overwritten with an empty tombstone, which reads as no
    /// session and hides any legacy keys. An error is returned only when
    /// neither the removal nor the tombstone write succeeded.
    pub fn clear_session(&self) -> storage::Result<()> {
        let mut failed = None;
        for key in [SESSION_KEY, LEGACY_TOKEN_KEY, LEGACY_USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(error = %e, key, "failed to remove session key");
                if failed.is_none() {
                    failed = Some(e);
                }
            }
        }

        *self.current.write() = None;
        self.publish(SessionStatus::Unauthenticated);

        match failed {
            None => {
                tracing::debug!("session cleared");
                Ok(())
            }
            Some(remove_err) => match self.store.set(SESSION_KEY, SESSION_TOMBSTONE) {
                Ok(()) => {
                    tracing::debug!("session tombstoned");
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to tombstone session");
                    Err(remove_err)
                }
            },
        }
    }

    /// Session currently in memory
    pub fn session(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// Signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.current.read().as_ref().map(|s| s.user.clone())
    }

    /// Current status
    pub fn status(&self) -> SessionStatus {
        *self.status_tx.borrow()
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }

    fn publish(&self, status: SessionStatus) {
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}

impl TokenProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.token.clone())
    }
}

fn status_of(session: &Option<Session>) -> SessionStatus {
    if session.is_some() {
        SessionStatus::Authenticated
    } else {
        SessionStatus::Unauthenticated
    }
}

fn read_session(store: &dyn KeyValueStore) -> Option<Session> {
    match store.get(SESSION_KEY) {
        Ok(Some(raw)) if raw == SESSION_TOMBSTONE => None,
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed session record");
                None
            }
        },
        Ok(None) => read_legacy_session(store),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read session");
            None
        }
    }
}

fn read_legacy_session(store: &dyn KeyValueStore) -> Option<Session> {
    let token = store.get(LEGACY_TOKEN_KEY).ok().flatten()?;
    let raw_user = store.get(LEGACY_USER_KEY).ok().flatten()?;

    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Some(Session { token, user }),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed legacy user");
            None
        }
    }
}
