//! The process-wide session slot.
//!
//! `SessionStore` keeps at most one `Session` in memory and mirrors it to a
//! durable key/value backend. Expiry is checked against wall-clock time on
//! every read, never at write time, so a session that silently expires while
//! cached in memory is still rejected (and deleted) on the next `get()`.

use crate::{SessionStorage, StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, info};

/// Storage key holding the JSON-serialized session record.
pub const SESSION_KEY: &str = "session";

/// The caller's own credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque session identifier issued by the server.
    pub id: String,
    /// Account identifier.
    pub user_id: i64,
    /// Opaque bearer credential.
    pub access_token: String,
    /// Absolute Unix time (seconds) after which the session is invalid.
    pub expires_at: i64,
}

impl Session {
    /// Whether this session is invalid at the given wall-clock instant.
    pub fn is_expired(&self, now_unix_seconds: i64) -> bool {
        self.expires_at <= now_unix_seconds
    }
}

/// Owned-state slot for the local session.
///
/// Intentionally process-wide singleton state with an explicit lifecycle:
/// populated lazily on the first `get()`, torn down on `clear()`. All three
/// operations are synchronous and take the same cache lock, so no reader can
/// observe a partially written session.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    cached: Mutex<Option<Session>>,
}

impl SessionStore {
    /// Create a new store over the given persistence backend.
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            storage,
            cached: Mutex::new(None),
        }
    }

    /// Return the session if present and unexpired.
    ///
    /// Falls back to the persisted copy when nothing is cached, promoting a
    /// valid record to the cache. An expired record (cached or persisted) is
    /// deleted from both places and `None` is returned.
    pub fn get(&self) -> StorageResult<Option<Session>> {
        let mut cached = self.cached.lock().expect("session slot lock poisoned");
        let now = chrono::Utc::now().timestamp();

        if let Some(session) = cached.as_ref() {
            if session.is_expired(now) {
                debug!(session_id = %session.id, "Cached session expired, removing");
                *cached = None;
                self.storage.delete(SESSION_KEY)?;
                return Ok(None);
            }
            return Ok(Some(session.clone()));
        }

        let json = match self.storage.get(SESSION_KEY)? {
            Some(json) => json,
            None => return Ok(None),
        };

        let session: Session = serde_json::from_str(&json)
            .map_err(|e| StorageError::Encoding(e.to_string()))?;

        if session.is_expired(now) {
            info!(session_id = %session.id, "Persisted session expired, removing");
            self.storage.delete(SESSION_KEY)?;
            return Ok(None);
        }

        *cached = Some(session.clone());
        Ok(Some(session))
    }

    /// Persist and cache a session atomically with respect to readers.
    pub fn set(&self, session: Session) -> StorageResult<()> {
        let mut cached = self.cached.lock().expect("session slot lock poisoned");
        let json = serde_json::to_string(&session)
            .map_err(|e| StorageError::Encoding(e.to_string()))?;
        self.storage.set(SESSION_KEY, &json)?;
        debug!(session_id = %session.id, user_id = session.user_id, "Session stored");
        *cached = Some(session);
        Ok(())
    }

    /// Remove both the cached and the persisted copy.
    pub fn clear(&self) -> StorageResult<()> {
        let mut cached = self.cached.lock().expect("session slot lock poisoned");
        *cached = None;
        self.storage.delete(SESSION_KEY)?;
        info!("Session cleared");
        Ok(())
    }
}
