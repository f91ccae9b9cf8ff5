//! Cached activity log with list-wide blur disclosure.

use crate::format::{format_activity, FormattedActivity};
use crate::ActivityApi;
use api_client::ActivityLogEntry;
use error_boundary::classify;
use session_store::SessionStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, warn};
use view_lifecycle::{MountToken, Notice, Notifier};

/// Faults the feed cannot turn into a notice.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Local session storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] session_store::StorageError),

    /// No local session; the feed requires an authenticated caller
    #[error("Not authenticated")]
    NotAuthenticated,
}

pub type FeedResult<T> = Result<T, FeedError>;

/// One renderable row of the activity log.
///
/// `detail` is withheld while the list is blurred; the underlying entry is
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub id: i64,
    pub title: String,
    pub detail: Option<String>,
}

/// The account activity log as the security view consumes it.
///
/// Loaded once per activation, no polling. Details are blurred by default;
/// disclosure is a single reversible switch covering every row at once.
pub struct ActivityFeed<A> {
    api: A,
    store: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    token: MountToken,
    entries: Mutex<Vec<ActivityLogEntry>>,
    loaded: AtomicBool,
    revealed: AtomicBool,
}

impl<A: ActivityApi> ActivityFeed<A> {
    pub fn new(
        api: A,
        store: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        token: MountToken,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            token,
            entries: Mutex::new(Vec::new()),
            loaded: AtomicBool::new(false),
            revealed: AtomicBool::new(false),
        }
    }

    /// Fetch the log once for this activation.
    ///
    /// Subsequent calls on the same mount are no-ops. On failure any cached
    /// entries stay visible and the user gets a transient notice.
    pub async fn load(&self) -> FeedResult<()> {
        if self.loaded.swap(true, Ordering::SeqCst) {
            debug!("Activity log already loaded for this activation");
            return Ok(());
        }

        let access_token = self
            .store
            .get()?
            .map(|s| s.access_token)
            .ok_or(FeedError::NotAuthenticated)?;

        match self.api.activities(&access_token).await {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
                if !self.token.is_mounted() {
                    debug!("Discarding activity log, view unmounted");
                    return Ok(());
                }
                debug!(count = entries.len(), "Activity log loaded");
                *self.entries.lock().expect("entries lock poisoned") = entries;
            }
            Err(e) => {
                warn!(error = %e, "Activity log fetch failed");
                self.notifier.notify(Notice {
                    title: "Wystąpił błąd".to_string(),
                    detail: classify(&e).message(),
                });
            }
        }
        Ok(())
    }

    /// Flip the list-wide blur switch.
    pub fn toggle_disclosure(&self) {
        self.revealed.fetch_xor(true, Ordering::SeqCst);
    }

    /// Whether details are currently shown.
    pub fn revealed(&self) -> bool {
        self.revealed.load(Ordering::SeqCst)
    }

    /// Render the cached entries, newest first.
    pub fn rows(&self) -> Vec<ActivityRow> {
        let revealed = self.revealed();
        self.entries
            .lock()
            .expect("entries lock poisoned")
            .iter()
            .map(|entry| {
                let FormattedActivity { title, detail } = format_activity(entry);
                ActivityRow {
                    id: entry.id,
                    title,
                    detail: if revealed { detail } else { None },
                }
            })
            .collect()
    }
}
