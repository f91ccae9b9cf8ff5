//! Display rows for the sessions view.

use crate::relative_time::format_relative;
use crate::user_agent;
use api_client::SessionMeta;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use view_lifecycle::MountToken;

/// Label pinned to the caller's own session instead of a moving timestamp.
pub const CURRENT_SESSION_LABEL: &str = "Aktualna sesja";

/// One renderable row of the sessions table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub meta: SessionMeta,
    /// Whether this row is the caller's own session.
    pub current: bool,
    /// "Aktualna sesja" for the current session, a relative time otherwise.
    pub last_accessed: String,
    /// Parsed user-agent label, e.g. `Chrome 120, macOS`.
    pub agent: String,
}

/// Build the rows for a snapshot of the session list.
///
/// Pure over `now`, so the view can recompute the labels on every clock tick
/// without refetching anything. Order of the input is preserved.
pub fn build_rows(sessions: &[SessionMeta], current_id: Option<&str>, now: i64) -> Vec<SessionRow> {
    sessions
        .iter()
        .map(|meta| {
            let current = current_id == Some(meta.id.as_str());
            let last_accessed = if current {
                CURRENT_SESSION_LABEL.to_string()
            } else {
                format_relative(now, meta.last_accessed_at)
            };
            let agent = user_agent::parse(&meta.user_agent).label(&meta.user_agent);
            SessionRow {
                meta: meta.clone(),
                current,
                last_accessed,
                agent,
            }
        })
        .collect()
}

/// Spawn the one-second clock driving relative-time recomputation.
///
/// Publishes the current Unix time every second while the view is mounted;
/// the loop exits on unmount or once every receiver is gone.
pub fn spawn_clock(token: MountToken) -> (JoinHandle<()>, watch::Receiver<i64>) {
    let (tx, rx) = watch::channel(chrono::Utc::now().timestamp());
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if !token.is_mounted() {
                break;
            }
            if tx.send(chrono::Utc::now().timestamp()).is_err() {
                break;
            }
        }
    });
    (handle, rx)
}
