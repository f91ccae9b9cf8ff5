//! Background refresh loop for the session list.

use crate::{RegistryApi, SessionRegistry};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use view_lifecycle::{MountToken, PollGate};

/// How often the mounted sessions view refreshes its list.
pub const POLL_PERIOD: Duration = Duration::from_secs(5);

/// Spawn the poll loop for a mounted sessions view.
///
/// Refreshes immediately and then every [`POLL_PERIOD`]. Each tick awaits its
/// refresh to completion before the next one is considered, so a slow request
/// delays the schedule instead of stacking requests. Ticks are skipped while
/// the gate is closed (hidden view or offline client) and the loop exits once
/// the view unmounts or the gate channel closes.
pub fn spawn_poller<A>(
    registry: Arc<SessionRegistry<A>>,
    mut gate: watch::Receiver<PollGate>,
    token: MountToken,
) -> JoinHandle<()>
where
    A: RegistryApi + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(POLL_PERIOD);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !token.is_mounted() {
                        break;
                    }
                    if !gate.borrow().open() {
                        debug!("Poll gate closed, skipping refresh");
                        continue;
                    }
                    if let Err(e) = registry.refresh().await {
                        warn!(error = %e, "Session poll failed");
                    }
                }
                changed = gate.changed() => {
                    if changed.is_err() || !token.is_mounted() {
                        break;
                    }
                }
            }
        }
        debug!("Session poller stopped");
    })
}
