//! Logout flow.
//!
//! Invalidates the session server-side, clears local state and sends the
//! user home. A 401 from the logout endpoint means the server already
//! forgot the session, so local state converges to logged-out the same way
//! a 2xx does.

use crate::{AuthApi, AuthFlowResult};
use error_boundary::{classify, FailureKind};
use session_store::SessionStore;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use view_lifecycle::{schedule_redirect, MountToken, Navigator, HOME_ROUTE};

use crate::controller::HOME_REDIRECT_DELAY;

/// Result of a logout attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoutOutcome {
    /// No session was present locally; nothing to invalidate.
    NoSession,
    /// Session invalidated server-side and cleared locally.
    LoggedOut,
    /// Server-side invalidation failed; local state untouched.
    Failed(FailureKind),
}

/// Invalidate the current session.
///
/// Local state is cleared only once the server confirms (or has already
/// forgotten the session); a transient failure leaves it intact so the
/// attempt can be repeated.
pub async fn logout<A: AuthApi>(api: &A, store: &SessionStore) -> AuthFlowResult<LogoutOutcome> {
    let session = match store.get()? {
        Some(s) => s,
        None => {
            info!("No local session, logout is a no-op");
            return Ok(LogoutOutcome::NoSession);
        }
    };

    match api.logout(&session.access_token).await {
        Ok(()) => {
            store.clear()?;
            info!("Session invalidated");
            Ok(LogoutOutcome::LoggedOut)
        }
        Err(e) => {
            let kind = classify(&e);
            if kind == FailureKind::Unauthorized {
                // Already invalid server-side; converge locally.
                store.clear()?;
                info!("Session already invalid server-side, cleared locally");
                Ok(LogoutOutcome::LoggedOut)
            } else {
                warn!(error = %e, "Logout request failed");
                Ok(LogoutOutcome::Failed(kind))
            }
        }
    }
}

/// State of the logout view.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoutState {
    Idle,
    InvalidatingSession,
    /// Terminal: home navigation scheduled.
    SessionInvalidated,
    /// Terminal pending an explicit user-triggered retry.
    Failed(FailureKind),
}

/// Drives the logout view: one attempt on activation, then a delayed
/// navigation home on success.
pub struct LogoutController<A> {
    api: A,
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    token: MountToken,
    state: Mutex<LogoutState>,
}

impl<A: AuthApi> LogoutController<A> {
    pub fn new(
        api: A,
        store: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        token: MountToken,
    ) -> Self {
        Self {
            api,
            store,
            navigator,
            token,
            state: Mutex::new(LogoutState::Idle),
        }
    }

    /// Run the logout attempt for this mount.
    pub async fn activate(&self) -> AuthFlowResult<()> {
        self.set_state(LogoutState::InvalidatingSession);
        match logout(&self.api, &self.store).await? {
            LogoutOutcome::NoSession | LogoutOutcome::LoggedOut => {
                self.set_state(LogoutState::SessionInvalidated);
                schedule_redirect(
                    self.navigator.clone(),
                    HOME_ROUTE,
                    HOME_REDIRECT_DELAY,
                    self.token.clone(),
                );
            }
            LogoutOutcome::Failed(kind) => {
                self.set_state(LogoutState::Failed(kind));
            }
        }
        Ok(())
    }

    /// Repeat the attempt after a failure.
    pub async fn retry(&self) -> AuthFlowResult<()> {
        self.activate().await
    }

    pub fn state(&self) -> LogoutState {
        self.state.lock().expect("logout state lock poisoned").clone()
    }

    fn set_state(&self, state: LogoutState) {
        *self.state.lock().expect("logout state lock poisoned") = state;
    }
}
