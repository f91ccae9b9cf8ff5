//! Login flow controller.
//!
//! Drives the OAuth handshake as an explicit state machine. A mount
//! activates the controller exactly once with the current route parameters:
//! no parameters means a fresh login (fetch the authorization URL and
//! redirect away), a `code` parameter means the provider sent the user back
//! (exchange it for a session), an `error` parameter means the provider
//! declined.

use crate::login_fsm::{AuthFlowState, LoginFlowInput, LoginFlowMachine, LoginFlowState};
use crate::{AuthApi, AuthFlowError, AuthFlowResult};
use error_boundary::{classify, classify_provider, FailureKind};
use session_store::{Session, SessionStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};
use view_lifecycle::{schedule_redirect, MountToken, Navigator, HOME_ROUTE};

/// How long the success confirmation stays on screen before the full-page
/// navigation home. A UX contract, not a technical necessity.
pub const HOME_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Query parameters of the mount's route.
#[derive(Debug, Clone, Default)]
pub struct RouteParams {
    /// One-time authorization code returned by the provider.
    pub code: Option<String>,
    /// Error value supplied by the provider, e.g. `access_denied`.
    pub error: Option<String>,
}

impl RouteParams {
    fn authorization_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }

    fn provider_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// A live session already exists; the flow was skipped entirely.
    AlreadyAuthenticated,
    /// The flow ran; inspect [`AuthFlowController::state`] for the result.
    Activated,
    /// A second activation on the same mount was ignored.
    Ignored,
}

/// Orchestrates one login attempt per mount.
pub struct AuthFlowController<A> {
    api: A,
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    token: MountToken,
    machine: Mutex<LoginFlowMachine>,
    session: Mutex<Option<Session>>,
    failure: Mutex<Option<FailureKind>>,
    activated: AtomicBool,
}

impl<A: AuthApi> AuthFlowController<A> {
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
            machine: Mutex::new(LoginFlowMachine::new()),
            session: Mutex::new(None),
            failure: Mutex::new(None),
            activated: AtomicBool::new(false),
        }
    }

    /// Run the flow for this mount.
    ///
    /// Queries the session store first: with a live session the flow is
    /// skipped entirely (no transport call, no transition), which prevents
    /// double-redirect loops when the login view is mounted while already
    /// logged in. At most one activation is processed per mount; the effect
    /// re-firing before route parameters settle is ignored.
    pub async fn activate(&self, params: &RouteParams) -> AuthFlowResult<ActivationOutcome> {
        if self.activated.swap(true, Ordering::SeqCst) {
            debug!("Ignoring repeated activation on the same mount");
            return Ok(ActivationOutcome::Ignored);
        }

        if self.store.get()?.is_some() {
            info!("Live session present, skipping login flow");
            return Ok(ActivationOutcome::AlreadyAuthenticated);
        }

        if let Some(error) = params.provider_error() {
            warn!(error = %error, "Provider returned an error");
            self.transition(&LoginFlowInput::ProviderDenied)?;
            self.set_failure(classify_provider(error));
            return Ok(ActivationOutcome::Activated);
        }

        match params.authorization_code() {
            Some(code) => self.authorize(code).await?,
            None => self.begin_redirect().await?,
        }
        Ok(ActivationOutcome::Activated)
    }

    /// Re-enter the flow from `Failed` after an explicit user retry.
    ///
    /// Restarts from the authorization URL: a failed exchange consumed its
    /// one-time code, so the only way forward is a fresh handshake.
    pub async fn retry(&self) -> AuthFlowResult<()> {
        self.transition(&LoginFlowInput::RetryRequested)?;
        *self.failure.lock().expect("failure lock poisoned") = None;
        self.begin_redirect().await
    }

    /// Current flow state with its payload.
    pub fn state(&self) -> AuthFlowState {
        let machine = self.machine.lock().expect("login flow lock poisoned");
        match machine.state() {
            LoginFlowState::Idle => AuthFlowState::Idle,
            LoginFlowState::GeneratingAuthUrl => AuthFlowState::GeneratingAuthUrl,
            LoginFlowState::AwaitingProvider => AuthFlowState::AwaitingProvider,
            LoginFlowState::Authorizing => AuthFlowState::Authorizing,
            LoginFlowState::Succeeded => {
                let session = self
                    .session
                    .lock()
                    .expect("session lock poisoned")
                    .clone()
                    .expect("session set on exchange success");
                AuthFlowState::Succeeded(session)
            }
            LoginFlowState::Failed => {
                let failure = self
                    .failure
                    .lock()
                    .expect("failure lock poisoned")
                    .clone()
                    .expect("failure set on entry to Failed");
                AuthFlowState::Failed(failure)
            }
        }
    }

    async fn begin_redirect(&self) -> AuthFlowResult<()> {
        self.transition(&LoginFlowInput::RequestAuthUrl)?;
        match self.api.auth_url().await {
            Ok(url) => {
                // Irreversible from this controller's perspective: there is
                // no resumption callback, the next activation is a fresh
                // mount carrying a code or error parameter.
                self.transition(&LoginFlowInput::RedirectIssued)?;
                info!("Redirecting to the authorization provider");
                self.navigator.assign(&url);
            }
            Err(e) => {
                warn!(error = %e, "Failed to obtain authorization URL");
                self.transition(&LoginFlowInput::RequestFailed)?;
                self.set_failure(classify(&e));
            }
        }
        Ok(())
    }

    async fn authorize(&self, code: &str) -> AuthFlowResult<()> {
        self.transition(&LoginFlowInput::SubmitCode)?;
        match self.api.exchange_code(code).await {
            Ok(session) => {
                self.store.set(session.clone())?;
                *self.session.lock().expect("session lock poisoned") = Some(session);
                self.transition(&LoginFlowInput::ExchangeSucceeded)?;
                info!("Authorization exchange succeeded");
                schedule_redirect(
                    self.navigator.clone(),
                    HOME_ROUTE,
                    HOME_REDIRECT_DELAY,
                    self.token.clone(),
                );
            }
            Err(e) => {
                warn!(error = %e, "Authorization exchange failed");
                self.transition(&LoginFlowInput::RequestFailed)?;
                self.set_failure(classify(&e));
            }
        }
        Ok(())
    }

    fn set_failure(&self, kind: FailureKind) {
        *self.failure.lock().expect("failure lock poisoned") = Some(kind);
    }

    fn transition(&self, input: &LoginFlowInput) -> AuthFlowResult<()> {
        let mut machine = self.machine.lock().expect("login flow lock poisoned");
        let old_state = machine.state().clone();
        machine.consume(input).map_err(|_| {
            AuthFlowError::InvalidTransition(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                machine.state()
            ))
        })?;
        debug!(from = ?old_state, to = ?machine.state(), "Login flow transition");
        Ok(())
    }
}
