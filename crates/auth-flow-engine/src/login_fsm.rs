//! Login flow state machine using rust-fsm.
//!
//! ## State Diagram
//!
//! ```text
//! ┌──────────┐ RequestAuthUrl ┌───────────────────┐ RedirectIssued ┌──────────────────┐
//! │   Idle   │ ──────────────►│ GeneratingAuthUrl │ ──────────────►│ AwaitingProvider │
//! └─────┬────┘                └─────────┬─────────┘                └──────────────────┘
//!       │                               │ RequestFailed            (redirect leaves the
//!       │ SubmitCode                    ▼                           controller's mount;
//!       │                         ┌──────────┐                      the next activation
//!       │      ProviderDenied ───►│  Failed  │                      is a fresh mount)
//!       │                         └────┬─────┘
//!       ▼                              │ RetryRequested ──► Idle
//! ┌─────────────┐ ExchangeSucceeded ┌───────────┐
//! │ Authorizing │ ─────────────────►│ Succeeded │
//! └─────┬───────┘                   └───────────┘
//!       │ RequestFailed ──► Failed
//! ```
//!
//! The machine carries no payloads; the controller holds the resulting
//! `Session` or `FailureKind` beside it and exposes both through the public
//! [`AuthFlowState`].

use error_boundary::FailureKind;
use rust_fsm::*;
use session_store::Session;

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub login_flow(Idle)

    Idle => {
        RequestAuthUrl => GeneratingAuthUrl,
        SubmitCode => Authorizing,
        ProviderDenied => Failed
    },
    GeneratingAuthUrl => {
        RedirectIssued => AwaitingProvider,
        RequestFailed => Failed
    },
    Authorizing => {
        ExchangeSucceeded => Succeeded,
        RequestFailed => Failed
    },
    Failed => {
        RetryRequested => Idle
    }
}

pub use login_flow::Input as LoginFlowInput;
pub use login_flow::State as LoginFlowState;
pub use login_flow::StateMachine as LoginFlowMachine;

/// Public view of the login flow, one active member at a time.
///
/// Not persisted; exists only for the duration of a login attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthFlowState {
    /// Initial state of a fresh mount.
    Idle,
    /// Requesting the authorization URL from the backend.
    GeneratingAuthUrl,
    /// Redirect issued; the provider now owns the user.
    AwaitingProvider,
    /// Exchanging the authorization code for a session.
    Authorizing,
    /// Terminal: session stored, home navigation scheduled.
    Succeeded(Session),
    /// Terminal pending an explicit user-triggered retry.
    Failed(FailureKind),
}

impl AuthFlowState {
    /// Whether a retry affordance should be offered.
    pub fn is_failed(&self) -> bool {
        matches!(self, AuthFlowState::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let machine = LoginFlowMachine::new();
        assert_eq!(*machine.state(), LoginFlowState::Idle);
    }

    #[test]
    fn test_redirect_leg() {
        let mut machine = LoginFlowMachine::new();
        machine.consume(&LoginFlowInput::RequestAuthUrl).unwrap();
        assert_eq!(*machine.state(), LoginFlowState::GeneratingAuthUrl);
        machine.consume(&LoginFlowInput::RedirectIssued).unwrap();
        assert_eq!(*machine.state(), LoginFlowState::AwaitingProvider);
    }

    #[test]
    fn test_exchange_leg() {
        let mut machine = LoginFlowMachine::new();
        machine.consume(&LoginFlowInput::SubmitCode).unwrap();
        assert_eq!(*machine.state(), LoginFlowState::Authorizing);
        machine.consume(&LoginFlowInput::ExchangeSucceeded).unwrap();
        assert_eq!(*machine.state(), LoginFlowState::Succeeded);
    }

    #[test]
    fn test_provider_denial_fails_from_idle() {
        let mut machine = LoginFlowMachine::new();
        machine.consume(&LoginFlowInput::ProviderDenied).unwrap();
        assert_eq!(*machine.state(), LoginFlowState::Failed);
    }

    #[test]
    fn test_retry_reenters_idle() {
        let mut machine = LoginFlowMachine::new();
        machine.consume(&LoginFlowInput::SubmitCode).unwrap();
        machine.consume(&LoginFlowInput::RequestFailed).unwrap();
        assert_eq!(*machine.state(), LoginFlowState::Failed);
        machine.consume(&LoginFlowInput::RetryRequested).unwrap();
        assert_eq!(*machine.state(), LoginFlowState::Idle);
    }

    #[test]
    fn test_succeeded_is_terminal() {
        let mut machine = LoginFlowMachine::new();
        machine.consume(&LoginFlowInput::SubmitCode).unwrap();
        machine.consume(&LoginFlowInput::ExchangeSucceeded).unwrap();
        assert!(machine.consume(&LoginFlowInput::RetryRequested).is_err());
        assert!(machine.consume(&LoginFlowInput::SubmitCode).is_err());
    }

    #[test]
    fn test_invalid_transition_returns_error() {
        let mut machine = LoginFlowMachine::new();
        // Cannot claim success without submitting a code first.
        assert!(machine.consume(&LoginFlowInput::ExchangeSucceeded).is_err());
    }
}
