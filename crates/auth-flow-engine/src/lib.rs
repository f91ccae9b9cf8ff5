//! Login and logout flow orchestration.
//!
//! The OAuth handshake is modeled as an explicit state machine
//! ([`login_fsm`]) driven by a per-mount controller ([`AuthFlowController`]).
//! Logout lives beside it ([`LogoutController`]) and shares the transport
//! seam ([`AuthApi`]) and the delayed home navigation.

mod api;
mod controller;
mod error;
mod login_fsm;
mod logout;

pub use api::AuthApi;
pub use controller::{ActivationOutcome, AuthFlowController, RouteParams, HOME_REDIRECT_DELAY};
pub use error::{AuthFlowError, AuthFlowResult};
pub use login_fsm::AuthFlowState;
pub use logout::{logout, LogoutController, LogoutOutcome, LogoutState};
