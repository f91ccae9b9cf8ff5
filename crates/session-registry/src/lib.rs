//! Remote session registry.
//!
//! Maintains the account's list of active sessions for the sessions view:
//! periodic refresh while mounted ([`spawn_poller`]), single and bulk
//! revocation with optimistic local updates ([`SessionRegistry`]), and the
//! row shapes the view renders ([`build_rows`]), including the pinned
//! current-session label and the per-second relative timestamps.

mod api;
mod poller;
mod registry;
mod relative_time;
mod rows;
mod user_agent;

pub use api::RegistryApi;
pub use poller::{spawn_poller, POLL_PERIOD};
pub use registry::{
    BulkRevokeOutcome, Confirmed, RegistryError, RegistryResult, RevokeOutcome, SessionRegistry,
};
pub use relative_time::format_relative;
pub use rows::{build_rows, spawn_clock, SessionRow, CURRENT_SESSION_LABEL};
pub use user_agent::{parse as parse_user_agent, DisplayAgent};
