//! Auth flow error types.

use thiserror::Error;

/// Faults the flow cannot handle locally.
///
/// Transport failures are not errors at this level — they become a
/// `Failed(FailureKind)` state. What remains here propagates to the
/// failure boundary.
#[derive(Error, Debug)]
pub enum AuthFlowError {
    /// Local session storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] session_store::StorageError),

    /// Invalid state transition in the login flow FSM
    #[error("Invalid login flow transition: {0}")]
    InvalidTransition(String),
}

/// Result type alias using AuthFlowError.
pub type AuthFlowResult<T> = Result<T, AuthFlowError>;
