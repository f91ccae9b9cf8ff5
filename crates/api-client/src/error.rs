//! Transport error types.

use thiserror::Error;

/// Structured failure returned by every transport call.
///
/// The distinction matters downstream: `Network` is the no-network signal,
/// `Status` carries the HTTP status plus the backend's error body when one
/// could be parsed, `Decode` is a 2xx response whose body was not the
/// expected shape.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never reached the server (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status}")]
    Status {
        status: u16,
        /// `error_message` field of the backend error body, when present.
        error_message: Option<String>,
    },

    /// Response body could not be decoded.
    #[error("Response decode error: {0}")]
    Decode(reqwest::Error),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for transport calls.
pub type ApiResult<T> = Result<T, ApiError>;
