//! Local session storage for the account client.
//!
//! This crate owns the single process-wide session slot:
//! - `Session`: the caller's own credential record (token, user, expiry)
//! - `SessionStore`: cached + persisted slot with expiry checked on read
//! - `SessionStorage`: pluggable key/value persistence backend

mod file;
mod store;
mod traits;

pub use file::FileStorage;
pub use store::{Session, SessionStore, SESSION_KEY};
pub use traits::SessionStorage;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend-specific storage error
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
