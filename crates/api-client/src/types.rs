//! Wire types exchanged with the account backend.

use serde::Deserialize;

/// Response of `GET /auth/discord`.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthUrlResponse {
    pub url: String,
}

/// Backend error body attached to non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error_message: String,
}

/// One active remote session belonging to the account.
///
/// Server-owned; the client holds a read-mostly snapshot. The user agent is
/// kept as the raw string and parsed only for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    pub id: String,
    pub ip: String,
    pub user_agent: String,
    /// Unix seconds of the last request made with this session.
    pub last_accessed_at: i64,
}

/// An immutable, server-appended record of a security-relevant account event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: i64,
    /// Event-kind tag from a closed set, e.g. `created_session`.
    pub name: String,
    /// Kind-specific payload, interpreted by the formatting table.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Unix seconds.
    pub created_at: i64,
}

/// Public profile of an account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub avatar_url: String,
}
