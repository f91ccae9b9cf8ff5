//! HTTP client for the account backend.
//!
//! Wraps `reqwest` behind the endpoints the client consumes:
//! - `GET /auth/discord` / `POST /auth/discord` — OAuth handshake
//! - `POST /auth/logout` — bearer-authenticated logout
//! - `GET /sessions`, `DELETE /session/{id}`, `DELETE /sessions/other`
//! - `GET /activities`
//! - `GET /profile/{userId}`
//!
//! Every call returns a structured [`ApiError`] on failure; classification
//! into user-facing failure kinds happens in the `error-boundary` crate.

mod error;
mod types;

pub use error::{ApiError, ApiResult};
pub use types::{ActivityLogEntry, Profile, SessionMeta};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use session_store::Session;
use tracing::{debug, warn};
use types::{AuthUrlResponse, ErrorBody};

/// Characters escaped when a value is spliced into a path segment; the set
/// matches JavaScript's `encodeURIComponent` (space becomes `%20`, never `+`).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// HTTP client for the account backend.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the given API base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a non-success response into `ApiError::Status`, parsing the
    /// backend error body when there is one.
    async fn fail_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let error_message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|b| b.error_message);
        warn!(status, error_message = ?error_message, "Request failed");
        ApiError::Status {
            status,
            error_message,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.send().await.map_err(ApiError::Network)?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::fail_from_response(response).await)
        }
    }

    /// Request the OAuth authorization URL from the backend.
    pub async fn auth_url(&self) -> ApiResult<String> {
        let url = self.endpoint("/auth/discord");
        debug!(url = %url, "Requesting authorization URL");
        let response = self.send(self.http_client.get(&url)).await?;
        let body: AuthUrlResponse = response.json().await.map_err(ApiError::Decode)?;
        Ok(body.url)
    }

    /// Exchange an authorization code for a session.
    pub async fn exchange_code(&self, code: &str) -> ApiResult<Session> {
        let url = self.endpoint("/auth/discord");
        debug!(url = %url, "Exchanging authorization code");
        let response = self
            .send(
                self.http_client
                    .post(&url)
                    .json(&serde_json::json!({ "code": code })),
            )
            .await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Invalidate the current session server-side.
    pub async fn logout(&self, access_token: &str) -> ApiResult<()> {
        let url = self.endpoint("/auth/logout");
        debug!(url = %url, "Logging out");
        self.send(self.http_client.post(&url).bearer_auth(access_token))
            .await?;
        Ok(())
    }

    /// List all active sessions belonging to the account.
    pub async fn sessions(&self, access_token: &str) -> ApiResult<Vec<SessionMeta>> {
        let url = self.endpoint("/sessions");
        let response = self
            .send(self.http_client.get(&url).bearer_auth(access_token))
            .await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Revoke one session by id.
    pub async fn revoke_session(&self, session_id: &str, access_token: &str) -> ApiResult<()> {
        let encoded = encode_path_segment(session_id);
        let url = self.endpoint(&format!("/session/{encoded}"));
        debug!(session_id = %session_id, "Revoking session");
        self.send(self.http_client.delete(&url).bearer_auth(access_token))
            .await?;
        Ok(())
    }

    /// Revoke every session except the caller's own.
    pub async fn revoke_other_sessions(&self, access_token: &str) -> ApiResult<()> {
        let url = self.endpoint("/sessions/other");
        debug!("Revoking all other sessions");
        self.send(self.http_client.delete(&url).bearer_auth(access_token))
            .await?;
        Ok(())
    }

    /// Fetch the account activity log, newest first.
    pub async fn activities(&self, access_token: &str) -> ApiResult<Vec<ActivityLogEntry>> {
        let url = self.endpoint("/activities");
        let response = self
            .send(self.http_client.get(&url).bearer_auth(access_token))
            .await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Fetch the public profile of a user.
    pub async fn profile(&self, user_id: i64) -> ApiResult<Profile> {
        let url = self.endpoint(&format!("/profile/{user_id}"));
        let response = self.send(self.http_client.get(&url)).await?;
        response.json().await.map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let client = ApiClient::new("https://api.buzkaaclicker.pl");
        assert_eq!(
            client.endpoint("/auth/discord"),
            "https://api.buzkaaclicker.pl/auth/discord"
        );
    }

    #[test]
    fn test_error_body_parsing() {
        let body: crate::types::ErrorBody =
            serde_json::from_str(r#"{"error_message": "invalid code"}"#).unwrap();
        assert_eq!(body.error_message, "invalid code");
    }

    #[test]
    fn test_session_id_is_percent_encoded_for_the_path() {
        assert_eq!(encode_path_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_path_segment("abc-123_x.y"), "abc-123_x.y");
        assert_eq!(encode_path_segment("id?=&"), "id%3F%3D%26");
    }

    #[test]
    fn test_status_error_exposes_code() {
        let err = ApiError::Status {
            status: 401,
            error_message: None,
        };
        assert_eq!(err.status(), Some(401));
    }
}
