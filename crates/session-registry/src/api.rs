//! Transport seam consumed by the session registry.

use api_client::{ApiClient, ApiResult, SessionMeta};
use async_trait::async_trait;

/// The slice of the backend API the registry needs.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// `GET /sessions` — list all active sessions of the account.
    async fn sessions(&self, access_token: &str) -> ApiResult<Vec<SessionMeta>>;

    /// `DELETE /session/{id}` — revoke one session.
    async fn revoke_session(&self, session_id: &str, access_token: &str) -> ApiResult<()>;

    /// `DELETE /sessions/other` — revoke every session except the caller's.
    async fn revoke_other_sessions(&self, access_token: &str) -> ApiResult<()>;
}

#[async_trait]
impl RegistryApi for ApiClient {
    async fn sessions(&self, access_token: &str) -> ApiResult<Vec<SessionMeta>> {
        ApiClient::sessions(self, access_token).await
    }

    async fn revoke_session(&self, session_id: &str, access_token: &str) -> ApiResult<()> {
        ApiClient::revoke_session(self, session_id, access_token).await
    }

    async fn revoke_other_sessions(&self, access_token: &str) -> ApiResult<()> {
        ApiClient::revoke_other_sessions(self, access_token).await
    }
}
