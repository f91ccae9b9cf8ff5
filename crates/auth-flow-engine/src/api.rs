//! Transport seam consumed by the auth flow.

use api_client::{ApiClient, ApiResult};
use async_trait::async_trait;
use session_store::Session;

/// The slice of the backend API the login and logout flows need.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `GET /auth/discord` — obtain the provider authorization URL.
    async fn auth_url(&self) -> ApiResult<String>;

    /// `POST /auth/discord` — exchange an authorization code for a session.
    async fn exchange_code(&self, code: &str) -> ApiResult<Session>;

    /// `POST /auth/logout` — invalidate the current session server-side.
    async fn logout(&self, access_token: &str) -> ApiResult<()>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn auth_url(&self) -> ApiResult<String> {
        ApiClient::auth_url(self).await
    }

    async fn exchange_code(&self, code: &str) -> ApiResult<Session> {
        ApiClient::exchange_code(self, code).await
    }

    async fn logout(&self, access_token: &str) -> ApiResult<()> {
        ApiClient::logout(self, access_token).await
    }
}
