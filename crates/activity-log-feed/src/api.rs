//! Transport seam consumed by the activity feed.

use api_client::{ActivityLogEntry, ApiClient, ApiResult};
use async_trait::async_trait;

/// The slice of the backend API the feed needs.
#[async_trait]
pub trait ActivityApi: Send + Sync {
    /// `GET /activities` — fetch the account activity log, newest first.
    async fn activities(&self, access_token: &str) -> ApiResult<Vec<ActivityLogEntry>>;
}

#[async_trait]
impl ActivityApi for ApiClient {
    async fn activities(&self, access_token: &str) -> ApiResult<Vec<ActivityLogEntry>> {
        ApiClient::activities(self, access_token).await
    }
}
