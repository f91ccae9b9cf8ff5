//! Cached view of the account's remote sessions.

use crate::RegistryApi;
use api_client::SessionMeta;
use error_boundary::{classify, FailureKind};
use session_store::SessionStore;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info, warn};
use view_lifecycle::{MountToken, Navigator, Notice, Notifier, LOGOUT_ROUTE};

/// Faults the registry cannot turn into a notice.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Local session storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] session_store::StorageError),

    /// No local session; the registry requires an authenticated caller
    #[error("Not authenticated")]
    NotAuthenticated,
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result of a single-session revoke.
#[derive(Debug, Clone, PartialEq)]
pub enum RevokeOutcome {
    /// Session revoked remotely and removed from the cached list.
    Revoked,
    /// The id belongs to the caller's own session. The delete endpoint was
    /// not called; the user was sent to the logout view instead.
    CurrentSession,
    /// Remote revoke failed; the cached list is untouched.
    Failed(FailureKind),
}

/// Result of a bulk revoke of all other sessions.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkRevokeOutcome {
    Completed,
    Failed(FailureKind),
}

/// Proof that the user acknowledged the bulk-revoke confirmation prompt.
/// Constructed only by the confirmation dialog's accept path.
pub struct Confirmed(());

impl Confirmed {
    pub fn by_user() -> Self {
        Confirmed(())
    }
}

/// Read-mostly snapshot of the account's active sessions, refreshed by the
/// poller and mutated optimistically on revoke.
///
/// The list is always held sorted by `last_accessed_at` descending; the
/// server's ordering is never trusted. Concurrent completions (an optimistic
/// removal racing an in-flight poll) resolve by completion order.
pub struct SessionRegistry<A> {
    api: A,
    store: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    token: MountToken,
    sessions: Mutex<Vec<SessionMeta>>,
}

impl<A: RegistryApi> SessionRegistry<A> {
    pub fn new(
        api: A,
        store: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        token: MountToken,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
            navigator,
            token,
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// Current snapshot, newest first.
    pub fn sessions(&self) -> Vec<SessionMeta> {
        self.sessions.lock().expect("sessions lock poisoned").clone()
    }

    /// Id of the caller's own session, if still logged in.
    pub fn current_session_id(&self) -> RegistryResult<Option<String>> {
        Ok(self.store.get()?.map(|s| s.id))
    }

    /// Fetch the session list and replace the cached snapshot.
    ///
    /// On failure the cached list stays untouched and the user gets a
    /// transient notice. Late completions after unmount are discarded.
    pub async fn refresh(&self) -> RegistryResult<()> {
        let access_token = self.access_token()?;
        match self.api.sessions(&access_token).await {
            Ok(mut list) => {
                list.sort_by(|a, b| b.last_accessed_at.cmp(&a.last_accessed_at));
                if !self.token.is_mounted() {
                    debug!("Discarding session list, view unmounted");
                    return Ok(());
                }
                debug!(count = list.len(), "Session list refreshed");
                *self.sessions.lock().expect("sessions lock poisoned") = list;
            }
            Err(e) => {
                warn!(error = %e, "Session list refresh failed");
                self.notify_failure(classify(&e));
            }
        }
        Ok(())
    }

    /// Revoke one session by id.
    ///
    /// The caller's own session never goes through the delete endpoint; it
    /// navigates straight to the logout view, which owns proper teardown. On
    /// remote success the session is removed from the cached list
    /// immediately, without waiting for the next poll.
    pub async fn revoke(&self, session_id: &str) -> RegistryResult<RevokeOutcome> {
        if self.current_session_id()?.as_deref() == Some(session_id) {
            info!("Revoke targets the current session, entering the logout flow");
            self.navigator.assign(LOGOUT_ROUTE);
            return Ok(RevokeOutcome::CurrentSession);
        }

        let access_token = self.access_token()?;
        match self.api.revoke_session(session_id, &access_token).await {
            Ok(()) => {
                if self.token.is_mounted() {
                    self.sessions
                        .lock()
                        .expect("sessions lock poisoned")
                        .retain(|s| s.id != session_id);
                }
                info!(session_id = %session_id, "Session revoked");
                Ok(RevokeOutcome::Revoked)
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Session revoke failed");
                let kind = classify(&e);
                self.notify_failure(kind.clone());
                Ok(RevokeOutcome::Failed(kind))
            }
        }
    }

    /// Revoke every session except the caller's own.
    ///
    /// Requires a confirmation proof. The list is refreshed afterwards no
    /// matter how the bulk call went, so the view converges to the server's
    /// idea of what survived.
    pub async fn revoke_others(&self, _confirmed: Confirmed) -> RegistryResult<BulkRevokeOutcome> {
        let access_token = self.access_token()?;
        let outcome = match self.api.revoke_other_sessions(&access_token).await {
            Ok(()) => {
                info!("Other sessions revoked");
                BulkRevokeOutcome::Completed
            }
            Err(e) => {
                warn!(error = %e, "Bulk revoke failed");
                let kind = classify(&e);
                self.notify_failure(kind.clone());
                BulkRevokeOutcome::Failed(kind)
            }
        };
        self.refresh().await?;
        Ok(outcome)
    }

    fn access_token(&self) -> RegistryResult<String> {
        self.store
            .get()?
            .map(|s| s.access_token)
            .ok_or(RegistryError::NotAuthenticated)
    }

    fn notify_failure(&self, kind: FailureKind) {
        self.notifier.notify(Notice {
            title: "Wystąpił błąd".to_string(),
            detail: kind.message(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::{ApiError, ApiResult};
    use async_trait::async_trait;
    use session_store::{Session, SessionStorage, StorageResult};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MemoryStorage(Mutex<HashMap<String, String>>);

    impl SessionStorage for MemoryStorage {
        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.0
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        fn delete(&self, key: &str) -> StorageResult<bool> {
            Ok(self.0.lock().unwrap().remove(key).is_some())
        }
    }

    fn store_with_session(id: &str) -> Arc<SessionStore> {
        let store = Arc::new(SessionStore::new(Box::new(MemoryStorage(Mutex::new(
            HashMap::new(),
        )))));
        store
            .set(Session {
                id: id.to_string(),
                user_id: 7,
                access_token: "tok".to_string(),
                expires_at: chrono::Utc::now().timestamp() + 3600,
            })
            .unwrap();
        store
    }

    fn meta(id: &str, last_accessed_at: i64) -> SessionMeta {
        SessionMeta {
            id: id.to_string(),
            ip: "10.0.0.1".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            last_accessed_at,
        }
    }

    #[derive(Default)]
    struct MockApi {
        sessions_result: Mutex<Vec<ApiResult<Vec<SessionMeta>>>>,
        revoke_result: Mutex<Vec<ApiResult<()>>>,
        bulk_result: Mutex<Vec<ApiResult<()>>>,
        revoke_calls: AtomicUsize,
        sessions_calls: AtomicUsize,
    }

    #[async_trait]
    impl RegistryApi for Arc<MockApi> {
        async fn sessions(&self, _access_token: &str) -> ApiResult<Vec<SessionMeta>> {
            self.sessions_calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.sessions_result.lock().unwrap();
            if results.is_empty() {
                panic!("unexpected sessions call");
            }
            results.remove(0)
        }

        async fn revoke_session(&self, _session_id: &str, _access_token: &str) -> ApiResult<()> {
            self.revoke_calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.revoke_result.lock().unwrap();
            if results.is_empty() {
                panic!("unexpected revoke_session call");
            }
            results.remove(0)
        }

        async fn revoke_other_sessions(&self, _access_token: &str) -> ApiResult<()> {
            let mut results = self.bulk_result.lock().unwrap();
            if results.is_empty() {
                panic!("unexpected revoke_other_sessions call");
            }
            results.remove(0)
        }
    }

    struct RecordingNotifier(Mutex<Vec<Notice>>);

    impl RecordingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Vec::new())))
        }
        fn notices(&self) -> Vec<Notice> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    struct RecordingNavigator(Mutex<Vec<String>>);

    impl RecordingNavigator {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Vec::new())))
        }
        fn locations(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn assign(&self, location: &str) {
            self.0.lock().unwrap().push(location.to_string());
        }
    }

    // Nothing listens on the discard port, so the connect fails immediately.
    async fn network_error() -> ApiError {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/sessions")
            .send()
            .await
            .unwrap_err();
        ApiError::Network(err)
    }

    fn registry(
        api: Arc<MockApi>,
        store: Arc<SessionStore>,
        notifier: Arc<RecordingNotifier>,
        navigator: Arc<RecordingNavigator>,
        token: MountToken,
    ) -> SessionRegistry<Arc<MockApi>> {
        SessionRegistry::new(api, store, notifier, navigator, token)
    }

    #[tokio::test]
    async fn test_refresh_sorts_by_recency_descending() {
        let api = Arc::new(MockApi::default());
        *api.sessions_result.lock().unwrap() =
            vec![Ok(vec![meta("old", 100), meta("new", 300), meta("mid", 200)])];
        let (_guard, token) = view_lifecycle::mount();

        let reg = registry(
            api,
            store_with_session("me"),
            RecordingNotifier::new(),
            RecordingNavigator::new(),
            token,
        );
        reg.refresh().await.unwrap();

        let ids: Vec<_> = reg.sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cache_and_notifies() {
        let api = Arc::new(MockApi::default());
        *api.sessions_result.lock().unwrap() = vec![
            Ok(vec![meta("a", 100)]),
            Err(ApiError::Status {
                status: 500,
                error_message: None,
            }),
        ];
        let notifier = RecordingNotifier::new();
        let (_guard, token) = view_lifecycle::mount();

        let reg = registry(
            api,
            store_with_session("me"),
            notifier.clone(),
            RecordingNavigator::new(),
            token,
        );
        reg.refresh().await.unwrap();
        reg.refresh().await.unwrap();

        assert_eq!(reg.sessions().len(), 1);
        let notices = notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Wystąpił błąd");
    }

    #[tokio::test]
    async fn test_refresh_after_unmount_discards_result() {
        let api = Arc::new(MockApi::default());
        *api.sessions_result.lock().unwrap() = vec![Ok(vec![meta("a", 100)])];
        let (guard, token) = view_lifecycle::mount();

        let reg = registry(
            api,
            store_with_session("me"),
            RecordingNotifier::new(),
            RecordingNavigator::new(),
            token,
        );
        guard.unmount();
        reg.refresh().await.unwrap();

        assert!(reg.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_revoke_current_session_navigates_to_logout_instead_of_delete() {
        let api = Arc::new(MockApi::default());
        let navigator = RecordingNavigator::new();
        let (_guard, token) = view_lifecycle::mount();

        let reg = registry(
            api.clone(),
            store_with_session("me"),
            RecordingNotifier::new(),
            navigator.clone(),
            token,
        );
        let outcome = reg.revoke("me").await.unwrap();

        assert_eq!(outcome, RevokeOutcome::CurrentSession);
        assert_eq!(api.revoke_calls.load(Ordering::SeqCst), 0);
        assert_eq!(navigator.locations(), vec![LOGOUT_ROUTE.to_string()]);
    }

    #[tokio::test]
    async fn test_revoke_removes_optimistically_without_waiting_for_poll() {
        let api = Arc::new(MockApi::default());
        *api.sessions_result.lock().unwrap() = vec![Ok(vec![meta("other", 100), meta("me", 300)])];
        *api.revoke_result.lock().unwrap() = vec![Ok(())];
        let (_guard, token) = view_lifecycle::mount();

        let reg = registry(
            api.clone(),
            store_with_session("me"),
            RecordingNotifier::new(),
            RecordingNavigator::new(),
            token,
        );
        reg.refresh().await.unwrap();

        let outcome = reg.revoke("other").await.unwrap();

        assert_eq!(outcome, RevokeOutcome::Revoked);
        let ids: Vec<_> = reg.sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["me"]);
        // No second sessions fetch happened.
        assert_eq!(api.sessions_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_revoke_keeps_list_and_notifies() {
        let api = Arc::new(MockApi::default());
        *api.sessions_result.lock().unwrap() = vec![Ok(vec![meta("other", 100)])];
        *api.revoke_result.lock().unwrap() = vec![Err(ApiError::Status {
            status: 500,
            error_message: None,
        })];
        let notifier = RecordingNotifier::new();
        let (_guard, token) = view_lifecycle::mount();

        let reg = registry(
            api,
            store_with_session("me"),
            notifier.clone(),
            RecordingNavigator::new(),
            token,
        );
        reg.refresh().await.unwrap();

        let outcome = reg.revoke("other").await.unwrap();

        assert!(matches!(outcome, RevokeOutcome::Failed(_)));
        assert_eq!(reg.sessions().len(), 1);
        assert_eq!(notifier.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_bulk_revoke_network_failure_still_refreshes() {
        let api = Arc::new(MockApi::default());
        *api.bulk_result.lock().unwrap() = vec![Err(network_error().await)];
        *api.sessions_result.lock().unwrap() = vec![Ok(vec![meta("me", 300)])];
        let (_guard, token) = view_lifecycle::mount();

        let reg = registry(
            api.clone(),
            store_with_session("me"),
            RecordingNotifier::new(),
            RecordingNavigator::new(),
            token,
        );
        let outcome = reg.revoke_others(Confirmed::by_user()).await.unwrap();

        assert_eq!(
            outcome,
            BulkRevokeOutcome::Failed(FailureKind::NetworkUnreachable)
        );
        assert_eq!(api.sessions_calls.load(Ordering::SeqCst), 1);
        assert_eq!(reg.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_without_session_is_not_authenticated() {
        let api = Arc::new(MockApi::default());
        let store = Arc::new(SessionStore::new(Box::new(MemoryStorage(Mutex::new(
            HashMap::new(),
        )))));
        let (_guard, token) = view_lifecycle::mount();

        let reg = registry(api, store, RecordingNotifier::new(), RecordingNavigator::new(), token);
        assert!(matches!(
            reg.refresh().await,
            Err(RegistryError::NotAuthenticated)
        ));
    }
}
