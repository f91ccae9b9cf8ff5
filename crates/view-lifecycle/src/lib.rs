//! View lifecycle primitives shared by the auth, registry and activity views.
//!
//! The page-rendering layer is an external collaborator; this crate pins
//! down the seams the core talks to it through:
//! - [`Navigator`]: full-page navigation requests
//! - [`mount`]: scoped mount guard; late async completions check the token
//!   before touching any state
//! - [`schedule_redirect`]: delayed navigation tied to a mount
//! - [`Notifier`] / [`Notice`]: transient failure notifications
//! - [`PollGate`]: visibility/connectivity gate for background refresh

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Route of the home view.
pub const HOME_ROUTE: &str = "/";

/// Route of the logout view.
pub const LOGOUT_ROUTE: &str = "/auth/logout";

/// Navigation surface of the page-rendering layer.
pub trait Navigator: Send + Sync {
    /// Perform a full-page navigation to the given location.
    fn assign(&self, location: &str);
}

/// Read-only side of a mount scope.
#[derive(Clone)]
pub struct MountToken {
    mounted: Arc<AtomicBool>,
}

impl MountToken {
    /// Whether the owning view is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

/// Owning side of a mount scope. Dropping it (or calling `unmount`) flips
/// every token handed out, which is how timers and late network completions
/// learn to stand down.
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl MountGuard {
    /// Explicitly end the mount scope.
    pub fn unmount(self) {
        // Drop does the work.
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}

/// Open a mount scope, returning the guard and a cloneable token.
pub fn mount() -> (MountGuard, MountToken) {
    let mounted = Arc::new(AtomicBool::new(true));
    (
        MountGuard {
            mounted: mounted.clone(),
        },
        MountToken { mounted },
    )
}

/// Schedule a full-page navigation after a delay.
///
/// The navigation is suppressed if the owning view unmounted while the delay
/// was pending. In-flight work is not aborted on unmount, only its effect is.
pub fn schedule_redirect(
    navigator: Arc<dyn Navigator>,
    location: impl Into<String>,
    delay: Duration,
    token: MountToken,
) -> JoinHandle<()> {
    let location = location.into();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if token.is_mounted() {
            debug!(location = %location, "Performing scheduled navigation");
            navigator.assign(&location);
        } else {
            debug!(location = %location, "Dropping scheduled navigation, view unmounted");
        }
    })
}

/// A transient, non-fatal notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub detail: String,
}

/// Sink for transient notifications (the toast seam).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Gate deciding whether background refresh may run.
///
/// Polling is suspended while the owning view is hidden or the client is
/// offline; no refresh storms on a backgrounded tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollGate {
    pub visible: bool,
    pub online: bool,
}

impl PollGate {
    pub fn open(&self) -> bool {
        self.visible && self.online
    }
}

impl Default for PollGate {
    fn default() -> Self {
        Self {
            visible: true,
            online: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    pub struct RecordingNavigator {
        pub locations: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        pub fn new() -> Self {
            Self {
                locations: Mutex::new(Vec::new()),
            }
        }
    }

    impl Navigator for RecordingNavigator {
        fn assign(&self, location: &str) {
            self.locations.lock().unwrap().push(location.to_string());
        }
    }

    #[test]
    fn test_mount_guard_flips_token_on_drop() {
        let (guard, token) = mount();
        assert!(token.is_mounted());
        drop(guard);
        assert!(!token.is_mounted());
    }

    #[test]
    fn test_unmount_is_explicit_drop() {
        let (guard, token) = mount();
        guard.unmount();
        assert!(!token.is_mounted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_redirect_fires_after_delay_not_before() {
        let navigator = Arc::new(RecordingNavigator::new());
        let (_guard, token) = mount();

        let handle = schedule_redirect(
            navigator.clone(),
            HOME_ROUTE,
            Duration::from_millis(2000),
            token,
        );

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(navigator.locations.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        handle.await.unwrap();
        assert_eq!(*navigator.locations.lock().unwrap(), vec!["/".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_redirect_suppressed_after_unmount() {
        let navigator = Arc::new(RecordingNavigator::new());
        let (guard, token) = mount();

        let handle = schedule_redirect(
            navigator.clone(),
            HOME_ROUTE,
            Duration::from_millis(2000),
            token,
        );

        guard.unmount();
        tokio::time::sleep(Duration::from_millis(2001)).await;
        handle.await.unwrap();
        assert!(navigator.locations.lock().unwrap().is_empty());
    }

    #[test]
    fn test_poll_gate() {
        assert!(PollGate::default().open());
        assert!(!PollGate {
            visible: false,
            online: true
        }
        .open());
        assert!(!PollGate {
            visible: true,
            online: false
        }
        .open());
    }
}
