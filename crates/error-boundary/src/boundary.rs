//! Top-level failure boundary.
//!
//! Catches faults that no local handler recovered, including ones raised out
//! of asynchronous continuations, and renders a translated full-screen
//! message. For `Unauthorized` specifically the rendered screen carries a
//! call to action pointing at the login route.

use crate::{classify, FailureKind, LOGIN_ROUTE};
use api_client::ApiError;
use std::sync::{Arc, Mutex};
use tracing::error;

/// What the boundary renders once a fault reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryScreen {
    /// Translated message shown to the user.
    pub message: String,
    /// Login call to action, present only for `Unauthorized`.
    pub login_route: Option<&'static str>,
}

/// Outermost handler for unrecovered faults.
///
/// The boundary itself lives with the view shell; async tasks hold a cheap
/// [`FaultSink`] clone and report into it when they have no local handler.
#[derive(Default)]
pub struct FailureBoundary {
    slot: Arc<Mutex<Option<FailureKind>>>,
}

/// Cloneable reporting handle usable from async continuations.
#[derive(Clone)]
pub struct FaultSink {
    slot: Arc<Mutex<Option<FailureKind>>>,
}

impl FailureBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for reporting faults from anywhere beneath the boundary.
    pub fn sink(&self) -> FaultSink {
        FaultSink {
            slot: self.slot.clone(),
        }
    }

    /// The screen to render, if a fault has been caught.
    pub fn screen(&self) -> Option<BoundaryScreen> {
        let slot = self.slot.lock().expect("boundary slot lock poisoned");
        slot.as_ref().map(|kind| BoundaryScreen {
            message: kind.message(),
            login_route: kind.needs_login().then_some(LOGIN_ROUTE),
        })
    }

    /// Clear the caught fault, letting the wrapped region render again.
    pub fn reset(&self) {
        let mut slot = self.slot.lock().expect("boundary slot lock poisoned");
        *slot = None;
    }
}

impl FaultSink {
    /// Report an already-classified fault.
    pub fn report(&self, kind: FailureKind) {
        error!(kind = ?kind, "Uncaught fault reached the failure boundary");
        let mut slot = self.slot.lock().expect("boundary slot lock poisoned");
        // First fault wins; later ones are usually knock-on effects.
        if slot.is_none() {
            *slot = Some(kind);
        }
    }

    /// Report a raw transport failure, classifying it on the way in.
    pub fn report_transport(&self, err: &ApiError) {
        self.report(classify(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_screen_without_fault() {
        let boundary = FailureBoundary::new();
        assert!(boundary.screen().is_none());
    }

    #[test]
    fn test_reported_fault_renders_translated_message() {
        let boundary = FailureBoundary::new();
        boundary.sink().report(FailureKind::NetworkUnreachable);

        let screen = boundary.screen().unwrap();
        assert_eq!(screen.message, "Błąd połączenia z serwerem.");
        assert!(screen.login_route.is_none());
    }

    #[test]
    fn test_unauthorized_gets_login_call_to_action() {
        let boundary = FailureBoundary::new();
        boundary.sink().report(FailureKind::Unauthorized);

        let screen = boundary.screen().unwrap();
        assert_eq!(screen.login_route, Some(LOGIN_ROUTE));
    }

    #[test]
    fn test_first_fault_wins() {
        let boundary = FailureBoundary::new();
        let sink = boundary.sink();
        sink.report(FailureKind::Unauthorized);
        sink.report(FailureKind::NetworkUnreachable);

        let screen = boundary.screen().unwrap();
        assert_eq!(screen.login_route, Some(LOGIN_ROUTE));
    }

    #[test]
    fn test_reset_clears_the_screen() {
        let boundary = FailureBoundary::new();
        boundary.sink().report(FailureKind::NetworkUnreachable);
        boundary.reset();
        assert!(boundary.screen().is_none());
    }

    #[tokio::test]
    async fn test_sink_reports_from_async_continuation() {
        let boundary = FailureBoundary::new();
        let sink = boundary.sink();

        let handle = tokio::spawn(async move {
            sink.report(FailureKind::Unknown {
                raw: "task blew up".to_string(),
            });
        });
        handle.await.unwrap();

        assert!(boundary.screen().unwrap().message.contains("task blew up"));
    }
}
