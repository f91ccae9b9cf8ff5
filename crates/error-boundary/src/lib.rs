//! Failure classification and the top-level failure boundary.
//!
//! This crate provides:
//! - `FailureKind`: the closed set of user-facing failure kinds
//! - `classify` / `classify_provider`: total mapping from transport and
//!   provider failures into that set
//! - `FailureBoundary`: the outermost handler rendering a translated
//!   full-screen message for anything no local handler recovered

mod boundary;
mod kind;

pub use boundary::{BoundaryScreen, FailureBoundary, FaultSink};
pub use kind::{classify, classify_provider, FailureKind, LOGIN_ROUTE};
