//! Account activity log feed.
//!
//! Fetches the append-only audit log once per view activation, renders each
//! entry through a closed formatting table and hides detail lines behind a
//! list-wide blur switch until the user discloses them.

mod api;
mod feed;
mod format;

pub use api::ActivityApi;
pub use feed::{ActivityFeed, ActivityRow, FeedError, FeedResult};
pub use format::{format_activity, FormattedActivity};
