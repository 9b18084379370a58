//! Optimistic reaction toggling.
//!
//! - PendingReactions: the (item, alias) pairs currently in flight
//! - ReactionTracker: dispatches toggles and writes confirmed items back

mod pending;
mod tracker;

pub use pending::{PendingKey, PendingReactions};
pub use tracker::{ReactionTracker, ToggleOutcome};

/// Reaction alias an upvote is tracked under.
pub const UPVOTE_ALIAS: &str = "thumbsup";
