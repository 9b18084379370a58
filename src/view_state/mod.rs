//! View-state snapshots and the output boundary.
//!
//! The controller's only product is an ordered stream of [`ViewState`]
//! values. A renderer drains it through [`ViewStateReceiver`] and draws the
//! latest one.
//!
//! ```text
//! intents / signals ──► sequencer ──► ViewStateSender ──► ViewStateReceiver ──► renderer
//!                          ▲
//!                 item store streams
//! ```
//!
//! ## Components
//!
//! - [`ViewState`]: Closed set of snapshot kinds with their payloads
//! - [`renumber`]: Dense 1-based display positions over a copy of the items
//! - [`ViewStateSender`] / [`ViewStateReceiver`]: The output channel

mod output;
mod renumber;
mod snapshot;

pub use output::{channel, ViewStateReceiver, ViewStateSender};
pub use renumber::renumber;
pub use snapshot::{InfoMessage, ViewState};
