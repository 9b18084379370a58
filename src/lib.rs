//! Curator - reactive view-state orchestration for a paginated list-detail
//! screen.
//!
//! This library exposes modules for use in integration tests and the demo
//! binary.

pub mod adapters;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod pagination;
pub mod prelude;
pub mod reactions;
pub mod signals;
pub mod state;
pub mod tasks;
pub mod traits;
pub mod view_state;

pub use config::{ControllerConfig, ExecutionContexts};
pub use controller::{Collaborators, DetailsController, DetailsIntent};
pub use error::{CuratorError, CuratorResult};
pub use signals::SignalBus;
pub use view_state::{ViewState, ViewStateReceiver};
