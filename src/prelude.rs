//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use curator::prelude::*;
//! ```
//!
//! This will import:
//! - The controller and its intents
//! - Model types (Item, ListEntity, Setup)
//! - Collaborator traits
//! - Snapshot types
//! - Error types

// Controller
pub use crate::config::{ControllerConfig, ExecutionContexts};
pub use crate::controller::{Collaborators, DetailsController, DetailsIntent};
pub use crate::signals::SignalBus;

// Model types
pub use crate::models::{DetailsOption, Item, ItemMode, ListEntity, Page, PageRequest, Setup};

// Collaborator traits
pub use crate::traits::{FilterRequest, ItemEditor, ItemStore, ListProvider, Navigator, RemoteSource};

// Snapshot types
pub use crate::view_state::{InfoMessage, ViewState, ViewStateReceiver};

// Error types
pub use crate::error::{CuratorError, CuratorResult, RemoteError};

// Retry policy
pub use crate::pagination::RetryPolicy;
