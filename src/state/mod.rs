//! Shared screen state.
//!
//! - SetupState: the current view configuration, observed by every pipeline

mod setup_state;

pub use setup_state::SetupState;
