//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`InMemoryItemStore`] - Item store backed by `watch` channels
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for the remote collaborators:
//! - [`mock::MockRemoteSource`] - Scripted pages, failures and pausable fetches
//! - [`mock::MockListProvider`] - List entity lookup and reporting
//! - [`mock::MockItemEditor`] - Dialog-guarded item mutations
//! - [`mock::RecordingNavigator`] - Records navigation side effects

pub mod memory_store;
pub mod mock;

pub use memory_store::InMemoryItemStore;
pub use mock::{MockItemEditor, MockListProvider, MockRemoteSource, RecordingNavigator};
