//! Mock implementations for testing.
//!
//! These doubles record every call they receive and can be told to fail or
//! to hold calls open until released, which is what the ordering tests need.
//!
//! # Available Mocks
//!
//! - [`MockRemoteSource`] - Paged fetches and reaction toggles
//! - [`MockListProvider`] - List entity lookup and reporting
//! - [`MockItemEditor`] - Item type changes and deletions
//! - [`RecordingNavigator`] - Navigation side effects

pub mod editor;
mod gate;
pub mod list_provider;
pub mod navigator;
pub mod remote;

pub use editor::{EditorCall, MockItemEditor};
pub use gate::Gate;
pub use list_provider::MockListProvider;
pub use navigator::{NavigationEvent, RecordingNavigator};
pub use remote::{MockRemoteSource, RecordedFetch, RecordedToggle};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mock's bookkeeping, ignoring poisoning from a panicked test thread.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
