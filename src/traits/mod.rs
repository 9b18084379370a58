//! Trait abstractions for the details screen's collaborators.
//!
//! The controller only talks to the outside world through these traits,
//! which keeps it testable with the doubles in [`crate::adapters::mock`].
//!
//! # Traits
//!
//! - [`RemoteSource`] - Paged fetches and reaction toggles
//! - [`ItemStore`] - Local cache of items, observed live
//! - [`ListProvider`] - List entity loading and reporting
//! - [`ItemEditor`] - Dialog-guarded item mutations
//! - [`Navigator`] - Fire-and-forget navigation side effects

pub mod lists;
pub mod navigator;
pub mod remote;
pub mod store;

pub use lists::{ItemEditor, ListProvider};
pub use navigator::{FilterRequest, Navigator};
pub use remote::RemoteSource;
pub use store::{ItemStore, LiveStream};
