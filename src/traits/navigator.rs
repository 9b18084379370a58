//! Navigation side effects.
//!
//! Fire-and-forget calls triggered by specific intents. They never produce
//! snapshots and never fail from the controller's point of view.

use crate::models::{Item, ItemMode, Setup};

/// What the filter dialog is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    /// Tags offered by the dialog, alphabetical
    pub tags: Vec<String>,
    /// Setup the dialog starts from
    pub setup: Setup,
}

/// Trait for screen navigation.
pub trait Navigator: Send + Sync {
    fn open_filter(&self, request: FilterRequest);

    fn edit_list(&self, list_id: &str, mode: ItemMode);

    fn edit_item(&self, item: &Item);

    fn open_comments(&self, item: &Item);

    /// Hand plain text to the platform share sheet.
    fn share(&self, content: &str);

    fn go_back(&self);
}
