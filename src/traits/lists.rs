//! List-level and item-level collaborators.

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{Item, ItemMode, ListEntity};

/// Source of the list entity shown in the screen header.
#[async_trait]
pub trait ListProvider: Send + Sync {
    /// Load the list entity.
    async fn get_list_by_id(&self, list_id: &str, mode: ItemMode)
        -> Result<ListEntity, RemoteError>;

    /// File a complaint about the list.
    async fn report_list(&self, list: &ListEntity, complaint: &str) -> Result<(), RemoteError>;
}

/// Item mutations that run behind a blocking progress dialog.
///
/// Implementations are expected to update the item store themselves; the
/// screen only waits for completion.
#[async_trait]
pub trait ItemEditor: Send + Sync {
    /// Move the item between the list and the queue.
    async fn change_item_type(&self, item: &Item) -> Result<(), RemoteError>;

    async fn delete_item(&self, item: &Item) -> Result<(), RemoteError>;
}
