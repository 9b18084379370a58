//! Remote source trait abstraction.
//!
//! The paging API the details screen reads from, plus the two single-item
//! mutations it can issue.

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{Item, ItemMode, Page, PageRequest};

/// Trait for the remote paging API.
///
/// Both fetch operations must be safe to repeat: the refresh loop retries
/// them until they succeed.
///
/// # Example
///
/// ```ignore
/// use curator::traits::RemoteSource;
///
/// async fn first_page<R: RemoteSource>(remote: &R, request: &PageRequest) -> usize {
///     remote.fetch_list_page(request).await.map(|p| p.len()).unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch one page of accepted list items.
    async fn fetch_list_page(&self, request: &PageRequest) -> Result<Page, RemoteError>;

    /// Fetch one page of queued items.
    async fn fetch_queue_page(&self, request: &PageRequest) -> Result<Page, RemoteError>;

    /// Toggle the current user's upvote and return the updated item.
    async fn toggle_upvote(&self, item_id: &str, mode: ItemMode) -> Result<Item, RemoteError>;

    /// Toggle a reaction and return the updated item.
    async fn toggle_reaction(
        &self,
        item_id: &str,
        alias: &str,
        mode: ItemMode,
    ) -> Result<Item, RemoteError>;
}
