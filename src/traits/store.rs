//! Item store trait abstraction.
//!
//! The local cache of items per (list, mode). It is the single source of
//! truth for the read-model projection: pagination and reaction toggles both
//! write into it, and the projection re-derives `Detailed` snapshots from its
//! live streams.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::StoreError;
use crate::models::{Item, ItemMode};

/// A stream that yields the current value on subscription and then every
/// later change, for as long as the store lives.
pub type LiveStream<T> = BoxStream<'static, T>;

/// Trait for the local item cache.
///
/// Every write is a single self-contained call; implementations must apply
/// it atomically per (list, mode) key.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Live, ordered items of a list collection.
    fn observe_items(&self, list_id: &str, mode: ItemMode) -> LiveStream<Vec<Item>>;

    /// Live completion flag of a list collection.
    fn observe_is_completed(&self, list_id: &str, mode: ItemMode) -> LiveStream<bool>;

    /// Replace the whole collection.
    async fn replace_all(
        &self,
        list_id: &str,
        mode: ItemMode,
        items: Vec<Item>,
    ) -> Result<(), StoreError>;

    /// Append to the end of the collection.
    async fn append(&self, list_id: &str, mode: ItemMode, items: Vec<Item>)
        -> Result<(), StoreError>;

    /// Swap in a server-confirmed copy of a single item, matched by id.
    /// Items that are not cached are ignored.
    async fn replace_item(&self, list_id: &str, mode: ItemMode, item: Item)
        -> Result<(), StoreError>;

    async fn set_completed(
        &self,
        list_id: &str,
        mode: ItemMode,
        completed: bool,
    ) -> Result<(), StoreError>;

    /// Drop every cached collection.
    async fn clear_all(&self) -> Result<(), StoreError>;

    /// Number of cached items, read without subscribing.
    async fn current_count(&self, list_id: &str, mode: ItemMode) -> Result<usize, StoreError>;
}
