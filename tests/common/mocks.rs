//! Test-only collaborators layered over the library's mocks.

pub use curator::adapters::mock::{
    EditorCall, MockItemEditor, MockListProvider, MockRemoteSource, NavigationEvent,
    RecordingNavigator,
};
pub use curator::adapters::InMemoryItemStore;

use async_trait::async_trait;
use curator::error::StoreError;
use curator::models::{Item, ItemMode};
use curator::traits::{ItemStore, LiveStream};
use std::sync::Mutex;

/// One successful write against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    ReplaceAll { mode: ItemMode, count: usize },
    Append { mode: ItemMode, count: usize },
    ReplaceItem { mode: ItemMode, item_id: String },
    SetCompleted { mode: ItemMode, completed: bool },
    ClearAll,
}

impl StoreWrite {
    /// Writes that come from a page fetch.
    pub fn is_page_write_for(&self, target: ItemMode) -> bool {
        match self {
            StoreWrite::ReplaceAll { mode, .. }
            | StoreWrite::Append { mode, .. }
            | StoreWrite::SetCompleted { mode, .. } => *mode == target,
            _ => false,
        }
    }
}

/// In-memory store that records every write it accepts.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: InMemoryItemStore,
    writes: Mutex<Vec<StoreWrite>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }

    /// Number of page writes recorded for `mode`.
    pub fn page_writes_for(&self, mode: ItemMode) -> usize {
        self.writes()
            .iter()
            .filter(|w| w.is_page_write_for(mode))
            .count()
    }

    pub fn items(&self, list_id: &str, mode: ItemMode) -> Vec<Item> {
        self.inner.items(list_id, mode)
    }

    pub fn is_completed(&self, list_id: &str, mode: ItemMode) -> bool {
        self.inner.is_completed(list_id, mode)
    }

    pub fn close(&self) {
        self.inner.close();
    }

    fn record(&self, write: StoreWrite) {
        self.writes.lock().unwrap().push(write);
    }
}

#[async_trait]
impl ItemStore for RecordingStore {
    fn observe_items(&self, list_id: &str, mode: ItemMode) -> LiveStream<Vec<Item>> {
        self.inner.observe_items(list_id, mode)
    }

    fn observe_is_completed(&self, list_id: &str, mode: ItemMode) -> LiveStream<bool> {
        self.inner.observe_is_completed(list_id, mode)
    }

    async fn replace_all(
        &self,
        list_id: &str,
        mode: ItemMode,
        items: Vec<Item>,
    ) -> Result<(), StoreError> {
        let count = items.len();
        self.inner.replace_all(list_id, mode, items).await?;
        self.record(StoreWrite::ReplaceAll { mode, count });
        Ok(())
    }

    async fn append(&self, list_id: &str, mode: ItemMode, items: Vec<Item>) -> Result<(), StoreError> {
        let count = items.len();
        self.inner.append(list_id, mode, items).await?;
        self.record(StoreWrite::Append { mode, count });
        Ok(())
    }

    async fn replace_item(&self, list_id: &str, mode: ItemMode, item: Item) -> Result<(), StoreError> {
        let item_id = item.id.clone();
        self.inner.replace_item(list_id, mode, item).await?;
        self.record(StoreWrite::ReplaceItem { mode, item_id });
        Ok(())
    }

    async fn set_completed(
        &self,
        list_id: &str,
        mode: ItemMode,
        completed: bool,
    ) -> Result<(), StoreError> {
        self.inner.set_completed(list_id, mode, completed).await?;
        self.record(StoreWrite::SetCompleted { mode, completed });
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.inner.clear_all().await?;
        self.record(StoreWrite::ClearAll);
        Ok(())
    }

    async fn current_count(&self, list_id: &str, mode: ItemMode) -> Result<usize, StoreError> {
        self.inner.current_count(list_id, mode).await
    }
}
