//! In-memory item store.
//!
//! Each (list, mode) collection is a pair of `watch` channels, one for the
//! ordered items and one for the completion flag. Observers get the current
//! value first and then every later change; intermediate values may be
//! coalesced when an observer falls behind.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

use crate::error::StoreError;
use crate::models::{Item, ItemMode};
use crate::traits::{ItemStore, LiveStream};

type CollectionKey = (String, ItemMode);

#[derive(Debug)]
struct Collection {
    items: watch::Sender<Vec<Item>>,
    completed: watch::Sender<bool>,
}

impl Collection {
    fn new() -> Self {
        let (items, _) = watch::channel(Vec::new());
        let (completed, _) = watch::channel(false);
        Self { items, completed }
    }
}

/// Item store kept entirely in memory.
///
/// # Example
///
/// ```ignore
/// use curator::adapters::InMemoryItemStore;
/// use curator::traits::ItemStore;
///
/// let store = InMemoryItemStore::new();
/// store.replace_all("L1", ItemMode::List, items).await?;
/// assert_eq!(store.current_count("L1", ItemMode::List).await?, items_len);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    collections: Mutex<HashMap<CollectionKey, Arc<Collection>>>,
    closed: AtomicBool,
    failing_writes: AtomicU32,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every later write with [`StoreError::Closed`].
    /// Existing observers keep their last value.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Reject the next `count` writes with [`StoreError::WriteFailed`].
    pub fn fail_next_writes(&self, count: u32) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Snapshot of a collection without subscribing.
    pub fn items(&self, list_id: &str, mode: ItemMode) -> Vec<Item> {
        self.collection(list_id, mode).items.borrow().clone()
    }

    pub fn is_completed(&self, list_id: &str, mode: ItemMode) -> bool {
        *self.collection(list_id, mode).completed.borrow()
    }

    fn collection(&self, list_id: &str, mode: ItemMode) -> Arc<Collection> {
        let mut collections = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        collections
            .entry((list_id.to_string(), mode))
            .or_insert_with(|| Arc::new(Collection::new()))
            .clone()
    }

    fn writable(&self, list_id: &str, mode: ItemMode) -> Result<Arc<Collection>, StoreError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        let failing = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(StoreError::WriteFailed(format!("{}/{}", list_id, mode)));
        }
        Ok(self.collection(list_id, mode))
    }
}

/// Turn a watch receiver into a stream that starts with the current value.
fn live<T>(rx: watch::Receiver<T>) -> LiveStream<T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
    .boxed()
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    fn observe_items(&self, list_id: &str, mode: ItemMode) -> LiveStream<Vec<Item>> {
        live(self.collection(list_id, mode).items.subscribe())
    }

    fn observe_is_completed(&self, list_id: &str, mode: ItemMode) -> LiveStream<bool> {
        live(self.collection(list_id, mode).completed.subscribe())
    }

    async fn replace_all(
        &self,
        list_id: &str,
        mode: ItemMode,
        items: Vec<Item>,
    ) -> Result<(), StoreError> {
        let collection = self.writable(list_id, mode)?;
        tracing::debug!(list_id, mode = %mode, count = items.len(), "Replacing cached items");
        collection.items.send_replace(items);
        Ok(())
    }

    async fn append(
        &self,
        list_id: &str,
        mode: ItemMode,
        items: Vec<Item>,
    ) -> Result<(), StoreError> {
        let collection = self.writable(list_id, mode)?;
        tracing::debug!(list_id, mode = %mode, count = items.len(), "Appending cached items");
        collection.items.send_modify(|cached| cached.extend(items));
        Ok(())
    }

    async fn replace_item(
        &self,
        list_id: &str,
        mode: ItemMode,
        item: Item,
    ) -> Result<(), StoreError> {
        let collection = self.writable(list_id, mode)?;
        collection.items.send_if_modified(|cached| {
            match cached.iter_mut().find(|cached_item| cached_item.id == item.id) {
                Some(slot) if *slot != item => {
                    *slot = item;
                    true
                }
                _ => false,
            }
        });
        Ok(())
    }

    async fn set_completed(
        &self,
        list_id: &str,
        mode: ItemMode,
        completed: bool,
    ) -> Result<(), StoreError> {
        let collection = self.writable(list_id, mode)?;
        collection.completed.send_if_modified(|current| {
            let changed = *current != completed;
            *current = completed;
            changed
        });
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        let collections: Vec<Arc<Collection>> = self
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for collection in collections {
            collection.items.send_if_modified(|cached| {
                let changed = !cached.is_empty();
                cached.clear();
                changed
            });
            collection.completed.send_if_modified(|current| {
                let changed = *current;
                *current = false;
                changed
            });
        }
        Ok(())
    }

    async fn current_count(&self, list_id: &str, mode: ItemMode) -> Result<usize, StoreError> {
        Ok(self.collection(list_id, mode).items.borrow().len())
    }
}
