//! Mock remote source for testing.
//!
//! Serves pages out of a per-mode dataset, can fail a scripted number of
//! fetches, and can hold fetches or toggles open behind a [`Gate`].

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use tokio::time::Instant;

use super::{lock, Gate};
use crate::error::RemoteError;
use crate::models::{Item, ItemMode, Page, PageRequest};
use crate::reactions::UPVOTE_ALIAS;
use crate::traits::RemoteSource;

/// A recorded page fetch for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedFetch {
    pub mode: ItemMode,
    pub request: PageRequest,
    /// When the call was made, on tokio's clock
    pub at: Instant,
}

/// A recorded reaction toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedToggle {
    pub item_id: String,
    pub alias: String,
    pub mode: ItemMode,
}

/// Mock remote source.
///
/// # Example
///
/// ```ignore
/// use curator::adapters::mock::MockRemoteSource;
///
/// let remote = MockRemoteSource::new();
/// remote.set_items(ItemMode::List, items);
/// remote.fail_next_fetches(3, RemoteError::Timeout { duration_secs: 1 });
///
/// // The first three fetches fail, the fourth serves page 1.
/// ```
#[derive(Debug, Default)]
pub struct MockRemoteSource {
    /// Full collection served page by page, per mode
    datasets: Mutex<HashMap<ItemMode, Vec<Item>>>,
    /// Errors returned by the next fetches, in order
    fetch_failures: Mutex<VecDeque<RemoteError>>,
    /// Error returned by every toggle while set
    toggle_failure: Mutex<Option<RemoteError>>,
    /// Reactions the current user has toggled on
    user_reactions: Mutex<HashSet<(String, String)>>,
    fetches: Mutex<Vec<RecordedFetch>>,
    toggles: Mutex<Vec<RecordedToggle>>,
    list_gate: Gate,
    queue_gate: Gate,
    toggle_gate: Gate,
}

impl MockRemoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collection served for `mode`.
    pub fn set_items(&self, mode: ItemMode, items: Vec<Item>) {
        lock(&self.datasets).insert(mode, items);
    }

    /// Make the next `count` fetches fail with `error`.
    pub fn fail_next_fetches(&self, count: usize, error: RemoteError) {
        let mut failures = lock(&self.fetch_failures);
        for _ in 0..count {
            failures.push_back(error.clone());
        }
    }

    /// Configure whether toggles fail.
    pub fn set_toggle_failure(&self, error: Option<RemoteError>) {
        *lock(&self.toggle_failure) = error;
    }

    /// Gate that fetches of `mode` wait on.
    pub fn fetch_gate(&self, mode: ItemMode) -> &Gate {
        match mode {
            ItemMode::List => &self.list_gate,
            ItemMode::Queue => &self.queue_gate,
        }
    }

    /// Gate that toggles wait on.
    pub fn toggle_gate(&self) -> &Gate {
        &self.toggle_gate
    }

    /// Get all recorded fetches.
    pub fn fetches(&self) -> Vec<RecordedFetch> {
        lock(&self.fetches).clone()
    }

    /// Get recorded fetches of one mode.
    pub fn fetches_for(&self, mode: ItemMode) -> Vec<RecordedFetch> {
        lock(&self.fetches)
            .iter()
            .filter(|fetch| fetch.mode == mode)
            .cloned()
            .collect()
    }

    /// Get all recorded toggles.
    pub fn toggles(&self) -> Vec<RecordedToggle> {
        lock(&self.toggles).clone()
    }

    async fn fetch(&self, mode: ItemMode, request: &PageRequest) -> Result<Page, RemoteError> {
        lock(&self.fetches).push(RecordedFetch {
            mode,
            request: request.clone(),
            at: Instant::now(),
        });

        self.fetch_gate(mode).pass().await;

        if let Some(error) = lock(&self.fetch_failures).pop_front() {
            return Err(error);
        }

        let datasets = lock(&self.datasets);
        let matching: Vec<&Item> = datasets
            .get(&mode)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| {
                        request.search_query.is_empty()
                            || item.title.contains(&request.search_query)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let start = (request.page.saturating_sub(1) as usize) * request.page_size;
        let items: Vec<Item> = matching
            .into_iter()
            .skip(start)
            .take(request.page_size)
            .cloned()
            .collect();
        Ok(Page::from_fetch(items, request.page_size))
    }

    async fn toggle(&self, item_id: &str, alias: &str, mode: ItemMode) -> Result<Item, RemoteError> {
        lock(&self.toggles).push(RecordedToggle {
            item_id: item_id.to_string(),
            alias: alias.to_string(),
            mode,
        });

        self.toggle_gate.pass().await;

        if let Some(error) = lock(&self.toggle_failure).clone() {
            return Err(error);
        }

        let key = (item_id.to_string(), alias.to_string());
        let turned_on = {
            let mut user_reactions = lock(&self.user_reactions);
            if user_reactions.remove(&key) {
                false
            } else {
                user_reactions.insert(key);
                true
            }
        };

        let mut datasets = lock(&self.datasets);
        let item = datasets
            .get_mut(&mode)
            .and_then(|items| items.iter_mut().find(|item| item.id == item_id))
            .ok_or_else(|| RemoteError::HttpStatus {
                status: 404,
                message: format!("item {} not found", item_id),
            })?;

        let count = item.reactions.entry(alias.to_string()).or_insert(0);
        if turned_on {
            *count += 1;
        } else {
            *count = count.saturating_sub(1);
        }
        Ok(item.clone())
    }
}

#[async_trait]
impl RemoteSource for MockRemoteSource {
    async fn fetch_list_page(&self, request: &PageRequest) -> Result<Page, RemoteError> {
        self.fetch(ItemMode::List, request).await
    }

    async fn fetch_queue_page(&self, request: &PageRequest) -> Result<Page, RemoteError> {
        self.fetch(ItemMode::Queue, request).await
    }

    async fn toggle_upvote(&self, item_id: &str, mode: ItemMode) -> Result<Item, RemoteError> {
        self.toggle(item_id, UPVOTE_ALIAS, mode).await
    }

    async fn toggle_reaction(
        &self,
        item_id: &str,
        alias: &str,
        mode: ItemMode,
    ) -> Result<Item, RemoteError> {
        self.toggle(item_id, alias, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("i{}", i), "L1", ItemMode::List).with_title(format!("Item {}", i)))
            .collect()
    }

    fn request(page: u32) -> PageRequest {
        PageRequest {
            list_id: "L1".to_string(),
            search_query: String::new(),
            sort_option: String::new(),
            filters: Vec::new(),
            page,
            page_size: 10,
        }
    }

    #[tokio::test]
    async fn test_pages_are_sliced_from_dataset() {
        let remote = MockRemoteSource::new();
        remote.set_items(ItemMode::List, dataset(27));

        let first = remote.fetch_list_page(&request(1)).await.unwrap();
        let third = remote.fetch_list_page(&request(3)).await.unwrap();

        assert_eq!(first.len(), 10);
        assert!(!first.is_completed);
        assert_eq!(third.len(), 7);
        assert!(third.is_completed);
        assert_eq!(third.items[0].id, "i20");
    }

    #[tokio::test]
    async fn test_scripted_failures_are_consumed_in_order() {
        let remote = MockRemoteSource::new();
        remote.set_items(ItemMode::List, dataset(3));
        remote.fail_next_fetches(1, RemoteError::Timeout { duration_secs: 1 });

        assert!(remote.fetch_list_page(&request(1)).await.is_err());
        assert!(remote.fetch_list_page(&request(1)).await.is_ok());
        assert_eq!(remote.fetches().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_flips_reaction() {
        let remote = MockRemoteSource::new();
        remote.set_items(ItemMode::List, dataset(1));

        let on = remote
            .toggle_reaction("i0", "heart", ItemMode::List)
            .await
            .unwrap();
        assert_eq!(on.reaction_count("heart"), 1);

        let off = remote
            .toggle_reaction("i0", "heart", ItemMode::List)
            .await
            .unwrap();
        assert_eq!(off.reaction_count("heart"), 0);
        assert_eq!(remote.toggles().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_unknown_item_fails() {
        let remote = MockRemoteSource::new();
        let result = remote.toggle_upvote("missing", ItemMode::Queue).await;
        assert!(matches!(
            result,
            Err(RemoteError::HttpStatus { status: 404, .. })
        ));
    }
}
