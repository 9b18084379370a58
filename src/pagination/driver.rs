use std::sync::Arc;

use crate::error::{CuratorError, CuratorResult, ErrorContext, RemoteError, ResultExt};
use crate::models::{is_last_page, ItemMode, Page, PageRequest, Setup};
use crate::traits::{ItemStore, RemoteSource};

use super::RetryPolicy;

/// Next page to request, derived from how many items are already cached.
///
/// Assumes every cached page came back full. Items removed from the cache
/// between pages shift the result, and so does a server whose page size
/// differs from ours.
pub fn next_page_number(cached: usize, page_size: usize) -> u32 {
    let full_pages = cached.div_ceil(page_size.max(1));
    u32::try_from(full_pages).unwrap_or(u32::MAX - 1) + 1
}

/// Moves pages from the remote source into the item store.
#[derive(Clone)]
pub struct PaginationDriver {
    remote: Arc<dyn RemoteSource>,
    store: Arc<dyn ItemStore>,
    page_size: usize,
    retry: RetryPolicy,
}

impl PaginationDriver {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        store: Arc<dyn ItemStore>,
        page_size: usize,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            remote,
            store,
            page_size,
            retry,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Load page 1 and replace the cached collection with it.
    ///
    /// The fetch and both store writes are retried together according to the
    /// refresh policy; with the default unbounded policy this only returns
    /// once a whole attempt succeeded.
    pub async fn refresh(&self, list_id: &str, setup: &Setup) -> CuratorResult<Page> {
        let mode = setup.option.item_mode()?;
        let request = self.request(list_id, setup, 1);

        tracing::info!(list_id, mode = %mode, "Refreshing items");
        let page = self
            .retry
            .run("refresh", || self.refresh_once(list_id, mode, &request))
            .await
            .map_err(|e| {
                // Only reachable with a bounded policy, after every retry ran.
                let retries = self.retry.max_retries().unwrap_or(0);
                e.with_context(
                    ErrorContext::new("refresh")
                        .with_list_id(list_id)
                        .with_retry_count(retries),
                )
            })?;

        tracing::info!(
            list_id,
            mode = %mode,
            count = page.len(),
            completed = page.is_completed,
            "Refresh stored"
        );
        Ok(page)
    }

    async fn refresh_once(
        &self,
        list_id: &str,
        mode: ItemMode,
        request: &PageRequest,
    ) -> CuratorResult<Page> {
        let page = self
            .fetch(mode, request)
            .await
            .map_err(|e| CuratorError::fetch(list_id, 1, e))?;
        self.store
            .replace_all(list_id, mode, page.items.clone())
            .await?;
        self.store
            .set_completed(list_id, mode, page.is_completed)
            .await?;
        Ok(page)
    }

    /// Fetch the page after the cached items and append it. Not retried.
    ///
    /// `still_current` is asked once the page has arrived; when it says no,
    /// the page is dropped without touching the store and `None` is returned.
    pub async fn load_more<F>(
        &self,
        list_id: &str,
        setup: &Setup,
        still_current: F,
    ) -> CuratorResult<Option<Page>>
    where
        F: Fn() -> bool,
    {
        let mode = setup.option.item_mode()?;
        let cached = self.store.current_count(list_id, mode).await?;
        let page_number = next_page_number(cached, self.page_size);
        let request = self.request(list_id, setup, page_number);

        tracing::debug!(list_id, mode = %mode, page = page_number, cached, "Loading more items");
        let page = self.fetch(mode, &request).await.map_err(|e| {
            tracing::warn!(list_id, page = page_number, error = %e, "Load more failed");
            CuratorError::fetch(list_id, page_number, e)
                .with_context(ErrorContext::new("load_more").with_list_id(list_id))
        })?;

        if !still_current() {
            tracing::debug!(list_id, page = page_number, "Setup changed, page dropped");
            return Ok(None);
        }

        self.store
            .append(list_id, mode, page.items.clone())
            .await
            .with_context(|| ErrorContext::new("store_page").with_list_id(list_id))?;
        self.store
            .set_completed(list_id, mode, page.is_completed)
            .await
            .with_context(|| ErrorContext::new("store_page").with_list_id(list_id))?;

        tracing::info!(
            list_id,
            page = page_number,
            count = page.len(),
            completed = page.is_completed,
            "Page appended"
        );
        Ok(Some(page))
    }

    fn request(&self, list_id: &str, setup: &Setup, page: u32) -> PageRequest {
        PageRequest {
            list_id: list_id.to_string(),
            search_query: setup.search_query.clone(),
            sort_option: setup.sort_option.clone(),
            filters: setup.filter_list(),
            page,
            page_size: self.page_size,
        }
    }

    /// Dispatch to the mode's fetch and apply the short-page completion rule.
    async fn fetch(&self, mode: ItemMode, request: &PageRequest) -> Result<Page, RemoteError> {
        let page = match mode {
            ItemMode::List => self.remote.fetch_list_page(request).await?,
            ItemMode::Queue => self.remote.fetch_queue_page(request).await?,
        };
        let is_completed = is_last_page(page.len(), self.page_size);
        Ok(Page::new(page.items, is_completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryItemStore, MockRemoteSource};
    use crate::error::StoreError;
    use crate::models::{DetailsOption, Item};
    use std::time::Duration;

    fn dataset(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("i{}", i), "L1", ItemMode::List))
            .collect()
    }

    fn driver(remote: Arc<MockRemoteSource>, store: Arc<InMemoryItemStore>) -> PaginationDriver {
        PaginationDriver::new(remote, store, 10, RetryPolicy::fixed(Duration::from_secs(5)))
    }

    #[test]
    fn test_next_page_number() {
        assert_eq!(next_page_number(0, 10), 1);
        assert_eq!(next_page_number(10, 10), 2);
        assert_eq!(next_page_number(13, 10), 3);
        assert_eq!(next_page_number(20, 10), 3);
    }

    #[tokio::test]
    async fn test_refresh_then_load_more_tracks_completion() {
        let remote = Arc::new(MockRemoteSource::new());
        remote.set_items(ItemMode::List, dataset(27));
        let store = Arc::new(InMemoryItemStore::new());
        let driver = driver(remote.clone(), store.clone());
        let setup = Setup::default();

        driver.refresh("L1", &setup).await.unwrap();
        assert!(!store.is_completed("L1", ItemMode::List));

        driver.load_more("L1", &setup, || true).await.unwrap();
        assert!(!store.is_completed("L1", ItemMode::List));

        driver.load_more("L1", &setup, || true).await.unwrap();
        assert!(store.is_completed("L1", ItemMode::List));
        assert_eq!(store.items("L1", ItemMode::List).len(), 27);

        let pages: Vec<u32> = remote.fetches().iter().map(|f| f.request.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_refresh_passes_setup_to_request() {
        let remote = Arc::new(MockRemoteSource::new());
        let store = Arc::new(InMemoryItemStore::new());
        let driver = driver(remote.clone(), store);
        let setup = Setup::new(DetailsOption::Queue)
            .with_search_query("tea")
            .with_sort_option("top")
            .with_filter("green");

        driver.refresh("L1", &setup).await.unwrap();

        let fetch = &remote.fetches_for(ItemMode::Queue)[0];
        assert_eq!(fetch.request.search_query, "tea");
        assert_eq!(fetch.request.sort_option, "top");
        assert_eq!(fetch.request.filters, vec!["green".to_string()]);
        assert_eq!(fetch.request.page_size, 10);
    }

    #[tokio::test]
    async fn test_about_tab_is_a_configuration_error() {
        let remote = Arc::new(MockRemoteSource::new());
        let store = Arc::new(InMemoryItemStore::new());
        let driver = driver(remote.clone(), store);

        let err = driver
            .refresh("L1", &Setup::new(DetailsOption::About))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(remote.fetches().is_empty());
    }

    #[tokio::test]
    async fn test_load_more_failure_is_not_retried() {
        let remote = Arc::new(MockRemoteSource::new());
        remote.set_items(ItemMode::List, dataset(15));
        let store = Arc::new(InMemoryItemStore::new());
        let driver = driver(remote.clone(), store.clone());

        driver.refresh("L1", &Setup::default()).await.unwrap();
        remote.fail_next_fetches(1, RemoteError::Timeout { duration_secs: 3 });

        let err = driver.load_more("L1", &Setup::default(), || true).await.unwrap_err();
        assert!(matches!(err.inner(), CuratorError::Fetch { page: 2, .. }));
        assert_eq!(remote.fetches().len(), 2);
        assert_eq!(store.items("L1", ItemMode::List).len(), 10);
    }

    #[tokio::test]
    async fn test_refresh_replaces_previous_items() {
        let remote = Arc::new(MockRemoteSource::new());
        remote.set_items(ItemMode::List, dataset(12));
        let store = Arc::new(InMemoryItemStore::new());
        let driver = driver(remote, store.clone());

        driver.refresh("L1", &Setup::default()).await.unwrap();
        driver.load_more("L1", &Setup::default(), || true).await.unwrap();
        driver.refresh("L1", &Setup::default()).await.unwrap();

        assert_eq!(store.items("L1", ItemMode::List).len(), 10);
        assert!(!store.is_completed("L1", ItemMode::List));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_refresh_reports_retries() {
        let remote = Arc::new(MockRemoteSource::new());
        let store = Arc::new(InMemoryItemStore::new());
        let policy = RetryPolicy::fixed(Duration::from_secs(5)).with_max_retries(2);
        let driver = PaginationDriver::new(remote.clone(), store, 10, policy);
        remote.fail_next_fetches(5, RemoteError::Timeout { duration_secs: 1 });

        let err = driver.refresh("L1", &Setup::default()).await.unwrap_err();

        assert!(matches!(err.inner(), CuratorError::Fetch { page: 1, .. }));
        let ctx = err.context().unwrap();
        assert_eq!(ctx.operation, "refresh");
        assert_eq!(ctx.retry_count, 2);
        assert_eq!(remote.fetches().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_store_fails_bounded_refresh() {
        let remote = Arc::new(MockRemoteSource::new());
        remote.set_items(ItemMode::List, dataset(3));
        let store = Arc::new(InMemoryItemStore::new());
        store.close();
        let policy = RetryPolicy::fixed(Duration::from_secs(5)).with_max_retries(1);
        let driver = PaginationDriver::new(remote.clone(), store, 10, policy);

        let err = driver.refresh("L1", &Setup::default()).await.unwrap_err();

        assert!(matches!(err.inner(), CuratorError::Store(StoreError::Closed)));
        assert_eq!(err.context().unwrap().operation, "refresh");
        assert_eq!(remote.fetches().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_store_write_retries_whole_refresh() {
        let remote = Arc::new(MockRemoteSource::new());
        remote.set_items(ItemMode::List, dataset(4));
        let store = Arc::new(InMemoryItemStore::new());
        store.fail_next_writes(1);
        let driver = driver(remote.clone(), store.clone());
        let start = tokio::time::Instant::now();

        let page = driver.refresh("L1", &Setup::default()).await.unwrap();

        assert_eq!(page.len(), 4);
        assert!(start.elapsed() >= Duration::from_secs(5));
        // The page is fetched again, not just written again.
        assert_eq!(remote.fetches().len(), 2);
        assert_eq!(store.items("L1", ItemMode::List).len(), 4);
        assert!(store.is_completed("L1", ItemMode::List));
    }

    #[tokio::test]
    async fn test_load_more_drops_page_of_stale_setup() {
        let remote = Arc::new(MockRemoteSource::new());
        remote.set_items(ItemMode::List, dataset(15));
        let store = Arc::new(InMemoryItemStore::new());
        let driver = driver(remote.clone(), store.clone());

        driver.refresh("L1", &Setup::default()).await.unwrap();
        let outcome = driver
            .load_more("L1", &Setup::default(), || false)
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(remote.fetches().len(), 2);
        assert_eq!(store.items("L1", ItemMode::List).len(), 10);
        assert!(!store.is_completed("L1", ItemMode::List));
    }
}
