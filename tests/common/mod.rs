//! Common test utilities for integration tests.
//!
//! [`TestScreen`] binds a controller against mock collaborators and keeps a
//! handle on every one of them, so a test can script the remote side and
//! inspect what the controller did.
//!
//! # Example
//!
//! ```ignore
//! let mut screen = TestScreenBuilder::new().with_list_items(13).build();
//! screen.send(DetailsIntent::Init);
//! let states = screen.collect_until(|s| s.items().is_some()).await;
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use curator::models::{Item, ItemMode, ListEntity};
use curator::pagination::RetryPolicy;
use curator::{
    Collaborators, ControllerConfig, DetailsController, DetailsIntent, SignalBus, ViewState,
    ViewStateReceiver,
};
use std::sync::Arc;
use std::time::Duration;

pub const LIST_ID: &str = "list-1";

/// Upper bound for any single wait. Generous so paused-clock tests can step
/// over the 5 second refresh retry without tripping it.
pub const WAIT: Duration = Duration::from_secs(60);

/// `count` list items named `{prefix}-1`, `{prefix}-2`, ...
pub fn make_items(mode: ItemMode, prefix: &str, count: usize) -> Vec<Item> {
    (1..=count)
        .map(|n| {
            Item::new(format!("{}-{}", prefix, n), LIST_ID, mode)
                .with_title(format!("{} {}", prefix, n))
        })
        .collect()
}

pub fn test_list() -> ListEntity {
    ListEntity::new(LIST_ID, ItemMode::List)
        .with_title("Reading list")
        .with_tags(vec!["classics".to_string(), "sci-fi".to_string()])
}

/// Config with the default page size and a list retry fast enough for tests.
pub fn test_config() -> ControllerConfig {
    ControllerConfig::default().with_list_retry(RetryPolicy::fixed(Duration::from_millis(1)))
}

pub struct TestScreenBuilder {
    list: ListEntity,
    list_items: Vec<Item>,
    queue_items: Vec<Item>,
    config: ControllerConfig,
}

impl TestScreenBuilder {
    pub fn new() -> Self {
        Self {
            list: test_list(),
            list_items: Vec::new(),
            queue_items: Vec::new(),
            config: test_config(),
        }
    }

    pub fn with_list(mut self, list: ListEntity) -> Self {
        self.list = list;
        self
    }

    pub fn with_list_items(mut self, count: usize) -> Self {
        self.list_items = make_items(ItemMode::List, "item", count);
        self
    }

    pub fn with_items(mut self, mode: ItemMode, items: Vec<Item>) -> Self {
        match mode {
            ItemMode::List => self.list_items = items,
            ItemMode::Queue => self.queue_items = items,
        }
        self
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind the controller. Must run inside a tokio runtime.
    pub fn build(self) -> TestScreen {
        let remote = Arc::new(MockRemoteSource::new());
        remote.set_items(ItemMode::List, self.list_items);
        remote.set_items(ItemMode::Queue, self.queue_items);

        let store = Arc::new(RecordingStore::new());
        let lists = Arc::new(MockListProvider::new(self.list.clone()));
        let editor = Arc::new(MockItemEditor::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let bus = SignalBus::new();

        let collaborators = Collaborators {
            remote: remote.clone(),
            store: store.clone(),
            lists: lists.clone(),
            editor: editor.clone(),
            navigator: navigator.clone(),
        };
        let (controller, receiver) =
            DetailsController::bind(self.list, collaborators, &bus, self.config)
                .expect("controller should bind");

        TestScreen {
            remote,
            store,
            lists,
            editor,
            navigator,
            bus,
            controller,
            receiver,
        }
    }
}

impl Default for TestScreenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestScreen {
    pub remote: Arc<MockRemoteSource>,
    pub store: Arc<RecordingStore>,
    pub lists: Arc<MockListProvider>,
    pub editor: Arc<MockItemEditor>,
    pub navigator: Arc<RecordingNavigator>,
    pub bus: SignalBus,
    pub controller: DetailsController,
    pub receiver: ViewStateReceiver,
}

impl TestScreen {
    pub fn send(&self, intent: DetailsIntent) {
        self.controller.send(intent);
    }

    /// Next snapshot; panics if none arrives in time.
    pub async fn next(&mut self) -> ViewState {
        tokio::time::timeout(WAIT, self.receiver.recv())
            .await
            .expect("timed out waiting for a snapshot")
            .expect("output closed")
    }

    /// Every snapshot up to and including the first one matching `done`.
    pub async fn collect_until<F>(&mut self, done: F) -> Vec<ViewState>
    where
        F: Fn(&ViewState) -> bool,
    {
        let mut seen = Vec::new();
        loop {
            let state = self.next().await;
            let finished = done(&state);
            seen.push(state);
            if finished {
                return seen;
            }
        }
    }

    /// Assert nothing is emitted for `quiet`.
    pub async fn assert_quiet(&mut self, quiet: Duration) {
        if let Ok(Some(state)) = tokio::time::timeout(quiet, self.receiver.recv()).await {
            panic!("expected no snapshot, got {:?}", state);
        }
    }

    /// Send `Init` and wait for the first `Detailed`.
    pub async fn init(&mut self) -> Vec<ViewState> {
        self.send(DetailsIntent::Init);
        self.collect_until(is_detailed).await
    }
}

pub fn is_detailed(state: &ViewState) -> bool {
    matches!(state, ViewState::Detailed { .. })
}

pub fn is_completed(state: &ViewState) -> bool {
    state.is_completed() == Some(true)
}

/// Ids of a `Detailed` snapshot, in display order.
pub fn item_ids(state: &ViewState) -> Vec<String> {
    state
        .items()
        .map(|items| items.iter().map(|item| item.id.clone()).collect())
        .unwrap_or_default()
}

/// Positions of a `Detailed` snapshot, in display order.
pub fn positions(state: &ViewState) -> Vec<Option<u64>> {
    state
        .items()
        .map(|items| items.iter().map(|item| item.position).collect())
        .unwrap_or_default()
}

/// Poll `condition` until it holds; panics after [`WAIT`].
pub async fn eventually<F>(what: &str, condition: F)
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + WAIT;
    while !condition() {
        if tokio::time::Instant::now() >= deadline {
            panic!("condition never held: {}", what);
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}
