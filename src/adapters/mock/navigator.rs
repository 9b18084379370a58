//! Navigator that records what it was asked to do.

use std::sync::Mutex;

use super::lock;
use crate::models::{Item, ItemMode};
use crate::traits::{FilterRequest, Navigator};

/// A recorded navigation side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    OpenFilter(FilterRequest),
    EditList { list_id: String, mode: ItemMode },
    EditItem(String),
    OpenComments(String),
    Share(String),
    GoBack,
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        lock(&self.events).clone()
    }

    fn record(&self, event: NavigationEvent) {
        tracing::debug!(?event, "Navigation requested");
        lock(&self.events).push(event);
    }
}

impl Navigator for RecordingNavigator {
    fn open_filter(&self, request: FilterRequest) {
        self.record(NavigationEvent::OpenFilter(request));
    }

    fn edit_list(&self, list_id: &str, mode: ItemMode) {
        self.record(NavigationEvent::EditList {
            list_id: list_id.to_string(),
            mode,
        });
    }

    fn edit_item(&self, item: &Item) {
        self.record(NavigationEvent::EditItem(item.id.clone()));
    }

    fn open_comments(&self, item: &Item) {
        self.record(NavigationEvent::OpenComments(item.id.clone()));
    }

    fn share(&self, content: &str) {
        self.record(NavigationEvent::Share(content.to_string()));
    }

    fn go_back(&self) {
        self.record(NavigationEvent::GoBack);
    }
}
