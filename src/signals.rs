//! Typed cross-screen signals.
//!
//! Other screens talk to a details controller through a [`SignalBus`] handed
//! to it at construction. Each signal has its own broadcast channel and
//! message type. A controller subscribes exactly once when it is bound and
//! drops its receivers when it is torn down.

use tokio::sync::broadcast;

use crate::models::{Item, Setup};

const DEFAULT_CAPACITY: usize = 16;

/// Sending side of the signals, cheap to clone.
#[derive(Debug, Clone)]
pub struct SignalBus {
    filter_result_applied: broadcast::Sender<Setup>,
    disable_filter_button: broadcast::Sender<()>,
    refresh_requested: broadcast::Sender<()>,
    share: broadcast::Sender<Item>,
}

/// One subscriber's receivers for every signal.
#[derive(Debug)]
pub struct SignalReceivers {
    pub filter_result_applied: broadcast::Receiver<Setup>,
    pub disable_filter_button: broadcast::Receiver<()>,
    pub refresh_requested: broadcast::Receiver<()>,
    pub share: broadcast::Receiver<Item>,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            filter_result_applied: broadcast::channel(capacity).0,
            disable_filter_button: broadcast::channel(capacity).0,
            refresh_requested: broadcast::channel(capacity).0,
            share: broadcast::channel(capacity).0,
        }
    }

    pub fn subscribe(&self) -> SignalReceivers {
        SignalReceivers {
            filter_result_applied: self.filter_result_applied.subscribe(),
            disable_filter_button: self.disable_filter_button.subscribe(),
            refresh_requested: self.refresh_requested.subscribe(),
            share: self.share.subscribe(),
        }
    }

    /// The filter dialog produced a new setup. Returns how many screens
    /// received it.
    pub fn publish_filter_result(&self, setup: Setup) -> usize {
        self.filter_result_applied.send(setup).unwrap_or(0)
    }

    pub fn publish_disable_filter_button(&self) -> usize {
        self.disable_filter_button.send(()).unwrap_or(0)
    }

    /// Ask every screen to reload its items.
    pub fn publish_refresh_requested(&self) -> usize {
        self.refresh_requested.send(()).unwrap_or(0)
    }

    pub fn publish_share(&self, item: Item) -> usize {
        self.share.send(item).unwrap_or(0)
    }

    /// Number of live subscriptions, counted over all four channels.
    pub fn receiver_count(&self) -> usize {
        self.filter_result_applied.receiver_count()
            + self.disable_filter_button.receiver_count()
            + self.refresh_requested.receiver_count()
            + self.share.receiver_count()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}
