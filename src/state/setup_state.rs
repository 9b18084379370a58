//! Copy-on-write holder of the screen's current [`Setup`].
//!
//! Every pipeline reads the setup from here and receives an owned snapshot,
//! so a reader never observes a half-applied change. Writers always replace
//! the whole value.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;

use crate::models::{DetailsOption, Setup};
use crate::traits::LiveStream;

#[derive(Debug, Clone)]
pub struct SetupState {
    tx: Arc<watch::Sender<Setup>>,
}

impl SetupState {
    pub fn new(initial: Setup) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Latest setup.
    pub fn current(&self) -> Setup {
        self.tx.borrow().clone()
    }

    /// Replace the setup. Returns `false` and notifies nobody when the new
    /// value is structurally equal to the current one.
    pub fn replace(&self, setup: Setup) -> bool {
        let replaced = self.tx.send_if_modified(|current| {
            if *current == setup {
                false
            } else {
                *current = setup;
                true
            }
        });
        if replaced {
            tracing::debug!(option = %self.tx.borrow().option.as_str(), "Setup replaced");
        }
        replaced
    }

    /// Copy the current setup with only the tab changed, and adopt it.
    pub fn change_option(&self, option: DetailsOption) -> bool {
        let next = self.current().with_option(option);
        self.replace(next)
    }

    /// Raw receiver, for callers that `select!` on changes.
    pub fn subscribe(&self) -> watch::Receiver<Setup> {
        self.tx.subscribe()
    }

    /// Current setup first, then every later distinct setup.
    pub fn observe_changes(&self) -> LiveStream<Setup> {
        let rx = self.tx.subscribe();
        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let setup = rx.borrow_and_update().clone();
            Some((setup, (rx, false)))
        })
        .boxed()
    }
}

impl Default for SetupState {
    fn default() -> Self {
        Self::new(Setup::default())
    }
}
