use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::pending::{PendingGuard, PendingReactions};
use super::UPVOTE_ALIAS;
use crate::error::CuratorError;
use crate::models::Item;
use crate::tasks::TaskGroup;
use crate::traits::{ItemStore, RemoteSource};

/// What happened to a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A remote call was started
    Dispatched,
    /// The same pair was already in flight; nothing was sent
    Coalesced,
    /// The controller is shutting down
    Rejected,
}

#[derive(Debug, Clone)]
enum Toggle {
    Upvote,
    Reaction(String),
}

impl Toggle {
    fn alias(&self) -> &str {
        match self {
            Toggle::Upvote => UPVOTE_ALIAS,
            Toggle::Reaction(alias) => alias,
        }
    }
}

/// Runs reaction and upvote toggles with per-(item, alias) deduplication.
///
/// Toggles run on their own execution context so a slow page fetch never
/// delays them. Confirmed items go straight into the item store; failures
/// are forwarded to the screen's error channel.
#[derive(Clone)]
pub struct ReactionTracker {
    remote: Arc<dyn RemoteSource>,
    store: Arc<dyn ItemStore>,
    pending: Arc<PendingReactions>,
    failures: mpsc::UnboundedSender<CuratorError>,
    handle: Handle,
    tasks: TaskGroup,
}

impl ReactionTracker {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        store: Arc<dyn ItemStore>,
        failures: mpsc::UnboundedSender<CuratorError>,
        handle: Handle,
        tasks: TaskGroup,
    ) -> Self {
        Self {
            remote,
            store,
            pending: Arc::new(PendingReactions::new()),
            failures,
            handle,
            tasks,
        }
    }

    pub fn toggle_upvote(&self, item: &Item) -> ToggleOutcome {
        self.dispatch(item, Toggle::Upvote)
    }

    pub fn toggle_reaction(&self, item: &Item, alias: &str) -> ToggleOutcome {
        self.dispatch(item, Toggle::Reaction(alias.to_string()))
    }

    pub fn is_pending(&self, item_id: &str, alias: &str) -> bool {
        self.pending.contains(item_id, alias)
    }

    pub fn pending(&self) -> &PendingReactions {
        &self.pending
    }

    fn dispatch(&self, item: &Item, toggle: Toggle) -> ToggleOutcome {
        // Marked before the call is issued so duplicates are visible at once.
        let Some(guard) = PendingGuard::acquire(&self.pending, &item.id, toggle.alias()) else {
            tracing::debug!(item_id = %item.id, alias = toggle.alias(), "Toggle already pending");
            return ToggleOutcome::Coalesced;
        };

        let remote = self.remote.clone();
        let store = self.store.clone();
        let failures = self.failures.clone();
        let item_id = item.id.clone();
        let mode = item.mode;

        let spawned = self.tasks.spawn(&self.handle, "toggle_reaction", async move {
            let alias = toggle.alias().to_string();
            let result = match &toggle {
                Toggle::Upvote => remote.toggle_upvote(&item_id, mode).await,
                Toggle::Reaction(alias) => remote.toggle_reaction(&item_id, alias, mode).await,
            };

            match result {
                Ok(updated) => {
                    let list_id = updated.list_id.clone();
                    tracing::debug!(item_id = %item_id, alias = %alias, "Toggle confirmed");
                    if let Err(e) = store.replace_item(&list_id, updated.mode, updated).await {
                        let _ = failures.send(e.into());
                    }
                }
                Err(e) => {
                    tracing::warn!(item_id = %item_id, alias = %alias, error = %e, "Toggle failed");
                    let _ = failures.send(CuratorError::mutation(item_id, alias, e));
                }
            }
            drop(guard);
        });

        if spawned {
            ToggleOutcome::Dispatched
        } else {
            ToggleOutcome::Rejected
        }
    }
}
