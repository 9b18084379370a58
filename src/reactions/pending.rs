use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identifies one in-flight toggle: the item and the reaction alias.
pub type PendingKey = (String, String);

/// Set of reaction toggles that were dispatched but have not settled yet.
///
/// Only atomic insert, remove and lookup are exposed; each call takes the
/// lock for its own duration and never across an await.
#[derive(Debug, Default)]
pub struct PendingReactions {
    inner: Mutex<HashSet<PendingKey>>,
}

impl PendingReactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as pending. Returns `false` if it already was.
    pub fn insert(&self, item_id: &str, alias: &str) -> bool {
        self.lock()
            .insert((item_id.to_string(), alias.to_string()))
    }

    pub fn remove(&self, item_id: &str, alias: &str) -> bool {
        self.lock()
            .remove(&(item_id.to_string(), alias.to_string()))
    }

    pub fn contains(&self, item_id: &str, alias: &str) -> bool {
        self.lock()
            .contains(&(item_id.to_string(), alias.to_string()))
    }

    /// Aliases pending for one item.
    pub fn aliases_for(&self, item_id: &str) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .lock()
            .iter()
            .filter(|(id, _)| id == item_id)
            .map(|(_, alias)| alias.clone())
            .collect();
        aliases.sort();
        aliases
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<PendingKey>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes its pair from the pending set when dropped, whether the toggle
/// succeeded, failed, or was aborted at teardown.
#[derive(Debug)]
pub(crate) struct PendingGuard {
    pending: Arc<PendingReactions>,
    item_id: String,
    alias: String,
}

impl PendingGuard {
    /// Insert the pair, or return `None` if it is already pending.
    pub(crate) fn acquire(
        pending: &Arc<PendingReactions>,
        item_id: &str,
        alias: &str,
    ) -> Option<Self> {
        if !pending.insert(item_id, alias) {
            return None;
        }
        Some(Self {
            pending: pending.clone(),
            item_id: item_id.to_string(),
            alias: alias.to_string(),
        })
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.pending.remove(&self.item_id, &self.alias);
    }
}
