//! Ownership of every background task a controller starts.
//!
//! A controller funnels all of its spawns through one [`TaskGroup`], so
//! teardown is a single call that aborts pipelines, workers, signal
//! subscriptions and in-flight toggles together.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Inner {
    handles: Vec<JoinHandle<()>>,
    shut_down: bool,
}

/// Cloneable handle to a shared set of tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskGroup {
    inner: Arc<Mutex<Inner>>,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` on `handle` and track it.
    ///
    /// Returns `false` without spawning once the group has been shut down.
    pub fn spawn<F>(&self, handle: &Handle, name: &'static str, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.lock();
        if inner.shut_down {
            tracing::debug!(task = name, "Task group shut down, not spawning");
            return false;
        }
        inner.handles.retain(|h| !h.is_finished());
        inner.handles.push(handle.spawn(task));
        tracing::trace!(task = name, active = inner.handles.len(), "Task spawned");
        true
    }

    /// Number of tracked tasks that have not finished.
    pub fn active(&self) -> usize {
        self.lock()
            .handles
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    pub fn is_shut_down(&self) -> bool {
        self.lock().shut_down
    }

    /// Abort every tracked task and refuse new ones. Idempotent.
    pub fn shutdown(&self) {
        let handles = {
            let mut inner = self.lock();
            if inner.shut_down {
                return;
            }
            inner.shut_down = true;
            std::mem::take(&mut inner.handles)
        };
        tracing::debug!(count = handles.len(), "Aborting tasks");
        for handle in handles {
            handle.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
