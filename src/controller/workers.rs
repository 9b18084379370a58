//! Long-lived side tasks of a controller: load-more, list reload and the
//! signal subscription.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{mpsc, watch};

use crate::error::CuratorError;
use crate::models::{ItemMode, ListEntity, Setup};
use crate::pagination::{PaginationDriver, RetryPolicy};
use crate::signals::SignalReceivers;
use crate::state::SetupState;
use crate::traits::{ListProvider, Navigator};

/// Service load-more intents one at a time.
///
/// Each load-more waits until page 1 of the current setup is stored, and is
/// cancelled when the setup changes or a new refresh starts. Intents that
/// arrive while one is in flight are absorbed.
pub(crate) async fn load_more(
    mut intents: mpsc::UnboundedReceiver<()>,
    driver: PaginationDriver,
    list_id: String,
    setup_state: SetupState,
    mut refresh_gate: watch::Receiver<Option<Setup>>,
    failures: mpsc::UnboundedSender<CuratorError>,
) {
    while intents.recv().await.is_some() {
        let ready = {
            let gate = refresh_gate
                .wait_for(|ready| ready.as_ref() == Some(&setup_state.current()))
                .await;
            match gate {
                Ok(ready) => ready.clone(),
                Err(_) => return,
            }
        };
        let Some(setup) = ready else {
            continue;
        };

        let mut changes = setup_state.subscribe();
        if *changes.borrow_and_update() != setup {
            continue;
        }
        let mut superseded = refresh_gate.clone();
        let still_current = || {
            setup_state.current() == setup && refresh_gate.borrow().as_ref() == Some(&setup)
        };

        let outcome = tokio::select! {
            biased;

            _ = superseded.wait_for(|ready| ready.as_ref() != Some(&setup)) => None,
            _ = changes.changed() => None,
            result = driver.load_more(&list_id, &setup, still_current) => result.transpose(),
        };

        match outcome {
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                let _ = failures.send(e);
            }
            None => tracing::debug!(list_id = %list_id, "Load more superseded by a newer setup"),
        }

        let mut absorbed = 0usize;
        while intents.try_recv().is_ok() {
            absorbed += 1;
        }
        if absorbed > 0 {
            tracing::debug!(list_id = %list_id, absorbed, "Absorbed load-more intents");
        }
    }
}

/// Reload the list entity on request, retrying at the list interval.
pub(crate) async fn reload_list(
    mut requests: mpsc::UnboundedReceiver<()>,
    lists: Arc<dyn ListProvider>,
    list_id: String,
    mode: ItemMode,
    retry: RetryPolicy,
    list: Arc<watch::Sender<ListEntity>>,
    failures: mpsc::UnboundedSender<CuratorError>,
) {
    while requests.recv().await.is_some() {
        match retry
            .run("reload_list", || lists.get_list_by_id(&list_id, mode))
            .await
        {
            Ok(entity) => {
                tracing::info!(list_id = %list_id, "List entity reloaded");
                list.send_replace(entity);
            }
            Err(e) => {
                let _ = failures.send(CuratorError::action("reload_list", e));
            }
        }
    }
}

/// Everything a signal handler may touch.
pub(crate) struct SignalTargets {
    pub setup: SetupState,
    pub filter_engaged: Arc<AtomicBool>,
    pub reload_items: mpsc::UnboundedSender<()>,
    pub navigator: Arc<dyn Navigator>,
}

enum Received<T> {
    Value(T),
    Skipped,
    Closed,
}

fn received<T>(signal: &'static str, result: Result<T, RecvError>) -> Received<T> {
    match result {
        Ok(value) => Received::Value(value),
        Err(RecvError::Lagged(missed)) => {
            tracing::warn!(signal, missed, "Signal receiver lagged");
            Received::Skipped
        }
        Err(RecvError::Closed) => Received::Closed,
    }
}

/// Apply cross-screen signals until the bus is gone or the task is aborted.
/// The receivers live inside this task, so aborting it unsubscribes them.
pub(crate) async fn signals(mut receivers: SignalReceivers, targets: SignalTargets) {
    loop {
        tokio::select! {
            result = receivers.filter_result_applied.recv() => match received("filter_result_applied", result) {
                Received::Value(setup) => {
                    targets.setup.replace(setup);
                }
                Received::Skipped => {}
                Received::Closed => return,
            },
            result = receivers.disable_filter_button.recv() => match received("disable_filter_button", result) {
                Received::Value(()) => targets.filter_engaged.store(false, Ordering::SeqCst),
                Received::Skipped => {}
                Received::Closed => return,
            },
            result = receivers.refresh_requested.recv() => match received("refresh_requested", result) {
                Received::Value(()) => {
                    let _ = targets.reload_items.send(());
                }
                Received::Skipped => {}
                Received::Closed => return,
            },
            result = receivers.share.recv() => match received("share", result) {
                Received::Value(item) => targets.navigator.share(&item.share_text()),
                Received::Skipped => {}
                Received::Closed => return,
            },
        }
    }
}
