//! The view-state sequencer.
//!
//! One task merges list updates, setup changes, refresh requests, dialog
//! mutations and surfaced failures into the controller's output. Any error
//! ends the current run: an `Error` snapshot is emitted and every branch is
//! rebuilt from scratch. Receivers of intent channels belong to the
//! sequencer itself, so nothing queued is lost across a restart.

use futures::future::{BoxFuture, Fuse, FusedFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::error::{CuratorError, CuratorResult, ErrorContext};
use crate::models::{Item, ListEntity, Setup};
use crate::pagination::PaginationDriver;
use crate::state::SetupState;
use crate::traits::{ItemEditor, ItemStore};
use crate::view_state::{renumber, ViewState, ViewStateSender};

/// A mutation that runs behind the blocking progress dialog.
#[derive(Debug, Clone)]
pub(crate) enum DialogAction {
    ChangeType(Item),
    Delete(Item),
}

type PipelineFuture = Fuse<BoxFuture<'static, CuratorResult<()>>>;

/// Refresh followed by the read-model projection, for one setup.
#[derive(Clone)]
pub(crate) struct Pipeline {
    pub list_id: String,
    pub list: watch::Receiver<ListEntity>,
    /// `Some(setup)` once page 1 of `setup` is stored; load-more waits on it
    pub refresh_gate: Arc<watch::Sender<Option<Setup>>>,
    pub driver: PaginationDriver,
    pub store: Arc<dyn ItemStore>,
    pub output: ViewStateSender,
}

impl Pipeline {
    /// Close the refresh gate and build the pipeline of `setup`.
    ///
    /// The gate closes before the returned future is first polled, so a
    /// load-more of the previous setup is cancelled right away.
    fn start(&self, setup: Setup) -> PipelineFuture {
        self.refresh_gate.send_replace(None);
        self.clone().run(setup).boxed().fuse()
    }

    async fn run(self, setup: Setup) -> CuratorResult<()> {
        self.output.emit(ViewState::Loading {
            setup: setup.clone(),
        });
        self.driver.refresh(&self.list_id, &setup).await?;
        self.refresh_gate.send_replace(Some(setup.clone()));
        self.project(&setup).await
    }

    /// Re-derive `Detailed` snapshots from the store for as long as it lives.
    async fn project(&self, setup: &Setup) -> CuratorResult<()> {
        let mode = setup.option.item_mode()?;
        let mut item_updates = self.store.observe_items(&self.list_id, mode);
        let mut completed_updates = self.store.observe_is_completed(&self.list_id, mode);
        let mut latest_items: Option<Vec<Item>> = None;
        let mut latest_completed: Option<bool> = None;

        loop {
            tokio::select! {
                next = item_updates.next() => match next {
                    Some(items) => latest_items = Some(items),
                    None => return Ok(()),
                },
                next = completed_updates.next() => match next {
                    Some(completed) => latest_completed = Some(completed),
                    None => return Ok(()),
                },
            }

            let (Some(items), Some(is_completed)) = (latest_items.as_ref(), latest_completed)
            else {
                continue;
            };
            // Nothing to show until the first page lands.
            if items.is_empty() && !is_completed {
                continue;
            }

            let list = self.list.borrow().clone();
            self.output.emit(ViewState::Detailed {
                list,
                setup: setup.clone(),
                items: renumber(items),
                is_completed,
            });
        }
    }
}

pub(crate) struct Sequencer {
    pub setup: SetupState,
    pub init: watch::Receiver<bool>,
    pub pipeline: Pipeline,
    pub editor: Arc<dyn ItemEditor>,
    pub reload_items: mpsc::UnboundedReceiver<()>,
    pub dialogs: mpsc::UnboundedReceiver<DialogAction>,
    pub failures: mpsc::UnboundedReceiver<CuratorError>,
}

impl Sequencer {
    /// Run until the controller goes away, restarting after every error.
    pub(crate) async fn run(mut self) {
        // A setup whose run ended in a configuration error. It is not started
        // again by a restart, only a different setup clears it.
        let mut rejected: Option<Setup> = None;

        loop {
            let run_id = Uuid::new_v4().to_string();
            tracing::debug!(list_id = %self.pipeline.list_id, run_id = %run_id, "View-state run started");

            match self.run_once(&mut rejected).await {
                Ok(()) => {
                    tracing::debug!(list_id = %self.pipeline.list_id, "Inputs closed, sequencer stopping");
                    return;
                }
                Err(cause) => {
                    let cause = cause.with_correlation_id(run_id);
                    let context = cause
                        .context()
                        .map(ErrorContext::to_log_string)
                        .unwrap_or_default();
                    tracing::warn!(
                        list_id = %self.pipeline.list_id,
                        code = cause.error_code(),
                        category = %cause.category(),
                        retryable = cause.is_retryable(),
                        context = %context,
                        error = %cause,
                        "View-state run failed, restarting"
                    );
                    if !self.pipeline.output.emit(ViewState::Error { cause }) {
                        return;
                    }
                }
            }
        }
    }

    async fn run_once(&mut self, rejected: &mut Option<Setup>) -> CuratorResult<()> {
        let mut init = self.init.clone();
        if init.wait_for(|ready| *ready).await.is_err() {
            return Ok(());
        }

        let mut list = self.pipeline.list.clone();
        let entity = list.borrow_and_update().clone();
        self.pipeline.output.emit(ViewState::Default {
            list: entity,
            setup: self.setup.current(),
        });

        tokio::try_join!(
            follow_list(list, self.setup.clone(), self.pipeline.output.clone()),
            follow_setups(
                self.pipeline.clone(),
                self.setup.subscribe(),
                &mut self.reload_items,
                rejected,
            ),
            run_dialogs(&mut self.dialogs, self.editor.clone(), self.pipeline.output.clone()),
            surface_failures(&mut self.failures),
        )?;
        Ok(())
    }
}

/// Emit `Default` again every time the list entity is reloaded.
async fn follow_list(
    mut list: watch::Receiver<ListEntity>,
    setup: SetupState,
    output: ViewStateSender,
) -> CuratorResult<()> {
    while list.changed().await.is_ok() {
        let entity = list.borrow_and_update().clone();
        output.emit(ViewState::Default {
            list: entity,
            setup: setup.current(),
        });
    }
    Ok(())
}

/// Keep exactly one pipeline running, for the latest setup.
async fn follow_setups(
    pipeline: Pipeline,
    mut changes: watch::Receiver<Setup>,
    reload_items: &mut mpsc::UnboundedReceiver<()>,
    rejected: &mut Option<Setup>,
) -> CuratorResult<()> {
    let mut active: Option<Setup> = None;
    let mut running: PipelineFuture = Fuse::terminated();

    let initial = changes.borrow_and_update().clone();
    if rejected.as_ref() == Some(&initial) {
        tracing::debug!(option = initial.option.as_str(), "Waiting for a usable setup");
    } else {
        *rejected = None;
        running = pipeline.start(initial.clone());
        active = Some(initial);
    }

    loop {
        tokio::select! {
            biased;

            changed = changes.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let next = changes.borrow_and_update().clone();
                if active.as_ref() == Some(&next) {
                    continue;
                }
                tracing::info!(
                    list_id = %pipeline.list_id,
                    option = next.option.as_str(),
                    "Setup changed, restarting pipeline"
                );
                *rejected = None;
                // Replacing the future drops the old setup's pipeline.
                running = pipeline.start(next.clone());
                active = Some(next);
            }

            request = reload_items.recv() => {
                let Some(()) = request else {
                    return Ok(());
                };
                if let Some(current) = active.clone() {
                    tracing::info!(list_id = %pipeline.list_id, "Refresh requested");
                    running = pipeline.start(current);
                }
            }

            result = &mut running, if !running.is_terminated() => {
                if let Err(e) = result {
                    if e.is_configuration() {
                        *rejected = active.clone();
                    }
                    return Err(e);
                }
            }
        }
    }
}

/// `LoadingDialog` for every dialog mutation, then wait for it quietly.
async fn run_dialogs(
    dialogs: &mut mpsc::UnboundedReceiver<DialogAction>,
    editor: Arc<dyn ItemEditor>,
    output: ViewStateSender,
) -> CuratorResult<()> {
    let mut in_flight: FuturesUnordered<BoxFuture<'static, CuratorResult<()>>> =
        FuturesUnordered::new();

    loop {
        tokio::select! {
            action = dialogs.recv() => {
                let Some(action) = action else {
                    return Ok(());
                };
                output.emit(ViewState::LoadingDialog);
                in_flight.push(run_dialog(editor.clone(), action));
            }
            Some(result) = in_flight.next(), if !in_flight.is_empty() => result?,
        }
    }
}

fn run_dialog(
    editor: Arc<dyn ItemEditor>,
    action: DialogAction,
) -> BoxFuture<'static, CuratorResult<()>> {
    async move {
        match action {
            DialogAction::ChangeType(item) => {
                tracing::info!(item_id = %item.id, "Changing item type");
                editor
                    .change_item_type(&item)
                    .await
                    .map_err(|e| CuratorError::action("change_item_type", e))
            }
            DialogAction::Delete(item) => {
                tracing::info!(item_id = %item.id, "Deleting item");
                editor
                    .delete_item(&item)
                    .await
                    .map_err(|e| CuratorError::action("delete_item", e))
            }
        }
    }
    .boxed()
}

/// Turn the first failure reported by a side task into an error of the run.
async fn surface_failures(
    failures: &mut mpsc::UnboundedReceiver<CuratorError>,
) -> CuratorResult<()> {
    match failures.recv().await {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
