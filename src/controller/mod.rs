//! The details screen controller.
//!
//! [`DetailsController::bind`] wires the collaborators together, starts the
//! background tasks and hands back the output receiver. From then on the
//! screen calls [`DetailsController::send`] with intents and renders whatever
//! comes out of the receiver.
//!
//! ```text
//!  send(intent) ─┬─► SetupState ──────────────┐
//!                ├─► load-more worker ──┐     ▼
//!                ├─► ReactionTracker ───┼─► ItemStore ─► sequencer ─► ViewStateReceiver
//!                ├─► dialog mutations ──┼─────────────────▲
//!                └─► Navigator          │
//!  SignalBus ────► signal task ─────────┘
//! ```
//!
//! All tasks belong to one [`TaskGroup`]; [`DetailsController::shutdown`]
//! (also run on drop) aborts them together.

mod intent;
mod sequencer;
mod workers;

pub use intent::DetailsIntent;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::config::{ControllerConfig, ExecutionContexts};
use crate::error::{CuratorError, CuratorResult};
use crate::models::{ItemMode, ListEntity, Setup};
use crate::pagination::PaginationDriver;
use crate::reactions::ReactionTracker;
use crate::signals::SignalBus;
use crate::state::SetupState;
use crate::tasks::TaskGroup;
use crate::traits::{FilterRequest, ItemEditor, ItemStore, ListProvider, Navigator, RemoteSource};
use crate::view_state::{self, InfoMessage, ViewState, ViewStateReceiver, ViewStateSender};

use sequencer::{DialogAction, Pipeline, Sequencer};
use workers::SignalTargets;

/// The external services a controller works against.
#[derive(Clone)]
pub struct Collaborators {
    pub remote: Arc<dyn RemoteSource>,
    pub store: Arc<dyn ItemStore>,
    pub lists: Arc<dyn ListProvider>,
    pub editor: Arc<dyn ItemEditor>,
    pub navigator: Arc<dyn Navigator>,
}

/// Controller of one details screen instance.
pub struct DetailsController {
    list_id: String,
    mode: ItemMode,
    setup: SetupState,
    list: Arc<watch::Sender<ListEntity>>,
    init: watch::Sender<bool>,
    load_more: mpsc::UnboundedSender<()>,
    reload_list: mpsc::UnboundedSender<()>,
    dialogs: mpsc::UnboundedSender<DialogAction>,
    failures: mpsc::UnboundedSender<CuratorError>,
    output: ViewStateSender,
    reactions: ReactionTracker,
    filter_engaged: Arc<AtomicBool>,
    lists: Arc<dyn ListProvider>,
    navigator: Arc<dyn Navigator>,
    contexts: ExecutionContexts,
    tasks: TaskGroup,
}

impl DetailsController {
    /// Start a controller for `list`.
    ///
    /// Subscribes to `bus` before returning, so signals published afterwards
    /// are never missed. Nothing is emitted until [`DetailsIntent::Init`].
    pub fn bind(
        list: ListEntity,
        collaborators: Collaborators,
        bus: &SignalBus,
        config: ControllerConfig,
    ) -> CuratorResult<(Self, ViewStateReceiver)> {
        config.validate()?;
        let contexts = config.resolve_contexts()?;

        let Collaborators {
            remote,
            store,
            lists,
            editor,
            navigator,
        } = collaborators;

        let list_id = list.id.clone();
        let mode = list.mode;
        let setup = SetupState::new(Setup::default());
        let tasks = TaskGroup::new();

        let (output, receiver) = view_state::channel();
        let (list_tx, list_rx) = watch::channel(list);
        let list_tx = Arc::new(list_tx);
        let (init_tx, init_rx) = watch::channel(false);
        let (gate_tx, gate_rx) = watch::channel(None);
        let (load_more_tx, load_more_rx) = mpsc::unbounded_channel();
        let (reload_list_tx, reload_list_rx) = mpsc::unbounded_channel();
        let (reload_items_tx, reload_items_rx) = mpsc::unbounded_channel();
        let (dialogs_tx, dialogs_rx) = mpsc::unbounded_channel();
        let (failures_tx, failures_rx) = mpsc::unbounded_channel();
        let filter_engaged = Arc::new(AtomicBool::new(false));

        let driver = PaginationDriver::new(
            remote.clone(),
            store.clone(),
            config.page_size,
            config.refresh_retry,
        );

        let sequencer = Sequencer {
            setup: setup.clone(),
            init: init_rx,
            pipeline: Pipeline {
                list_id: list_id.clone(),
                list: list_rx,
                refresh_gate: Arc::new(gate_tx),
                driver: driver.clone(),
                store: store.clone(),
                output: output.clone(),
            },
            editor,
            reload_items: reload_items_rx,
            dialogs: dialogs_rx,
            failures: failures_rx,
        };
        tasks.spawn(&contexts.pagination, "sequencer", sequencer.run());

        tasks.spawn(
            &contexts.pagination,
            "load_more",
            workers::load_more(
                load_more_rx,
                driver,
                list_id.clone(),
                setup.clone(),
                gate_rx,
                failures_tx.clone(),
            ),
        );

        tasks.spawn(
            &contexts.pagination,
            "reload_list",
            workers::reload_list(
                reload_list_rx,
                lists.clone(),
                list_id.clone(),
                mode,
                config.list_retry,
                list_tx.clone(),
                failures_tx.clone(),
            ),
        );

        tasks.spawn(
            &contexts.pagination,
            "signals",
            workers::signals(
                bus.subscribe(),
                SignalTargets {
                    setup: setup.clone(),
                    filter_engaged: filter_engaged.clone(),
                    reload_items: reload_items_tx,
                    navigator: navigator.clone(),
                },
            ),
        );

        let reactions = ReactionTracker::new(
            remote,
            store,
            failures_tx.clone(),
            contexts.reactions.clone(),
            tasks.clone(),
        );

        tracing::info!(list_id = %list_id, mode = %mode, page_size = config.page_size, "Details controller bound");

        let controller = Self {
            list_id,
            mode,
            setup,
            list: list_tx,
            init: init_tx,
            load_more: load_more_tx,
            reload_list: reload_list_tx,
            dialogs: dialogs_tx,
            failures: failures_tx,
            output,
            reactions,
            filter_engaged,
            lists,
            navigator,
            contexts,
            tasks,
        };
        Ok((controller, receiver))
    }

    /// Dispatch an intent. Never blocks; ignored after shutdown.
    pub fn send(&self, intent: DetailsIntent) {
        if self.tasks.is_shut_down() {
            tracing::debug!(intent = intent.name(), "Controller shut down, intent dropped");
            return;
        }
        tracing::debug!(list_id = %self.list_id, intent = intent.name(), "Intent received");

        match intent {
            DetailsIntent::Init => {
                self.init.send_replace(true);
            }
            DetailsIntent::ChangeDetailsOption(option) => {
                self.setup.change_option(option);
            }
            DetailsIntent::LoadMore => {
                let _ = self.load_more.send(());
            }
            DetailsIntent::ForceRefresh => {
                let _ = self.reload_list.send(());
            }
            DetailsIntent::ChangeItemType(item) => {
                let _ = self.dialogs.send(DialogAction::ChangeType(item));
            }
            DetailsIntent::DeleteItem(item) => {
                let _ = self.dialogs.send(DialogAction::Delete(item));
            }
            DetailsIntent::ToggleUpvote(item) => {
                self.reactions.toggle_upvote(&item);
            }
            DetailsIntent::ToggleReaction { item, alias } => {
                self.reactions.toggle_reaction(&item, &alias);
            }
            DetailsIntent::OpenFilter => self.open_filter(),
            DetailsIntent::ReportList { complaint } => self.report(complaint),
            DetailsIntent::EditList => {
                let list = self.list();
                self.navigator.edit_list(&list.id, list.mode);
            }
            DetailsIntent::Close => self.navigator.go_back(),
            DetailsIntent::ShareList => self.navigator.share(&self.list().share_text()),
            DetailsIntent::StartComment(item) => self.navigator.open_comments(&item),
            DetailsIntent::EditItem(item) => self.navigator.edit_item(&item),
        }
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn mode(&self) -> ItemMode {
        self.mode
    }

    /// Latest list entity.
    pub fn list(&self) -> ListEntity {
        self.list.borrow().clone()
    }

    /// Current setup.
    pub fn setup(&self) -> Setup {
        self.setup.current()
    }

    pub fn is_reaction_pending(&self, item_id: &str, alias: &str) -> bool {
        self.reactions.is_pending(item_id, alias)
    }

    pub fn pending_reactions(&self) -> usize {
        self.reactions.pending().len()
    }

    /// Background tasks still running.
    pub fn active_tasks(&self) -> usize {
        self.tasks.active()
    }

    pub fn is_shut_down(&self) -> bool {
        self.tasks.is_shut_down()
    }

    /// Abort every pipeline, worker, signal subscription and in-flight
    /// toggle. Idempotent.
    pub fn shutdown(&self) {
        if !self.tasks.is_shut_down() {
            tracing::info!(list_id = %self.list_id, "Details controller shutting down");
        }
        self.tasks.shutdown();
    }

    fn open_filter(&self) {
        if self
            .filter_engaged
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(list_id = %self.list_id, "Filter dialog already open");
            return;
        }
        let list = self.list();
        self.navigator.open_filter(FilterRequest {
            tags: list.filter_tags(),
            setup: self.setup.current(),
        });
    }

    fn report(&self, complaint: String) {
        let lists = self.lists.clone();
        let list = self.list();
        let output = self.output.clone();
        let failures = self.failures.clone();

        self.tasks
            .spawn(&self.contexts.pagination, "report_list", async move {
                match lists.report_list(&list, &complaint).await {
                    Ok(()) => {
                        tracing::info!(list_id = %list.id, "List reported");
                        output.emit(ViewState::Info(InfoMessage::Reported));
                    }
                    Err(e) => {
                        tracing::warn!(list_id = %list.id, error = %e, "Report failed");
                        let _ = failures.send(CuratorError::action("report_list", e));
                    }
                }
            });
    }
}

impl Drop for DetailsController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
