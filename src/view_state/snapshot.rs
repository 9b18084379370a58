use crate::error::CuratorError;
use crate::models::{Item, ListEntity, Setup};

/// Confirmation messages shown outside the regular state flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoMessage {
    /// The list report was submitted
    Reported,
}

/// One rendering-ready state of the details screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// List header is known, items are not loaded yet
    Default { list: ListEntity, setup: Setup },
    /// Page 1 for `setup` is being fetched
    Loading { setup: Setup },
    /// A blocking item mutation is running
    LoadingDialog,
    /// Items of the current setup, renumbered from 1
    Detailed {
        list: ListEntity,
        setup: Setup,
        items: Vec<Item>,
        is_completed: bool,
    },
    Error { cause: CuratorError },
    Info(InfoMessage),
}

impl ViewState {
    /// Short name of the snapshot kind, for logs and the demo output.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewState::Default { .. } => "default",
            ViewState::Loading { .. } => "loading",
            ViewState::LoadingDialog => "loading_dialog",
            ViewState::Detailed { .. } => "detailed",
            ViewState::Error { .. } => "error",
            ViewState::Info(_) => "info",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error { .. })
    }

    pub fn items(&self) -> Option<&[Item]> {
        match self {
            ViewState::Detailed { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> Option<bool> {
        match self {
            ViewState::Detailed { is_completed, .. } => Some(*is_completed),
            _ => None,
        }
    }

    pub fn setup(&self) -> Option<&Setup> {
        match self {
            ViewState::Default { setup, .. }
            | ViewState::Loading { setup }
            | ViewState::Detailed { setup, .. } => Some(setup),
            _ => None,
        }
    }
}
