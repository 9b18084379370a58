//! Mock item editor for testing.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{lock, Gate};
use crate::error::RemoteError;
use crate::models::Item;
use crate::traits::ItemEditor;

/// A recorded editor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCall {
    ChangeType(String),
    Delete(String),
}

/// Mock item editor.
#[derive(Debug, Default)]
pub struct MockItemEditor {
    calls: Mutex<Vec<EditorCall>>,
    /// Whether every call should fail
    should_fail: Mutex<bool>,
    gate: Gate,
}

impl MockItemEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *lock(&self.should_fail) = should_fail;
    }

    /// Gate every call waits on before completing.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn calls(&self) -> Vec<EditorCall> {
        lock(&self.calls).clone()
    }

    async fn complete(&self, call: EditorCall) -> Result<(), RemoteError> {
        lock(&self.calls).push(call);
        self.gate.pass().await;
        if *lock(&self.should_fail) {
            return Err(RemoteError::ConnectionFailed {
                message: "Mock editor failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ItemEditor for MockItemEditor {
    async fn change_item_type(&self, item: &Item) -> Result<(), RemoteError> {
        self.complete(EditorCall::ChangeType(item.id.clone())).await
    }

    async fn delete_item(&self, item: &Item) -> Result<(), RemoteError> {
        self.complete(EditorCall::Delete(item.id.clone())).await
    }
}
