use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use super::ViewState;

/// Create the output channel of a controller.
pub fn channel() -> (ViewStateSender, ViewStateReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ViewStateSender { tx }, ViewStateReceiver { rx })
}

/// Producer side, cloned into every task that emits snapshots.
#[derive(Debug, Clone)]
pub struct ViewStateSender {
    tx: mpsc::UnboundedSender<ViewState>,
}

impl ViewStateSender {
    /// Emit a snapshot. Returns `false` once the renderer is gone.
    pub fn emit(&self, state: ViewState) -> bool {
        tracing::debug!(kind = state.kind(), "Emitting view state");
        self.tx.send(state).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side, held by the renderer.
///
/// Snapshots arrive in emission order. The stream ends once the controller
/// and all of its tasks are gone.
#[derive(Debug)]
pub struct ViewStateReceiver {
    rx: mpsc::UnboundedReceiver<ViewState>,
}

impl ViewStateReceiver {
    pub async fn recv(&mut self) -> Option<ViewState> {
        self.rx.recv().await
    }

    /// Take a snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<ViewState> {
        self.rx.try_recv().ok()
    }

    /// Drain everything buffered and return the most recent snapshot.
    pub fn latest(&mut self) -> Option<ViewState> {
        let mut latest = None;
        while let Ok(state) = self.rx.try_recv() {
            latest = Some(state);
        }
        latest
    }
}

impl Stream for ViewStateReceiver {
    type Item = ViewState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<ViewState>> {
        self.rx.poll_recv(cx)
    }
}
