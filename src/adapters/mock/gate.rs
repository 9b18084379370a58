use tokio::sync::watch;

/// An open/closed switch that mocked calls wait on.
///
/// Gates start open. Closing one holds every call that reaches [`Gate::pass`]
/// until the gate is opened again.
#[derive(Debug)]
pub struct Gate {
    open: watch::Sender<bool>,
}

impl Gate {
    pub fn new() -> Self {
        let (open, _) = watch::channel(true);
        Self { open }
    }

    pub fn close(&self) {
        self.open.send_replace(false);
    }

    pub fn open(&self) {
        self.open.send_replace(true);
    }

    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    /// Wait until the gate is open.
    pub async fn pass(&self) {
        let mut rx = self.open.subscribe();
        // The sender lives in `self`, so this only errors if the gate is gone.
        let _ = rx.wait_for(|open| *open).await;
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}
