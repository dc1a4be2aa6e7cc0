//! Shutdown coordination.

use tokio::sync::broadcast;

/// Fan-out shutdown notice for the server and any test harness driving it.
///
/// Each long-running task holds its own receiver; one `trigger` reaches all
/// of them.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify every current subscriber. Subscribers created afterwards are
    /// not notified.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
