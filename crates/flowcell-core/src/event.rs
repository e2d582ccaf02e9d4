/// Run lifecycle event broadcast to all subscribers.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// A run was dispatched; the node's output now shows the running
    /// sentinel.
    Started { node_id: String },
    /// The execution service responded and the node's output was updated.
    Finished { node_id: String, output: String },
    /// The service call failed in transport; the node's output carries the
    /// error text.
    Failed { node_id: String, message: String },
}

/// Event bus using tokio broadcast channel.
/// All subscribers receive all events.
pub struct EventBus {
    tx: tokio::sync::broadcast::Sender<RunEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = tokio::sync::broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: RunEvent) {
        // Ignore error if no receivers
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RunEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
