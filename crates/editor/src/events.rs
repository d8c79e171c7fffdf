//! Event Bus - change notifications for the presentation layer
//!
//! The editor publishes after every accepted or rejected command so a
//! renderer, breadcrumb or undo log can re-read state without polling.

use crate::command::Command;
use crate::input::{InputRequest, InputTicket};
use dom::NodeId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Editor events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorEvent {
    CursorChanged { node: Option<NodeId> },
    TreeChanged { command: Command },
    InputRequested(InputRequest),
    InputResolved { ticket: InputTicket, cancelled: bool },
    CommandRejected { command: Command, message: String },
}

/// Simple event bus using tokio broadcast channel
pub struct EventBus {
    tx: broadcast::Sender<EditorEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event
    pub fn publish(&self, event: EditorEvent) {
        let _ = self.tx.send(event); // Ignore error if no subscribers
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
