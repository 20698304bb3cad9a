//! Event Bus
//!
//! Fire-and-forget notifications crossing the window boundary. The crate
//! never renders windows itself; chrome subscribes here and reacts.

use tokio::sync::broadcast;

use crate::process::ProcessRecord;

const BUS_CAPACITY: usize = 64;

/// The closed set of notifications window chrome consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// `./<name>` invoked a launchable window.
    LaunchApp { id: String },
    /// A foreign process was killed; carries the whole record so chrome
    /// can tear the right window down.
    CloseApp { process: ProcessRecord },
    /// A session finished its exit sequence.
    WindowClosed { id: String },
}

/// Broadcast fan-out for [`AppEvent`]s. Cloning shares the channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Start listening. Only events emitted after the call are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Emit without acknowledgement. Nobody listening is not an error.
    pub fn emit(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
