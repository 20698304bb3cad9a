//! Line-Output Sink
//!
//! The append-only record of rendered terminal lines, one entry per visual
//! row. Lines may carry ANSI markup; the sink never interprets content.
//! Display surfaces either snapshot `lines()` or follow a `watch()` feed.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;

/// What a display surface sees: appended lines and full clears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Line(String),
    Cleared,
}

/// Append-only line buffer with live watchers.
pub struct OutputSink {
    state: Mutex<SinkState>,
}

struct SinkState {
    lines: Vec<String>,
    watchers: Vec<UnboundedSender<SinkEvent>>,
}

impl OutputSink {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SinkState {
                lines: Vec::new(),
                watchers: Vec::new(),
            }),
        }
    }

    /// Append one rendered line.
    pub async fn write_line(&self, line: impl Into<String>) {
        let line = line.into();
        let mut state = self.state.lock().await;
        state
            .watchers
            .retain(|w| w.send(SinkEvent::Line(line.clone())).is_ok());
        state.lines.push(line);
    }

    /// Teletype write: split `content` on newlines and append one line per
    /// tick, sleeping `interval` before each. Each call owns its own
    /// counter and keeps strict order among its own lines; concurrent
    /// calls interleave with no mutual exclusion, so callers wanting
    /// atomic output await one call at a time.
    pub async fn slow_write(&self, content: &str, interval: Duration) {
        for line in content.split('\n') {
            tokio::time::sleep(interval).await;
            self.write_line(line).await;
        }
    }

    /// Drop every line. Watchers are told so surfaces can reset.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.lines.clear();
        state.watchers.retain(|w| w.send(SinkEvent::Cleared).is_ok());
    }

    /// Snapshot of the buffer.
    pub async fn lines(&self) -> Vec<String> {
        self.state.lock().await.lines.clone()
    }

    /// Follow the sink live. Events are fire-and-forget; a watcher that
    /// went away is dropped on the next emission.
    pub async fn watch(&self) -> UnboundedReceiver<SinkEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().await.watchers.push(tx);
        rx
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
