//! Desktop
//!
//! The root object embedders hold: one shared file system, one process
//! registry, one notification bus and its scheduler. Terminal sessions
//! are opened from here and share all four.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::bus::{AppEvent, EventBus, Scheduler};
use crate::fs::{portfolio_seed, FileSystem, Seed, SeedError};
use crate::process::ProcessRegistry;
use crate::terminal::{Session, SessionConfig};

/// Knobs for building a [`Desktop`].
#[derive(Default)]
pub struct DesktopOptions {
    /// File system seed; the built-in portfolio tree when `None`.
    pub seed: Option<Seed>,
}

/// Shared state behind every window of one desktop.
pub struct Desktop {
    fs: Arc<FileSystem>,
    registry: Arc<ProcessRegistry>,
    bus: EventBus,
    scheduler: Arc<Scheduler>,
}

impl Desktop {
    pub fn new(options: DesktopOptions) -> Result<Self, SeedError> {
        let seed = options.seed.unwrap_or_else(portfolio_seed);
        let fs = Arc::new(FileSystem::from_seed(&seed)?);
        let registry = Arc::new(ProcessRegistry::new());
        let bus = EventBus::new();
        let scheduler = Arc::new(Scheduler::new(bus.clone()));
        Ok(Self {
            fs,
            registry,
            bus,
            scheduler,
        })
    }

    /// Run the notification scheduler on the current runtime. Without a
    /// running driver, enqueued notifications never deliver.
    pub fn spawn_scheduler(&self) -> JoinHandle<()> {
        let scheduler = self.scheduler.clone();
        tokio::spawn(async move { scheduler.run().await })
    }

    /// Listen for desktop notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.bus.subscribe()
    }

    /// Open a terminal window wired to the shared desktop state. The
    /// session comes back hidden; `show` it to register a pid and play
    /// the banner.
    pub fn open_terminal(&self, id: impl Into<String>, config: SessionConfig) -> Session {
        Session::new(
            id,
            "terminal",
            self.fs.clone(),
            self.registry.clone(),
            self.scheduler.clone(),
            config,
        )
    }

    pub fn file_system(&self) -> Arc<FileSystem> {
        self.fs.clone()
    }

    pub fn registry(&self) -> Arc<ProcessRegistry> {
        self.registry.clone()
    }

    pub fn scheduler(&self) -> Arc<Scheduler> {
        self.scheduler.clone()
    }

    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
