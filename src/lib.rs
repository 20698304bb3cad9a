//! deskterm - A simulated desktop terminal environment
//!
//! This library provides the working core of a desktop-style portfolio
//! shell: an in-memory file system, a terminal command interpreter, a
//! process registry for open windows, and a notification bus that tells
//! the surrounding chrome when to open and close them.

pub mod bus;
pub mod desktop;
pub mod fs;
pub mod output;
pub mod process;
pub mod terminal;

mod util;

pub use bus::{AppEvent, EventBus, MessageId, Scheduler};
pub use desktop::{Desktop, DesktopOptions};
pub use fs::{portfolio_seed, DirEntry, FileKind, FileSystem, FsError, Seed, SeedError, SeedNode};
pub use output::{OutputSink, SinkEvent};
pub use process::{ProcessRecord, ProcessRegistry};
pub use terminal::{History, Session, SessionConfig, SessionState};
