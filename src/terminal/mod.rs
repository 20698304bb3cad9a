//! Terminal Module
//!
//! The interactive shell that fronts the desktop: session lifecycle,
//! line editing with history and tab completion, and the builtin
//! command set.

pub mod history;
pub mod session;
pub mod types;

pub(crate) mod builtins;
pub(crate) mod complete;

pub use history::History;
pub use session::Session;
pub use types::{SessionConfig, SessionState, EXIT_DELAY, NOTIFY_DELAY};
