//! Notification surface: the app event bus and the deferred scheduler
//! that feeds it.

pub mod event_bus;
pub mod scheduler;

pub use event_bus::{AppEvent, EventBus};
pub use scheduler::{MessageId, Scheduler};
