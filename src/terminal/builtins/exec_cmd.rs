//! ./name - Application launcher
//!
//! Not a named builtin: any command starting with `./` lands here and is
//! matched against the configured launchable windows.

use crate::bus::AppEvent;
use crate::terminal::session::Session;

pub(crate) async fn handle_exec(session: &mut Session, command: &str) {
    let name = command.strip_prefix("./").unwrap_or(command);
    if session.config.launchables.iter().any(|app| app == name) {
        session
            .scheduler
            .enqueue(
                AppEvent::LaunchApp {
                    id: name.to_string(),
                },
                session.config.notify_delay,
            )
            .await;
    } else {
        session
            .sink
            .write_line(format!("-terminal: ./{name}: No such file or directory"))
            .await;
    }
}

// ============================================================================
// Tests
// ============================================================================
