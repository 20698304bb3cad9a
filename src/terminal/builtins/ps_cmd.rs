//! ps - Process status builtin

use crate::terminal::session::Session;

const TTY: &str = "pts/0";
const TIME: &str = "00:00:00";

pub(crate) async fn handle_ps(session: &mut Session) {
    session
        .sink
        .write_line(format!("{:>7} {:<8} {:>8} {}", "PID", "TTY", "TIME", "CMD"))
        .await;
    for record in session.registry.processes().await {
        session
            .sink
            .write_line(format!(
                "{:>7} {:<8} {:>8} {}",
                record.pid, TTY, TIME, record.name
            ))
            .await;
    }
}

// ============================================================================
// Tests
// ============================================================================
