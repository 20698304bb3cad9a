//! kill - Close window by pid builtin

use crate::bus::AppEvent;
use crate::terminal::session::Session;

const USAGE: &str = "kill: usage: kill <pid>";

pub(crate) async fn handle_kill(session: &mut Session, args: &[String]) {
    let pid = match args {
        [] => {
            session.sink.write_line(USAGE).await;
            return;
        }
        [single] => match single.parse::<u32>() {
            Ok(pid) => pid,
            Err(_) => {
                session.sink.write_line(USAGE).await;
                return;
            }
        },
        _ => {
            session.sink.write_line("kill: Too many arguments!").await;
            return;
        }
    };

    if pid == session.pid {
        session.begin_exit().await;
        return;
    }

    let matches = session.registry.find(pid).await;
    if matches.is_empty() {
        session
            .sink
            .write_line(format!("kill: ({pid}) - No such process"))
            .await;
        return;
    }
    // The doomed window unregisters itself when it handles the close, so
    // the registry is left alone here.
    for record in matches {
        session
            .scheduler
            .enqueue(AppEvent::CloseApp { process: record }, session.config.notify_delay)
            .await;
    }
}

// ============================================================================
// Tests
// ============================================================================
