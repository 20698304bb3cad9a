//! cat - Print file contents builtin

use crate::terminal::session::Session;

pub(crate) async fn handle_cat(session: &mut Session, args: &[String]) {
    match session.fs.read_file(args.first().map(String::as_str)).await {
        Ok(content) => {
            let interval = session.config.teletype_interval;
            session.sink.slow_write(&content, interval).await;
        }
        Err(err) => session.sink.write_line(err.to_string()).await,
    }
}

// ============================================================================
// Tests
// ============================================================================
