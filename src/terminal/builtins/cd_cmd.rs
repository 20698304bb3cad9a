//! cd - Change directory builtin

use crate::terminal::session::Session;

pub(crate) async fn handle_cd(session: &mut Session, args: &[String]) {
    let path = args.first().map(String::as_str).unwrap_or(".");
    if let Err(err) = session.fs.change_dir(path).await {
        session.sink.write_line(err.to_string()).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
