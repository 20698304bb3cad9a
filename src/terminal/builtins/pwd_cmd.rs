//! pwd - Print working directory builtin

use crate::terminal::session::Session;

pub(crate) async fn handle_pwd(session: &mut Session) {
    let path = session.fs.working_dir().await;
    session.sink.write_line(path).await;
}

// ============================================================================
// Tests
// ============================================================================
