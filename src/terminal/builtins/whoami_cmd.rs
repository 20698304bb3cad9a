//! whoami - Print current user builtin

use crate::terminal::session::Session;

pub(crate) const USER_NAME: &str = "Guest";

pub(crate) async fn handle_whoami(session: &mut Session) {
    session.sink.write_line(USER_NAME).await;
}

// ============================================================================
// Tests
// ============================================================================
