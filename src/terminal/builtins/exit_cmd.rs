//! exit - Close terminal builtin

use crate::terminal::session::Session;

pub(crate) async fn handle_exit(session: &mut Session) {
    session.begin_exit().await;
}

// ============================================================================
// Tests
// ============================================================================
