//! clear - Clear screen builtin

use crate::terminal::session::Session;

pub(crate) async fn handle_clear(session: &mut Session) {
    session.sink.clear().await;
}

// ============================================================================
// Tests
// ============================================================================
