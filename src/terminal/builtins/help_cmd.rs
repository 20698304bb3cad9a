//! help - Command reference builtin

use crate::terminal::session::Session;

/// Usage string and blurb for each row of the help table, in display order.
const HELP_ROWS: &[(&str, &str)] = &[
    ("cat <file>", "Dump the contents of a file to the screen"),
    ("cd <path>", "Change the directory to the specified path"),
    ("clear", "Clear the screen buffer"),
    ("exit", "End terminal session"),
    ("help <command>", "Get help for the specified command"),
    ("kill <pid>", "Terminate the specified process"),
    ("ls [path]", "List the contents of a specified path"),
    ("ps", "List running processes"),
    ("whoami", "Print the current user"),
];

pub(crate) async fn handle_help(session: &mut Session, args: &[String]) {
    match args.len() {
        0 => {
            for (usage, blurb) in HELP_ROWS {
                session
                    .sink
                    .write_line(format!("{usage:<16} {blurb}"))
                    .await;
            }
        }
        1 => {
            // TODO: fill in per-command help texts; until then a named
            // lookup yields a single blank line.
            session.sink.write_line(help_for(&args[0])).await;
        }
        _ => {
            session.sink.write_line("help: Too many arguments").await;
        }
    }
}

/// Detailed help for one command.
fn help_for(_command: &str) -> String {
    String::new()
}

// ============================================================================
// Tests
// ============================================================================
