//! Tab Completion
//!
//! Completes the last space-separated token of the input against the
//! completable command names and the current directory listing, honoring
//! the entry filter the preceding command implies.

use crate::fs::{DirEntry, FileKind};

/// Command names offered for completion.
pub(crate) const COMPLETABLE_COMMANDS: &[&str] = &[
    "cat", "pwd", "cd", "whoami", "clear", "exit", "ps", "ls", "kill",
];

/// Entry filter implied by the command a fragment follows: path commands
/// complete directories, `cat` completes readable files.
fn kind_filter(command: &str) -> Option<FileKind> {
    match command {
        "cd" | "ls" => Some(FileKind::Directory),
        "cat" => Some(FileKind::File),
        _ => None,
    }
}

/// Complete the last token of `input` against the command names and
/// `entries`. A leading `./` on the token switches the entry filter to
/// executables and is restored on success. Returns the rewritten input
/// when exactly one candidate matches, `None` for anything else.
pub(crate) fn complete_input(input: &str, entries: &[DirEntry]) -> Option<String> {
    let tokens: Vec<&str> = input.split(' ').collect();
    let (&fragment, leading) = tokens.split_last()?;

    let mut filter = if leading.is_empty() {
        None
    } else {
        kind_filter(tokens[0])
    };
    let (stem, launcher) = match fragment.strip_prefix("./") {
        Some(rest) => (rest, true),
        None => (fragment, false),
    };
    if launcher {
        filter = Some(FileKind::Executable);
    }

    let mut matches: Vec<String> = Vec::new();
    for command in COMPLETABLE_COMMANDS {
        if command.starts_with(stem) {
            matches.push((*command).to_string());
        }
    }
    for entry in entries {
        let kept = filter.map_or(true, |kind| entry.kind == kind);
        if kept && entry.name.starts_with(stem) {
            matches.push(entry.name.clone());
        }
    }

    if matches.len() != 1 {
        return None;
    }
    let completed = if launcher {
        format!("./{}", matches[0])
    } else {
        matches.remove(0)
    };
    let mut rebuilt: Vec<&str> = leading.to_vec();
    rebuilt.push(&completed);
    Some(rebuilt.join(" "))
}

// ============================================================================
// Tests
// ============================================================================
