//! ls - List directory builtin
//!
//! The short form packs names into rows of six fixed-width columns; the
//! long form fakes a classic `ls -l` with one owner and a fresh
//! timestamp. Directory and executable names carry ANSI colors either
//! way.

use chrono::Utc;

use crate::fs::{DirEntry, FileKind};
use crate::terminal::session::Session;
use crate::util::short_date;

const DIR_COLOR: &str = "\x1b[1;34m";
const EXEC_COLOR: &str = "\x1b[1;32m";
const COLOR_RESET: &str = "\x1b[0m";

const GRID_COLUMNS: usize = 6;

pub(crate) async fn handle_ls(session: &mut Session, args: &[String]) {
    let mut long_format = false;
    let mut path = args.first().map(String::as_str).unwrap_or(".");
    if let Some(first) = args.first() {
        // A leading dash is a flag bundle; only `l` means anything.
        if first.starts_with('-') && first.contains('l') {
            long_format = true;
            path = if args.len() == 2 { &args[1] } else { "." };
        }
    }

    let mut entries = match session.fs.list(path).await {
        Ok(entries) => entries,
        Err(err) => {
            session.sink.write_line(err.to_string()).await;
            return;
        }
    };
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let lines = if long_format {
        render_long(&entries, Utc::now())
    } else {
        render_grid(&entries)
    };
    for line in lines {
        session.sink.write_line(line).await;
    }
}

/// Color a name by its kind; plain files stay plain.
fn paint(entry: &DirEntry) -> String {
    match entry.kind {
        FileKind::Directory => format!("{DIR_COLOR}{}{COLOR_RESET}", entry.name),
        FileKind::Executable => format!("{EXEC_COLOR}{}{COLOR_RESET}", entry.name),
        FileKind::File => entry.name.clone(),
    }
}

/// Row-major grid, six names per row, columns sized to the longest name.
fn render_grid(entries: &[DirEntry]) -> Vec<String> {
    let width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0)
        + 2;

    entries
        .chunks(GRID_COLUMNS)
        .map(|row| {
            let mut line = String::new();
            for entry in row {
                let padding = width - entry.name.len();
                line.push_str(&paint(entry));
                line.push_str(&" ".repeat(padding));
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// `total N` plus one fixed-shape row per entry.
fn render_long(entries: &[DirEntry], now: chrono::DateTime<Utc>) -> Vec<String> {
    let stamp = short_date(now);
    let mut lines = vec![format!("total {}", entries.len())];
    for entry in entries {
        let (mode, links) = match entry.kind {
            FileKind::Directory => ("drwxr-xr-x", 2),
            FileKind::Executable => ("-rwxr-xr-x", 1),
            FileKind::File => ("-rw-r--r--", 1),
        };
        lines.push(format!(
            "{mode} {links} Guest Guest {:>6} {stamp} {}",
            entry.size,
            paint(entry)
        ));
    }
    lines
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventBus, Scheduler};
    use crate::fs::{portfolio_seed, FileSystem, Seed, SeedNode};
    use crate::process::ProcessRegistry;
    use crate::terminal::types::SessionConfig;
    use chrono::TimeZone;
    use std::sync::Arc;

    async fn make_session_with(seed: &Seed) -> Session {
        let mut session = Session::new(
            "terminal",
            "terminal",
            Arc::new(FileSystem::from_seed(seed).unwrap()),
            Arc::new(ProcessRegistry::new()),
            Arc::new(Scheduler::new(EventBus::new())),
            SessionConfig::default(),
        );
        session.show().await;
        session
    }

    async fn make_session() -> Session {
        make_session_with(&portfolio_seed()).await
    }

    fn scrambled_seed() -> Seed {
        let mut children = Seed::new();
        children.insert("zulu".to_string(), SeedNode::file("z"));
        children.insert("alpha".to_string(), SeedNode::directory(Seed::new()));
        children.insert("mike".to_string(), SeedNode::file("m"));
        let mut seed = Seed::new();
        seed.insert("/".to_string(), SeedNode::directory(children));
        seed
    }

    #[tokio::test]
    async fn test_ls_sorts_names_before_rendering() {
        let mut session = make_session_with(&scrambled_seed()).await;
        session.submit_line("ls").await;

        let lines = session.sink.lines().await;
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "\x1b[1;34malpha\x1b[0m  mike   zulu"
        );
    }

    #[tokio::test]
    async fn test_ls_grid_wraps_after_six_names() {
        let mut children = Seed::new();
        for name in ["a", "b", "c", "d", "e", "f", "g"] {
            children.insert(name.to_string(), SeedNode::file("x"));
        }
        let mut seed = Seed::new();
        seed.insert("/".to_string(), SeedNode::directory(children));

        let mut session = make_session_with(&seed).await;
        session.submit_line("ls").await;

        let lines = session.sink.lines().await;
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "a  b  c  d  e  f");
        assert_eq!(lines[2], "g");
    }

    #[tokio::test]
    async fn test_ls_of_a_subdirectory_path() {
        let mut session = make_session().await;
        session.submit_line("ls documents").await;
        let lines = session.sink.lines().await;
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("aboutme"));
        assert!(lines[1].contains("jobhistory"));
    }

    #[tokio::test]
    async fn test_ls_of_a_file_is_an_error() {
        let mut session = make_session().await;
        session.submit_line("ls motd").await;
        assert_eq!(
            session.sink.lines().await,
            ["$ ls motd", "Cannot list contents of a file"]
        );
    }

    #[tokio::test]
    async fn test_ls_long_format_shape() {
        let mut session = make_session().await;
        session.submit_line("ls -l").await;

        let lines = session.sink.lines().await;
        assert_eq!(lines[1], "total 4");
        let documents = lines
            .iter()
            .find(|line| line.contains("documents"))
            .unwrap();
        assert!(documents.starts_with("drwxr-xr-x 2 Guest Guest   4096 "));
        let player = lines
            .iter()
            .find(|line| line.contains("media-player"))
            .unwrap();
        assert!(player.starts_with("-rwxr-xr-x 1 Guest Guest  12288 "));
    }

    #[tokio::test]
    async fn test_ls_accepts_bundled_flags() {
        let mut session = make_session().await;
        session.submit_line("ls -al").await;
        assert_eq!(session.sink.lines().await[1], "total 4");
    }

    #[tokio::test]
    async fn test_ls_flag_with_a_path_argument() {
        let mut session = make_session().await;
        session.submit_line("ls -l documents").await;
        assert_eq!(session.sink.lines().await[1], "total 2");
    }

    #[tokio::test]
    async fn test_ls_flag_with_extra_arguments_lists_the_cwd() {
        let mut session = make_session().await;
        session.submit_line("ls -l documents junk").await;
        assert_eq!(session.sink.lines().await[1], "total 4");
    }

    #[tokio::test]
    async fn test_ls_unknown_flag_is_treated_as_a_path() {
        let mut session = make_session().await;
        session.submit_line("ls -a").await;
        assert_eq!(
            session.sink.lines().await,
            ["$ ls -a", "Path not found: -a"]
        );
    }

    #[test]
    fn test_render_long_fixed_stamp() {
        let entries = [DirEntry {
            name: "documents".to_string(),
            kind: FileKind::Directory,
            size: 4096,
        }];
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap();
        let lines = render_long(&entries, now);
        assert_eq!(
            lines[1],
            "drwxr-xr-x 2 Guest Guest   4096 Mar 05 09:07 \x1b[1;34mdocuments\x1b[0m"
        );
    }

    #[test]
    fn test_render_grid_empty_directory() {
        assert!(render_grid(&[]).is_empty());
    }
}
