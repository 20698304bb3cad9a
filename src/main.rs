use clap::Parser;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use deskterm::fs::motd;
use deskterm::output::SinkEvent;
use deskterm::process::{ProcessRecord, ProcessRegistry};
use deskterm::{AppEvent, Desktop, DesktopOptions, FileKind, Seed, SessionConfig, SessionState};

#[derive(Parser)]
#[command(name = "deskterm")]
#[command(about = "A desktop-style portfolio terminal")]
#[command(version)]
struct Cli {
    /// Run these commands and print the resulting screen instead of
    /// starting an interactive session
    #[arg(short = 'c')]
    commands: Vec<String>,

    /// JSON file holding the file system seed
    #[arg(long = "seed")]
    seed: Option<String>,

    /// Milliseconds between teletyped lines
    #[arg(long = "teletype-ms", default_value_t = 12)]
    teletype_ms: u64,

    /// Skip the startup banner
    #[arg(long = "no-banner")]
    no_banner: bool,

    /// With -c, print the final screen as JSON
    #[arg(long = "json")]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let seed = match cli.seed {
        Some(ref path) => match load_seed(path) {
            Ok(seed) => Some(seed),
            Err(e) => {
                eprintln!("Error: Cannot load seed file: {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let desktop = match Desktop::new(DesktopOptions { seed }) {
        Ok(desktop) => desktop,
        Err(e) => {
            eprintln!("Error: Invalid seed: {}", e);
            std::process::exit(1);
        }
    };

    let launchables = installed_apps(&desktop).await;

    if cli.commands.is_empty() {
        run_repl(desktop, &cli, launchables).await;
    } else {
        run_batch(&desktop, &cli, launchables).await;
    }
}

fn load_seed(path: &str) -> Result<Seed, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Root-level executables are the apps `./name` can launch.
async fn installed_apps(desktop: &Desktop) -> Vec<String> {
    match desktop.file_system().list("/").await {
        Ok(entries) => entries
            .into_iter()
            .filter(|entry| entry.kind == FileKind::Executable)
            .map(|entry| entry.name)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Run the given command lines against a fresh session and dump the
/// final screen, as plain lines or as JSON.
async fn run_batch(desktop: &Desktop, cli: &Cli, launchables: Vec<String>) {
    let config = SessionConfig {
        banner: (!cli.no_banner).then(motd),
        teletype_interval: Duration::ZERO,
        launchables,
        ..SessionConfig::default()
    };
    let mut session = desktop.open_terminal("terminal", config);
    session.show().await;
    for line in &cli.commands {
        session.submit_line(line).await;
    }

    let lines = session.sink().lines().await;
    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "lines": lines,
                "exited": session.state() == SessionState::Exiting,
            })
        );
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
}

async fn run_repl(desktop: Desktop, cli: &Cli, launchables: Vec<String>) {
    desktop.spawn_scheduler();
    let mut events = desktop.subscribe();

    let config = SessionConfig {
        banner: (!cli.no_banner).then(motd),
        teletype_interval: Duration::from_millis(cli.teletype_ms),
        launchables,
        ..SessionConfig::default()
    };
    let mut session = desktop.open_terminal("terminal", config);

    // Mirror the session's buffer onto stdout as it grows.
    let mut screen = session.sink().watch().await;
    let render = tokio::spawn(async move {
        while let Some(event) = screen.recv().await {
            match event {
                SinkEvent::Line(line) => println!("{}", line),
                SinkEvent::Cleared => print!("\x1b[2J\x1b[H"),
            }
        }
    });

    session.show().await;

    // Blocking stdin reader on its own thread, bridged into the runtime.
    let (tx, mut stdin_lines) = tokio::sync::mpsc::channel::<String>(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    let chrome = WindowChrome {
        registry: desktop.registry(),
    };

    loop {
        tokio::select! {
            line = stdin_lines.recv() => {
                let Some(line) = line else { break };
                session.submit_line(&line).await;
            }
            event = events.recv() => {
                match event {
                    Ok(AppEvent::LaunchApp { id }) => chrome.launch(&id).await,
                    Ok(AppEvent::CloseApp { process }) => chrome.close(&process).await,
                    Ok(AppEvent::WindowClosed { id }) => {
                        if id == session.id() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    }

    session.hide().await;
    render.abort();
}

/// Stands in for the desktop chrome: opens and closes the app windows
/// the notifications name. Launched apps only exist as registry rows.
struct WindowChrome {
    registry: Arc<ProcessRegistry>,
}

impl WindowChrome {
    async fn launch(&self, id: &str) {
        if !self.registry.find_by_id(id).await.is_empty() {
            return; // already open
        }
        let pid = self.registry.allocate_pid().await;
        self.registry
            .register(ProcessRecord {
                id: id.to_string(),
                pid,
                name: id.to_string(),
            })
            .await;
        self.registry.raise().await;
        println!("[desktop] {} opened (pid {})", id, pid);
    }

    async fn close(&self, process: &ProcessRecord) {
        if self.registry.unregister(process.pid).await > 0 {
            println!("[desktop] {} closed (pid {})", process.name, process.pid);
        }
    }
}
