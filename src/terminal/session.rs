//! Terminal Session
//!
//! The interpreter behind one terminal window: input line editing, command
//! history, dispatch over the fixed builtin table, and the lifecycle from
//! `show` through `Closed`. A session owns its output sink; the file
//! system, process registry and scheduler are desktop-wide and shared.

use std::sync::Arc;

use crate::bus::{AppEvent, MessageId, Scheduler};
use crate::fs::FileSystem;
use crate::output::OutputSink;
use crate::process::{ProcessRecord, ProcessRegistry};

use super::builtins;
use super::complete::complete_input;
use super::history::History;
use super::types::{SessionConfig, SessionState};

/// One terminal window's interpreter state machine.
pub struct Session {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) pid: u32,
    pub(crate) state: SessionState,
    pub(crate) input: String,
    pub(crate) history: History,
    pub(crate) fs: Arc<FileSystem>,
    pub(crate) registry: Arc<ProcessRegistry>,
    pub(crate) sink: Arc<OutputSink>,
    pub(crate) scheduler: Arc<Scheduler>,
    pub(crate) config: SessionConfig,
    pending: Vec<MessageId>,
}

impl Session {
    /// A session starts hidden and unregistered; call
    /// [`show`](Self::show) before feeding it input.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        fs: Arc<FileSystem>,
        registry: Arc<ProcessRegistry>,
        scheduler: Arc<Scheduler>,
        config: SessionConfig,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pid: 0,
            state: SessionState::Closed,
            input: String::new(),
            history: History::new(),
            fs,
            registry,
            sink: Arc::new(OutputSink::new()),
            scheduler,
            config,
            pending: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Bring the window up: allocate a pid, register it, raise the window
    /// stack and teletype the banner into a fresh buffer. A re-shown
    /// session gets a fresh pid.
    pub async fn show(&mut self) {
        self.pid = self.registry.allocate_pid().await;
        self.registry
            .register(ProcessRecord {
                id: self.id.clone(),
                pid: self.pid,
                name: self.name.clone(),
            })
            .await;
        self.registry.raise().await;
        self.state = SessionState::Idle;
        self.reset().await;
    }

    /// Blank the buffer and the input, then replay the banner if one is
    /// configured.
    pub async fn reset(&mut self) {
        self.sink.clear().await;
        self.input.clear();
        self.history.reset();
        if let Some(banner) = self.config.banner.clone() {
            self.sink
                .slow_write(&banner, self.config.teletype_interval)
                .await;
        }
    }

    /// Tear the window down: cancel this session's still-pending
    /// notifications, drop its pid from the registry and blank the
    /// buffer. Safe to call in any state.
    pub async fn hide(&mut self) {
        for message in self.pending.drain(..) {
            self.scheduler.cancel(message).await;
        }
        self.registry.unregister(self.pid).await;
        self.sink.clear().await;
        self.state = SessionState::Closed;
    }

    // ------------------------------------------------------------------
    // Input editing
    // ------------------------------------------------------------------

    /// Replace the input line. Every edit that is not an arrow key ends a
    /// history browse, so the cursor resets here.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.history.reset();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Arrow up: recall the previous history entry into the input.
    pub fn history_previous(&mut self) {
        if let Some(entry) = self.history.previous() {
            self.input = entry.to_string();
        }
    }

    /// Arrow down: walk back toward the newest history entry.
    pub fn history_next(&mut self) {
        if let Some(entry) = self.history.next() {
            self.input = entry.to_string();
        }
    }

    /// Tab: complete the last input token against the builtin names and
    /// the current directory listing.
    pub async fn complete(&mut self) {
        self.history.reset();
        let entries = match self.fs.list(".").await {
            Ok(entries) => entries,
            Err(_) => return,
        };
        if let Some(rewritten) = complete_input(&self.input, &entries) {
            self.input = rewritten;
        }
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Enter: run the current input as one command. Ignored unless the
    /// session is idle. The raw line lands in history (empty lines
    /// included) and is echoed as `$ <line>`; the command then runs to
    /// completion before control returns. Afterwards the input is cleared
    /// unless the command started the exit sequence.
    pub async fn submit(&mut self) {
        if self.state != SessionState::Idle {
            return;
        }
        let line = self.input.clone();
        self.history.push(line.clone());
        self.execute(&line).await;
        if self.state != SessionState::Exiting {
            self.input.clear();
        }
    }

    /// Type a line and submit it in one go.
    pub async fn submit_line(&mut self, line: &str) {
        self.set_input(line);
        self.submit().await;
    }

    async fn execute(&mut self, line: &str) {
        self.sink.write_line(format!("$ {line}")).await;

        let mut parts = line.split(' ');
        let command = parts.next().unwrap_or_default();
        let args: Vec<String> = parts.map(str::to_string).collect();
        if command.is_empty() {
            return;
        }

        self.state = SessionState::Executing;
        self.dispatch(command, &args).await;
        if self.state == SessionState::Executing {
            self.state = SessionState::Idle;
        }
    }

    /// Case-sensitive exact match over the fixed builtin table. A leading
    /// `./` routes to the launcher; everything else is unknown.
    async fn dispatch(&mut self, command: &str, args: &[String]) {
        match command {
            "help" => builtins::handle_help(self, args).await,
            "cat" => builtins::handle_cat(self, args).await,
            "pwd" => builtins::handle_pwd(self).await,
            "cd" => builtins::handle_cd(self, args).await,
            "whoami" => builtins::handle_whoami(self).await,
            "clear" => builtins::handle_clear(self).await,
            "exit" => builtins::handle_exit(self).await,
            "ps" => builtins::handle_ps(self).await,
            "ls" => builtins::handle_ls(self, args).await,
            "kill" => builtins::handle_kill(self, args).await,
            _ if command.starts_with("./") => builtins::handle_exec(self, command).await,
            _ => {
                self.sink
                    .write_line(format!("{command}: command not found"))
                    .await;
            }
        }
    }

    /// Start the exit sequence: the pid leaves the registry immediately,
    /// the input shows `exiting...`, and the `WindowClosed` notification
    /// is scheduled. The message id is remembered so `hide` can cancel a
    /// delivery that has not happened yet.
    pub(crate) async fn begin_exit(&mut self) {
        self.registry.unregister(self.pid).await;
        self.input = "exiting...".to_string();
        self.state = SessionState::Exiting;
        let message = self
            .scheduler
            .enqueue(
                AppEvent::WindowClosed {
                    id: self.id.clone(),
                },
                self.config.exit_delay,
            )
            .await;
        self.pending.push(message);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pid of the current showing; 0 before the first `show`.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Shared handle to this session's output buffer.
    pub fn sink(&self) -> Arc<OutputSink> {
        self.sink.clone()
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

// ============================================================================
// Tests
// ============================================================================
