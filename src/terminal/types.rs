//! Terminal Session Types

use std::time::Duration;

/// Delay between `exit` and the `WindowClosed` notification.
pub const EXIT_DELAY: Duration = Duration::from_millis(200);

/// Delay before `LaunchApp`/`CloseApp` notifications go out.
pub const NOTIFY_DELAY: Duration = Duration::from_millis(250);

/// Where a session is in its life.
///
/// Ordinary commands bounce between `Idle` and `Executing`; `exit` (or
/// killing your own pid) moves to `Exiting`, and tearing the window down
/// lands in `Closed`. There is no way back from `Exiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Executing,
    Exiting,
    Closed,
}

/// Per-session knobs. The defaults match the environment the terminal was
/// built for: no banner, instant teletype, the classic 200/250 ms delays,
/// and no launchable windows until the embedder names some.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Teletyped into the sink on every `show`. `None` skips the banner.
    pub banner: Option<String>,
    /// Sleep before each teletyped line.
    pub teletype_interval: Duration,
    /// How long after `exit` the `WindowClosed` notification fires.
    pub exit_delay: Duration,
    /// How long before `LaunchApp`/`CloseApp` notifications fire.
    pub notify_delay: Duration,
    /// Window ids `./<name>` may launch.
    pub launchables: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            banner: None,
            teletype_interval: Duration::ZERO,
            exit_delay: EXIT_DELAY,
            notify_delay: NOTIFY_DELAY,
            launchables: Vec::new(),
        }
    }
}
