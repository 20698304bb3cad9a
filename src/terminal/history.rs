//! Command History
//!
//! Append-only log of submitted input lines with an explicit browse
//! cursor. `None` means "not browsing"; walking up moves toward older
//! entries clamped at the oldest, walking down clamps at the newest and
//! never wraps back to an empty prompt.

/// History log plus browse cursor.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line. Submission ends any browse in progress,
    /// so this also resets the cursor.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    /// Stop browsing. Called for any input edit besides the arrow keys.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Walk toward older entries. Entering the browse starts at the
    /// newest entry; the oldest entry repeats once reached. `None` when
    /// the log is empty.
    pub fn previous(&mut self) -> Option<&str> {
        let index = match self.cursor {
            None => self.entries.len().checked_sub(1)?,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(index);
        Some(&self.entries[index])
    }

    /// Walk toward newer entries. Only meaningful while browsing; the
    /// newest entry repeats instead of wrapping to an empty prompt.
    pub fn next(&mut self) -> Option<&str> {
        let i = self.cursor?;
        let index = if i + 1 < self.entries.len() { i + 1 } else { i };
        self.cursor = Some(index);
        Some(&self.entries[index])
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
