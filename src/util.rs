//! Shared helpers: date stamps rendered the way the terminal shows them.

use chrono::{DateTime, Utc};

/// Short stamp used by `ls -l`, e.g. `Aug 25 14:03`.
pub(crate) fn short_date(now: DateTime<Utc>) -> String {
    now.format("%b %d %H:%M").to_string()
}

/// Long stamp used by the message of the day, e.g.
/// `Tue Aug 25 14:03:05 UTC 2026`.
pub(crate) fn long_date(now: DateTime<Utc>) -> String {
    now.format("%a %b %d %H:%M:%S UTC %Y").to_string()
}
