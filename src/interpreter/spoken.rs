//! Formatting of times, dates and counts for reading aloud

use chrono::NaiveDateTime;

/// Clock time as read aloud, e.g. `3:45 PM`
#[must_use]
pub fn time(now: NaiveDateTime) -> String {
    now.format("%-I:%M %p").to_string()
}

/// Full date as read aloud, e.g. `Sunday, October 18, 2026`
#[must_use]
pub fn date(now: NaiveDateTime) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// `1 note`, `2 notes`
pub(crate) fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}
