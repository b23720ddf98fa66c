//! Remote denylist matching.
//!
//! The app's remote config can name individual records to suppress. A rule
//! matches on exact title and a fuzzy date: either the trimmed strings are
//! identical or both dates resolve to the same calendar day.

use crate::date::{parse_date, same_calendar_day};
use crate::types::{Record, RemovalEntry};

/// Returns `true` when `record` is matched by any entry in `deny_list`.
///
/// Title comparison is exact after trimming whitespace (case-sensitive).
/// Only when the title matches is the date consulted; it matches on trimmed
/// string equality or, failing that, on calendar-day equality of the parsed
/// timestamps. An empty `deny_list` never matches.
#[must_use]
pub fn should_remove(record: &Record, deny_list: &[RemovalEntry]) -> bool {
    deny_list.iter().any(|entry| matches_entry(record, entry))
}

fn matches_entry(record: &Record, entry: &RemovalEntry) -> bool {
    if record.title.trim() != entry.title.trim() {
        return false;
    }

    let record_date = record.date.trim();
    let entry_date = entry.date.trim();
    if record_date == entry_date {
        return true;
    }

    same_calendar_day(parse_date(record_date), parse_date(entry_date))
}
