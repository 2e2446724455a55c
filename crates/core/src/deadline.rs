//! Deadline parsing and display formatting.
//!
//! Deadlines arrive as loosely formatted ISO-8601 strings: the admin form
//! submits `datetime-local` values without an offset, while escalation
//! extensions and seeded data carry full RFC 3339 instants. Anything that
//! does not parse is treated as "no deadline" by the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::Timestamp;

/// Offset-free date-time layouts, tried in order. Values are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-time layouts carrying an explicit offset but no seconds.
const OFFSET_MINUTE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Display format for deadlines, e.g. `Mon Jan 01 2025`.
pub const DEADLINE_DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// Parse a loosely formatted ISO-8601 timestamp into a UTC instant.
///
/// Returns `None` for empty or unparsable input.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_MINUTE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a `deadlineIso` value.
pub fn parse_deadline(raw: &str) -> Option<Timestamp> {
    parse_timestamp(raw)
}

/// Parse an optional deadline field, folding "absent" and "unparsable" together.
pub fn parse_optional_deadline(raw: Option<&str>) -> Option<Timestamp> {
    raw.and_then(parse_deadline)
}

/// Human-readable deadline stored alongside the ISO value.
pub fn format_deadline(deadline: Timestamp) -> String {
    deadline.format(DEADLINE_DISPLAY_FORMAT).to_string()
}

/// Parse `raw` and format it for display, or `None` if it does not parse.
pub fn display_deadline(raw: &str) -> Option<String> {
    parse_deadline(raw).map(format_deadline)
}
