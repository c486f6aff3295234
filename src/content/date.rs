//! Publication date parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats tried in order, for both date-time and date-only values
const FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Parse a front-matter date string into a calendar date-time.
///
/// Returns `None` for blank or unrecognized input; callers rank such posts
/// as least recent.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 with offset, compared by its wall-clock time
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}
