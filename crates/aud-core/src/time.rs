//! Timestamp helpers.
//!
//! Stored timestamps are RFC 3339 TEXT in UTC with microsecond precision.
//! `now()` truncates to the same precision so a record returned from `create`
//! compares equal to the one read back from the store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};

/// Current instant truncated to microseconds.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A mutation timestamp strictly after `previous`.
///
/// Two mutations within the same microsecond (or a clock step backwards) still
/// yield a strictly increasing `updatedAt`.
#[must_use]
pub fn next_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let candidate = now();
    if candidate > previous {
        candidate
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Canonical storage form.
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp supplied by a caller or read from storage.
///
/// Accepts RFC 3339 (`"2025-03-31T12:00:00Z"`), `SQLite`'s default format
/// (`"2025-03-31 12:00:00"`), and plain dates (`"2025-03-31"`, read as
/// midnight UTC). Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).trunc_subsecs(6));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
