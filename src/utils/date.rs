//! Timestamp formatting for emitted artifacts.
//!
//! All timestamps are UTC. `to_iso` matches the shape of JavaScript's
//! `Date.prototype.toISOString` (`2024-01-15T08:30:00.000Z`) so that
//! index consumers can parse them with `new Date(...)`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Format as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[inline]
pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format as `YYYY-MM-DD` for human-facing date lines.
#[inline]
pub fn to_ymd(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// serde `serialize_with` adapter for [`to_iso`].
pub fn serialize_iso<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso(dt))
}

/// serde `serialize_with` adapter: epoch milliseconds, `None` → `null`.
pub fn serialize_millis_opt<S: Serializer>(
    dt: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match dt {
        Some(dt) => serializer.serialize_i64(dt.timestamp_millis()),
        None => serializer.serialize_none(),
    }
}
