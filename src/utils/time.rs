//! Time utilities: parsing HH:MM and timestamps, DB formats, epoch conversion.

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeZone};

/// Storage format for timestamps (local wall-clock time, no offset).
pub const DB_TS_FMT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn format_db_ts(ts: &NaiveDateTime) -> String {
    ts.format(DB_TS_FMT).to_string()
}

/// Parse a stored or user-typed timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS`, the same with a space separator, with
/// fractional seconds, or without seconds.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let s = s.trim();
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
}

/// Local wall-clock time → epoch milliseconds.
/// On a DST fold the earlier instant wins; a time skipped by a DST gap
/// has no instant.
pub fn to_epoch_millis(ts: &NaiveDateTime) -> Option<i64> {
    let ms = Local
        .from_local_datetime(ts)
        .earliest()
        .map(|dt| dt.timestamp_millis())?;
    (from_epoch_millis(ms) == Some(*ts)).then_some(ms)
}

/// Epoch milliseconds → local wall-clock time.
pub fn from_epoch_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&Local).naive_local())
}
