//! Birth moment handling: loose date/time parsing, local to UTC, Julian Day.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};
use swisseph::swe::julday;
use thiserror::Error;

/// Accepted `"{date} {time}"` layouts, tried in order.
pub const BIRTH_DATETIME_FORMATS: [&str; 4] = [
    "%d/%m/%Y %I:%M %p",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BirthError {
    #[error("Unable to parse date/time: {0}")]
    UnparseableDateTime(String),
    #[error("UTC offset of {0} seconds is out of range")]
    InvalidUtcOffset(i32),
}

/// Parse a birth date such as `17/05/1990` or `1990-05-17` together with a
/// time such as `2:30 PM` or `14:30`.
pub fn parse_birth_datetime(date: &str, time: &str) -> Result<NaiveDateTime, BirthError> {
    let combined = format!("{} {}", date.trim(), time.trim());
    BIRTH_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&combined, fmt).ok())
        .ok_or(BirthError::UnparseableDateTime(combined))
}

/// Read a naive local timestamp at a fixed UTC offset and return the UTC instant.
pub fn local_to_utc(local: NaiveDateTime, utc_offset_seconds: i32) -> Result<DateTime<Utc>, BirthError> {
    let offset = FixedOffset::east_opt(utc_offset_seconds)
        .ok_or(BirthError::InvalidUtcOffset(utc_offset_seconds))?;
    offset
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(BirthError::InvalidUtcOffset(utc_offset_seconds))
}

/// Gregorian calendar flag for `swe_julday`.
const GREG_CAL: u32 = 1;

/// Julian Day (UT) of a UTC instant, via Swiss Ephemeris.
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = f64::from(dt.second()) + f64::from(dt.nanosecond()) / 1e9;
    let hour = f64::from(dt.hour()) + f64::from(dt.minute()) / 60.0 + seconds / 3600.0;
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour, GREG_CAL)
}
