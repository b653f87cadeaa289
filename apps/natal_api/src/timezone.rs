//! Coordinates to IANA zone, and the zone's UTC offset at a local wall time.

use chrono::{LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;
use tzf_rs::DefaultFinder;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedZone {
    pub name: String,
    pub offset_seconds: i32,
}

impl ResolvedZone {
    pub fn offset_hours(&self) -> f64 {
        f64::from(self.offset_seconds) / 3600.0
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimezoneError {
    #[error("Timezone not found for this location")]
    NotFound,
    #[error("Unknown timezone: {0}")]
    UnknownZone(String),
}

pub trait TimezoneResolver: Send + Sync {
    fn resolve(&self, lat: f64, lon: f64, local: NaiveDateTime) -> Result<ResolvedZone, TimezoneError>;
}

/// Offline polygon lookup with tzf-rs, offsets from the chrono-tz database.
pub struct TzfResolver {
    finder: DefaultFinder,
}

impl TzfResolver {
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for TzfResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneResolver for TzfResolver {
    fn resolve(&self, lat: f64, lon: f64, local: NaiveDateTime) -> Result<ResolvedZone, TimezoneError> {
        let name = self.finder.get_tz_name(lon, lat);
        if name.is_empty() {
            return Err(TimezoneError::NotFound);
        }
        let offset_seconds = offset_in_zone(name, local)?;
        log::debug!("({lat}, {lon}) resolved to {name} at offset {offset_seconds}s");
        Ok(ResolvedZone {
            name: name.to_string(),
            offset_seconds,
        })
    }
}

/// UTC offset of `zone` at the wall time `local`.
///
/// A repeated wall time (clocks going back) takes the earlier instant. A
/// skipped wall time (clocks going forward) reads `local` as UTC and uses the
/// offset in force at that instant.
pub fn offset_in_zone(zone: &str, local: NaiveDateTime) -> Result<i32, TimezoneError> {
    let tz: Tz = zone
        .parse()
        .map_err(|_| TimezoneError::UnknownZone(zone.to_string()))?;
    let offset = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.offset().fix(),
        LocalResult::Ambiguous(earlier, _) => earlier.offset().fix(),
        LocalResult::None => tz.offset_from_utc_datetime(&local).fix(),
    };
    Ok(offset.local_minus_utc())
}
