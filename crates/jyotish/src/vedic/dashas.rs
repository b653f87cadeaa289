//! Vimshottari dasha calculations for Vedic astrology.
//!
//! Dashas are time periods ruled by planets, calculated based on the Moon's nakshatra.
//! The first Mahadasha is the unelapsed share of the birth nakshatra lord's period;
//! every later Mahadasha runs for its lord's full term. Period ends are whole days:
//! `years * 365.2425` is truncated before it is added to the start.

use chrono::{Datelike, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vedic::graha::{Graha, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS};
use crate::vedic::nakshatra::{get_nakshatra_for_longitude, NAKSHATRA_SEGMENT_SIZE};

/// Gregorian mean year.
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.2425;

/// Mahadashas stop being generated once a period would start after this year.
pub const DEFAULT_HORIZON_YEAR: i32 = 2055;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashaError {
    #[error("Moon longitude must be a finite value in [0, 360), got {0}")]
    InvalidMoonLongitude(f64),
    #[error("Dasha period starting {start} cannot be represented")]
    DateOutOfRange { start: NaiveDateTime },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashaOptions {
    /// Last calendar year in which a new Mahadasha may start.
    pub horizon_year: i32,
}

impl Default for DashaOptions {
    fn default() -> Self {
        Self {
            horizon_year: DEFAULT_HORIZON_YEAR,
        }
    }
}

/// Position in the Vimshottari lord order, advancing modulo 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LordCursor {
    index: usize,
}

impl LordCursor {
    pub fn starting_at(lord: Graha) -> Self {
        Self {
            index: lord.vimshottari_index(),
        }
    }

    pub fn lord(&self) -> Graha {
        VIMSHOTTARI_SEQUENCE[self.index].0
    }

    pub fn full_years(&self) -> u32 {
        VIMSHOTTARI_SEQUENCE[self.index].1
    }

    /// Move to the next lord, wrapping from Mercury back to Ketu.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % VIMSHOTTARI_SEQUENCE.len();
    }
}

/// One Mahadasha or Antardasha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Graha,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub years: f64,
}

impl DashaPeriod {
    /// Whether `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaTimeline {
    pub nak_index: usize,
    pub nak_name: String,
    pub degree_into_nak: f64,
    pub fraction_left: f64,
    pub nak_lord: Graha,
    pub maha_sequence: Vec<DashaPeriod>,
    pub current_maha: Option<DashaPeriod>,
    pub antardashas: Vec<DashaPeriod>,
}

/// Whole days covered by `years`, truncated toward zero.
pub fn years_to_days(years: f64) -> i64 {
    (years * VIMSHOTTARI_YEAR_DAYS) as i64
}

/// `None` once the end falls outside chrono's calendar range.
fn period_end(start: NaiveDateTime, years: f64) -> Option<NaiveDateTime> {
    start.checked_add_signed(Duration::days(years_to_days(years)))
}

pub(crate) fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Compute the Vimshottari timeline using the current wall clock (UTC) as "now".
pub fn compute_vimshottari_dasha(
    moon_longitude: f64,
    birth: NaiveDateTime,
    options: DashaOptions,
) -> Result<DashaTimeline, DashaError> {
    compute_vimshottari_dasha_at(moon_longitude, birth, Utc::now().naive_utc(), options)
}

/// Compute the Vimshottari timeline, locating the running Mahadasha at `now`.
///
/// `moon_longitude` must already be normalized to [0, 360).
pub fn compute_vimshottari_dasha_at(
    moon_longitude: f64,
    birth: NaiveDateTime,
    now: NaiveDateTime,
    options: DashaOptions,
) -> Result<DashaTimeline, DashaError> {
    if !moon_longitude.is_finite() || !(0.0..360.0).contains(&moon_longitude) {
        return Err(DashaError::InvalidMoonLongitude(moon_longitude));
    }

    let nakshatra = get_nakshatra_for_longitude(moon_longitude);
    let nak_index = nakshatra.base.index;
    let nak_lord = nakshatra.base.lord;
    let degree_into_nak = nakshatra.offset;
    let fraction_left = (NAKSHATRA_SEGMENT_SIZE - degree_into_nak) / NAKSHATRA_SEGMENT_SIZE;

    let maha_sequence = build_mahadashas(nak_lord, fraction_left, birth, options.horizon_year)?;
    let current_maha = maha_sequence.iter().find(|p| p.contains(now)).cloned();
    let antardashas = current_maha
        .as_ref()
        .map(build_antardashas)
        .unwrap_or_default();

    log::debug!(
        "vimshottari: nakshatra {} ({}), {} mahadashas, current {:?}",
        nak_index,
        nak_lord,
        maha_sequence.len(),
        current_maha.as_ref().map(|p| p.lord)
    );

    Ok(DashaTimeline {
        nak_index,
        nak_name: nakshatra.base.name,
        degree_into_nak: round6(degree_into_nak),
        fraction_left,
        nak_lord,
        maha_sequence,
        current_maha,
        antardashas,
    })
}

/// Build the Mahadasha chain from birth until a period would start after `horizon_year`.
///
/// The chain also stops early when the next period would end past the last
/// date chrono can represent.
pub fn build_mahadashas(
    nak_lord: Graha,
    fraction_left: f64,
    birth: NaiveDateTime,
    horizon_year: i32,
) -> Result<Vec<DashaPeriod>, DashaError> {
    let mut cursor = LordCursor::starting_at(nak_lord);
    let first_years = f64::from(cursor.full_years()) * fraction_left;
    let first_end = period_end(birth, first_years).ok_or(DashaError::DateOutOfRange { start: birth })?;

    let mut periods = vec![DashaPeriod {
        lord: nak_lord,
        start: birth,
        end: first_end,
        years: round6(first_years),
    }];

    let mut current_start = first_end;
    cursor.advance();
    while current_start.year() <= horizon_year {
        let years = f64::from(cursor.full_years());
        let Some(end) = period_end(current_start, years) else {
            log::warn!("Mahadasha chain truncated at {current_start}: end date out of range");
            break;
        };
        periods.push(DashaPeriod {
            lord: cursor.lord(),
            start: current_start,
            end,
            years,
        });
        current_start = end;
        cursor.advance();
    }

    Ok(periods)
}

/// Split a Mahadasha into its 9 Antardashas, starting with its own lord.
pub fn build_antardashas(maha: &DashaPeriod) -> Vec<DashaPeriod> {
    let mut cursor = LordCursor::starting_at(maha.lord);
    let mut start = maha.start;
    let mut antardashas = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());

    for _ in 0..VIMSHOTTARI_SEQUENCE.len() {
        let years =
            f64::from(cursor.full_years()) / f64::from(VIMSHOTTARI_TOTAL_YEARS) * maha.years;
        // truncated sub-period days never sum past the Mahadasha end
        let end = period_end(start, years).unwrap_or(maha.end);
        antardashas.push(DashaPeriod {
            lord: cursor.lord(),
            start,
            end,
            years: round6(years),
        });
        start = end;
        cursor.advance();
    }

    antardashas
}
