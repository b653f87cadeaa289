//! Natal chart assembly: sidereal positions, ascendant and Vimshottari timeline
//! for a single birth.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::birth::{julian_day, local_to_utc, BirthError};
use crate::ephemeris::{Ephemeris, EphemerisError, GeoLocation};
use crate::vedic::dashas::{compute_vimshottari_dasha_at, round6, DashaError, DashaOptions, DashaTimeline};
use crate::vedic::nakshatra::normalize_degrees;
use crate::vedic::{Graha, ALL_GRAHAS};

#[derive(Error, Debug)]
pub enum NatalError {
    #[error(transparent)]
    Birth(#[from] BirthError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Dasha(#[from] DashaError),
}

/// Where and when a person was born, in local civil time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthDetails {
    pub local: NaiveDateTime,
    pub utc_offset_seconds: i32,
    pub location: GeoLocation,
}

/// Sidereal longitudes in degrees, rounded to 6 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetLongitudes {
    #[serde(rename = "Sun")]
    pub sun: f64,
    #[serde(rename = "Moon")]
    pub moon: f64,
    #[serde(rename = "Mars")]
    pub mars: f64,
    #[serde(rename = "Mercury")]
    pub mercury: f64,
    #[serde(rename = "Jupiter")]
    pub jupiter: f64,
    #[serde(rename = "Venus")]
    pub venus: f64,
    #[serde(rename = "Saturn")]
    pub saturn: f64,
    #[serde(rename = "Rahu")]
    pub rahu: f64,
    #[serde(rename = "Ketu")]
    pub ketu: f64,
    #[serde(rename = "Ascendant")]
    pub ascendant: f64,
}

impl PlanetLongitudes {
    pub fn get(&self, graha: Graha) -> f64 {
        match graha {
            Graha::Sun => self.sun,
            Graha::Moon => self.moon,
            Graha::Mars => self.mars,
            Graha::Mercury => self.mercury,
            Graha::Jupiter => self.jupiter,
            Graha::Venus => self.venus,
            Graha::Saturn => self.saturn,
            Graha::Rahu => self.rahu,
            Graha::Ketu => self.ketu,
        }
    }

    fn set(&mut self, graha: Graha, value: f64) {
        let slot = match graha {
            Graha::Sun => &mut self.sun,
            Graha::Moon => &mut self.moon,
            Graha::Mars => &mut self.mars,
            Graha::Mercury => &mut self.mercury,
            Graha::Jupiter => &mut self.jupiter,
            Graha::Venus => &mut self.venus,
            Graha::Saturn => &mut self.saturn,
            Graha::Rahu => &mut self.rahu,
            Graha::Ketu => &mut self.ketu,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub julian_day: f64,
    pub ayanamsha: String,
    pub planets: PlanetLongitudes,
    pub dasha: DashaTimeline,
}

/// Round to 6 decimals, keeping the result inside [0, 360).
fn reported_longitude(lon: f64) -> f64 {
    normalize_degrees(round6(normalize_degrees(lon)))
}

/// Compute positions and the dasha timeline for `birth`.
///
/// The dasha is anchored at the local birth timestamp, while positions use
/// the UTC instant derived from `birth.utc_offset_seconds`.
pub fn compute_natal_chart<E: Ephemeris + ?Sized>(
    ephemeris: &mut E,
    birth: &BirthDetails,
    options: DashaOptions,
    now: NaiveDateTime,
) -> Result<NatalChart, NatalError> {
    let utc = local_to_utc(birth.local, birth.utc_offset_seconds)?;
    let jd = julian_day(utc);

    let mut planets = PlanetLongitudes {
        sun: 0.0,
        moon: 0.0,
        mars: 0.0,
        mercury: 0.0,
        jupiter: 0.0,
        venus: 0.0,
        saturn: 0.0,
        rahu: 0.0,
        ketu: 0.0,
        ascendant: 0.0,
    };
    for graha in ALL_GRAHAS {
        let lon = ephemeris.planet_longitude(jd, graha)?;
        planets.set(graha, reported_longitude(lon));
    }
    planets.ascendant = reported_longitude(ephemeris.ascendant(jd, &birth.location)?);

    let dasha = compute_vimshottari_dasha_at(planets.moon, birth.local, now, options)?;

    Ok(NatalChart {
        julian_day: jd,
        ayanamsha: ephemeris.ayanamsa_name().to_string(),
        planets,
        dasha,
    })
}
