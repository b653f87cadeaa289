//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::{Deserialize, Serialize};
use crate::vedic::graha::Graha;

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / NAKSHATRA_COUNT as f64;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display_name)
pub const NAKSHATRA_ORDER: [(&str, &str); NAKSHATRA_COUNT] = [
    ("ashwini", "Ashwini"),
    ("bharani", "Bharani"),
    ("krittika", "Krittika"),
    ("rohini", "Rohini"),
    ("mrigashira", "Mrigashira"),
    ("ardra", "Ardra"),
    ("punarvasu", "Punarvasu"),
    ("pushya", "Pushya"),
    ("ashlesha", "Ashlesha"),
    ("magha", "Magha"),
    ("purva_phalguni", "Purva Phalguni"),
    ("uttara_phalguni", "Uttara Phalguni"),
    ("hasta", "Hasta"),
    ("chitra", "Chitra"),
    ("swati", "Swati"),
    ("vishakha", "Vishakha"),
    ("anuradha", "Anuradha"),
    ("jyeshtha", "Jyeshtha"),
    ("mula", "Mula"),
    ("purva_ashadha", "Purva Ashadha"),
    ("uttara_ashadha", "Uttara Ashadha"),
    ("shravana", "Shravana"),
    ("dhanishta", "Dhanishta"),
    ("shatabhisha", "Shatabhisha"),
    ("purva_bhadrapada", "Purva Bhadrapada"),
    ("uttara_bhadrapada", "Uttara Bhadrapada"),
    ("revati", "Revati"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseNakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: Graha,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraMetadata {
    #[serde(flatten)]
    pub base: BaseNakshatraRecord,
    /// Degrees travelled into the nakshatra.
    pub offset: f64,
    /// Fraction of the nakshatra already traversed, in [0, 1).
    pub progress: f64,
    pub pada: i32,
    pub pada_fraction: f64,
}

fn build_nakshatra_table() -> Vec<BaseNakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, (slug, display_name))| {
            let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
            BaseNakshatraRecord {
                id: slug.to_string(),
                name: display_name.to_string(),
                lord: Graha::nakshatra_lord(idx),
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<BaseNakshatraRecord> = build_nakshatra_table();
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Return metadata for the nakshatra containing the given longitude.
///
/// Returns a struct containing id, name, lord, index, start/end degrees,
/// within-nakshatra offset, pada number, and pada fraction.
pub fn get_nakshatra_for_longitude(longitude: f64) -> NakshatraMetadata {
    let lon = normalize_degrees(longitude);
    let index = (lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize % NAKSHATRA_TABLE.len();
    let entry = &NAKSHATRA_TABLE[index];

    let offset = lon % NAKSHATRA_SEGMENT_SIZE;
    let pada = ((offset / PADA_SIZE) as i32 + 1).min(4);
    let pada_offset = offset - ((pada - 1) as f64 * PADA_SIZE);
    let pada_fraction = pada_offset / PADA_SIZE;

    NakshatraMetadata {
        base: entry.clone(),
        offset,
        progress: offset / NAKSHATRA_SEGMENT_SIZE,
        pada,
        pada_fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn test_get_nakshatra_for_longitude() {
        let meta = get_nakshatra_for_longitude(0.0);
        assert_eq!(meta.base.id, "ashwini");
        assert_eq!(meta.base.lord, Graha::Ketu);
        assert_eq!(meta.pada, 1);

        let meta2 = get_nakshatra_for_longitude(13.33);
        assert_eq!(meta2.base.id, "ashwini");
        assert_eq!(meta2.pada, 4);
    }

    #[test]
    fn test_last_nakshatra() {
        let meta = get_nakshatra_for_longitude(359.99);
        assert_eq!(meta.base.index, 26);
        assert_eq!(meta.base.name, "Revati");
        assert_eq!(meta.base.lord, Graha::Mercury);
    }
}
