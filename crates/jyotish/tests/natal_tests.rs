use chrono::{NaiveDate, NaiveDateTime};
use jyotish::chart::{compute_natal_chart, BirthDetails, NatalError};
use jyotish::ephemeris::{Ephemeris, EphemerisError, GeoLocation};
use jyotish::vedic::{DashaOptions, Graha};

/// Returns fixed longitudes and records the Julian Days it was asked for.
struct FixedEphemeris {
    moon: f64,
    ascendant: f64,
    requested: Vec<f64>,
}

impl FixedEphemeris {
    fn new(moon: f64) -> Self {
        Self {
            moon,
            ascendant: 101.25,
            requested: Vec::new(),
        }
    }
}

impl Ephemeris for FixedEphemeris {
    fn planet_longitude(&mut self, jd_ut: f64, graha: Graha) -> Result<f64, EphemerisError> {
        self.requested.push(jd_ut);
        Ok(match graha {
            Graha::Moon => self.moon,
            Graha::Rahu => 10.0,
            Graha::Ketu => 190.0,
            other => other.vimshottari_index() as f64 * 40.123_456_789,
        })
    }

    fn ascendant(&mut self, _jd_ut: f64, _location: &GeoLocation) -> Result<f64, EphemerisError> {
        Ok(self.ascendant)
    }

    fn ayanamsa_name(&self) -> &str {
        "Lahiri"
    }
}

struct FailingEphemeris;

impl Ephemeris for FailingEphemeris {
    fn planet_longitude(&mut self, jd_ut: f64, graha: Graha) -> Result<f64, EphemerisError> {
        Err(EphemerisError::CalculationFailed {
            planet_id: graha.name().to_string(),
            jd_ut,
            message: "no data".to_string(),
        })
    }

    fn ascendant(&mut self, _jd_ut: f64, _location: &GeoLocation) -> Result<f64, EphemerisError> {
        Err(EphemerisError::HouseCalculationFailed {
            message: "no data".to_string(),
        })
    }

    fn ayanamsa_name(&self) -> &str {
        "Lahiri"
    }
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn delhi_birth(local: NaiveDateTime) -> BirthDetails {
    BirthDetails {
        local,
        utc_offset_seconds: 19_800,
        location: GeoLocation {
            lat: 28.6139,
            lon: 77.2090,
        },
    }
}

#[test]
fn test_positions_use_utc_julian_day() {
    let mut ephemeris = FixedEphemeris::new(0.0);
    // 17:30 at +05:30 is 12:00 UTC on the J2000 epoch day
    let birth = delhi_birth(at(2000, 1, 1, 17, 30));
    let chart = compute_natal_chart(&mut ephemeris, &birth, DashaOptions::default(), at(2026, 10, 16, 0, 0))
        .unwrap();

    assert!((chart.julian_day - 2_451_545.0).abs() < 1e-9);
    assert_eq!(ephemeris.requested.len(), 9);
    assert!(ephemeris.requested.iter().all(|jd| *jd == chart.julian_day));
    assert_eq!(chart.ayanamsha, "Lahiri");
}

#[test]
fn test_dasha_is_anchored_at_local_birth_time() {
    let mut ephemeris = FixedEphemeris::new(0.0);
    let birth = delhi_birth(at(2000, 1, 1, 17, 30));
    let chart = compute_natal_chart(&mut ephemeris, &birth, DashaOptions::default(), at(2026, 10, 16, 0, 0))
        .unwrap();

    assert_eq!(chart.dasha.nak_lord, Graha::Ketu);
    assert_eq!(chart.dasha.maha_sequence[0].start, at(2000, 1, 1, 17, 30));
    assert_eq!(chart.dasha.current_maha.as_ref().unwrap().lord, Graha::Venus);
}

#[test]
fn test_longitudes_are_rounded_and_wrapped() {
    let mut ephemeris = FixedEphemeris::new(359.999_999_7);
    let birth = delhi_birth(at(1990, 5, 17, 14, 30));
    let chart = compute_natal_chart(&mut ephemeris, &birth, DashaOptions::default(), at(2026, 10, 16, 0, 0))
        .unwrap();

    // Moon rounds up to 360 and wraps to the start of Ashwini
    assert_eq!(chart.planets.moon, 0.0);
    assert_eq!(chart.dasha.nak_index, 0);
    assert_eq!(chart.planets.get(Graha::Sun), 80.246914);
    assert_eq!(chart.planets.rahu, 10.0);
    assert_eq!(chart.planets.ketu, 190.0);
    assert_eq!(chart.planets.ascendant, 101.25);
}

#[test]
fn test_planets_json_keys() {
    let mut ephemeris = FixedEphemeris::new(45.0);
    let birth = delhi_birth(at(1990, 5, 17, 14, 30));
    let chart = compute_natal_chart(&mut ephemeris, &birth, DashaOptions::default(), at(2026, 10, 16, 0, 0))
        .unwrap();

    let json = serde_json::to_value(&chart.planets).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["Sun", "Moon", "Mars", "Mercury", "Jupiter", "Venus", "Saturn", "Rahu", "Ketu", "Ascendant"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(json["Moon"], 45.0);
}

#[test]
fn test_ephemeris_failure_propagates() {
    let birth = delhi_birth(at(1990, 5, 17, 14, 30));
    let result = compute_natal_chart(&mut FailingEphemeris, &birth, DashaOptions::default(), at(2026, 10, 16, 0, 0));
    assert!(matches!(result, Err(NatalError::Ephemeris(_))));
}

#[test]
fn test_bad_offset_is_a_birth_error() {
    let mut ephemeris = FixedEphemeris::new(0.0);
    let birth = BirthDetails {
        utc_offset_seconds: 100_000,
        ..delhi_birth(at(1990, 5, 17, 14, 30))
    };
    let result = compute_natal_chart(&mut ephemeris, &birth, DashaOptions::default(), at(2026, 10, 16, 0, 0));
    assert!(matches!(result, Err(NatalError::Birth(_))));
}
