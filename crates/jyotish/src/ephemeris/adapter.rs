use crate::ephemeris::ayanamsa::Ayanamsa;
use crate::ephemeris::types::{EphemerisSettings, GeoLocation};
use crate::ephemeris::Ephemeris;
use crate::vedic::nakshatra::normalize_degrees;
use crate::vedic::Graha;
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, set_ephe_path};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid ayanamsa: {ayanamsa}. Valid ayanamsas: {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("Failed to calculate position for {planet_id} at JD {jd_ut}: {message}")]
    CalculationFailed {
        planet_id: String,
        jd_ut: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// Swiss Ephemeris flags
const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;

// Swiss Ephemeris body codes. Ketu has no code of its own; it is opposite Rahu.
const SE_SUN: u32 = 0;
const SE_MOON: u32 = 1;
const SE_MERCURY: u32 = 2;
const SE_VENUS: u32 = 3;
const SE_MARS: u32 = 4;
const SE_JUPITER: u32 = 5;
const SE_SATURN: u32 = 6;
const SE_MEAN_NODE: u32 = 10;

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, u8)] = &[
    ("placidus", b'P'),
    ("whole_sign", b'W'),
    ("koch", b'K'),
    ("equal", b'E'),
    ("regiomontanus", b'R'),
    ("campanus", b'C'),
    ("alcabitius", b'A'),
    ("morinus", b'M'),
    ("porphyry", b'O'),
];

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    flags: i32,
    ayanamsa: Ayanamsa,
    house_system: u8,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter from settings.
    ///
    /// An explicitly configured path must exist. When only the default
    /// location is tried and it is missing, the built-in Moshier model is used.
    pub fn new(settings: &EphemerisSettings) -> Result<Self, EphemerisError> {
        let ayanamsa = Ayanamsa::from_name(&settings.ayanamsa)?;
        let house_system = get_house_system_byte(&settings.house_system)?;

        let explicit = settings
            .path
            .clone()
            .or_else(|| env::var("SWISS_EPHEMERIS_PATH").ok().map(PathBuf::from));

        let (ephemeris_path, flags) = match explicit {
            Some(path) if !path.exists() => {
                return Err(EphemerisError::FileNotFound {
                    path: path.display().to_string(),
                    message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                });
            }
            Some(path) => (Some(path), FLG_SWIEPH),
            None => {
                let default = PathBuf::from(DEFAULT_EPHEMERIS_PATH);
                if default.exists() {
                    (Some(default), FLG_SWIEPH)
                } else {
                    log::warn!(
                        "No Swiss Ephemeris files at {}; using the built-in Moshier model",
                        DEFAULT_EPHEMERIS_PATH
                    );
                    (None, FLG_MOSEPH)
                }
            }
        };

        if let Some(path) = &ephemeris_path {
            set_ephe_path(ephe_path_str(path)?);
            log::info!("Swiss Ephemeris files: {}", path.display());
        }

        Ok(Self {
            ephemeris_path,
            flags,
            ayanamsa,
            house_system,
        })
    }

    pub fn ephemeris_path(&self) -> Option<&PathBuf> {
        self.ephemeris_path.as_ref()
    }

    pub fn ayanamsa(&self) -> Ayanamsa {
        self.ayanamsa
    }

    /// Tropical longitude for a Swiss Ephemeris body code.
    fn tropical_longitude(&self, jd_ut: f64, code: u32, planet_id: &str) -> Result<f64, EphemerisError> {
        let result = calc_ut(jd_ut, code, self.flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet_id: planet_id.to_string(),
                jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                planet_id: planet_id.to_string(),
                jd_ut,
                message: "non-finite longitude".to_string(),
            });
        }
        Ok(longitude)
    }

    fn to_sidereal(&self, jd_ut: f64, tropical: f64) -> f64 {
        normalize_degrees(tropical - self.ayanamsa.mean_deg(jd_ut))
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn planet_longitude(&mut self, jd_ut: f64, graha: Graha) -> Result<f64, EphemerisError> {
        let tropical = match graha {
            Graha::Ketu => self.tropical_longitude(jd_ut, SE_MEAN_NODE, "ketu")? + 180.0,
            other => self.tropical_longitude(jd_ut, planet_code(other), other.name())?,
        };
        Ok(self.to_sidereal(jd_ut, tropical))
    }

    fn ascendant(&mut self, jd_ut: f64, location: &GeoLocation) -> Result<f64, EphemerisError> {
        use swisseph::swe::houses_ex;
        use swisseph::AscMc;

        let (_cusps, a) = houses_ex(
            jd_ut,
            self.flags,
            location.lat,
            location.lon,
            self.house_system as i32,
        );
        let ascmc = AscMc::from_array(a);

        if !ascmc.ascendant.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "no ascendant for lat {} lon {} at JD {}",
                    location.lat, location.lon, jd_ut
                ),
            });
        }
        Ok(self.to_sidereal(jd_ut, ascmc.ascendant))
    }

    fn ayanamsa_name(&self) -> &str {
        self.ayanamsa.name()
    }
}

fn planet_code(graha: Graha) -> u32 {
    match graha {
        Graha::Sun => SE_SUN,
        Graha::Moon => SE_MOON,
        Graha::Mercury => SE_MERCURY,
        Graha::Venus => SE_VENUS,
        Graha::Mars => SE_MARS,
        Graha::Jupiter => SE_JUPITER,
        Graha::Saturn => SE_SATURN,
        Graha::Rahu | Graha::Ketu => SE_MEAN_NODE,
    }
}

/// The C library takes the path as a NUL-terminated UTF-8 string.
fn ephe_path_str(path: &Path) -> Result<&str, EphemerisError> {
    path.to_str()
        .filter(|s| !s.contains('\0'))
        .ok_or_else(|| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path must be valid UTF-8 without NUL bytes.".to_string(),
        })
}

/// Convert house system string to byte format
fn get_house_system_byte(house_system: &str) -> Result<u8, EphemerisError> {
    HOUSE_SYSTEMS
        .iter()
        .find(|(name, _)| *name == house_system.to_lowercase())
        .map(|(_, byte)| *byte)
        .ok_or_else(|| EphemerisError::InvalidHouseSystem {
            system: house_system.to_string(),
            valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}
