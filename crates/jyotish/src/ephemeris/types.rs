use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Settings for ephemeris calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// Directory holding Swiss Ephemeris `.se1` files. Falls back to
    /// `SWISS_EPHEMERIS_PATH`, then to the system default location.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Ayanamsa name used for the sidereal correction
    #[serde(default = "default_ayanamsa")]
    pub ayanamsa: String,
    /// House system name used for the ascendant
    #[serde(default = "default_house_system")]
    pub house_system: String,
}

fn default_ayanamsa() -> String {
    "lahiri".to_string()
}

fn default_house_system() -> String {
    "placidus".to_string()
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            path: None,
            ayanamsa: default_ayanamsa(),
            house_system: default_house_system(),
        }
    }
}
