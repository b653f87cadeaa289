pub mod adapter;
pub mod ayanamsa;
pub mod types;

pub use adapter::{EphemerisError, SwissEphemerisAdapter};
pub use ayanamsa::Ayanamsa;
pub use types::{EphemerisSettings, GeoLocation};

use crate::vedic::Graha;

/// Source of sidereal positions for a moment given as a Julian Day (UT).
pub trait Ephemeris: Send {
    /// Sidereal ecliptic longitude of `graha` in degrees, in [0, 360).
    fn planet_longitude(&mut self, jd_ut: f64, graha: Graha) -> Result<f64, EphemerisError>;

    /// Sidereal ascendant in degrees, in [0, 360).
    fn ascendant(&mut self, jd_ut: f64, location: &GeoLocation) -> Result<f64, EphemerisError>;

    /// Display name of the sidereal correction in use.
    fn ayanamsa_name(&self) -> &str;
}
