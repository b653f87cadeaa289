//! Sidereal natal positions and the Vimshottari dasha timeline.
//!
//! [`vedic`] holds the pure calculations (nakshatras, dasha periods),
//! [`ephemeris`] the Swiss Ephemeris collaborator, and [`chart`] ties a birth
//! moment and place to both.

pub mod chart;
pub mod ephemeris;
pub mod vedic;

pub use chart::{compute_natal_chart, parse_birth_datetime, BirthDetails, NatalChart, NatalError};
pub use ephemeris::{Ephemeris, EphemerisError, EphemerisSettings, GeoLocation, SwissEphemerisAdapter};
pub use vedic::{
    compute_vimshottari_dasha, compute_vimshottari_dasha_at, DashaError, DashaOptions, DashaPeriod,
    DashaTimeline, Graha,
};
