pub mod birth;
pub mod natal;

pub use birth::{julian_day, local_to_utc, parse_birth_datetime, BirthError};
pub use natal::{compute_natal_chart, BirthDetails, NatalChart, NatalError, PlanetLongitudes};
