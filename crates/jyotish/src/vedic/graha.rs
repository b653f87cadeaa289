//! The nine grahas and their Vimshottari ordering.
//!
//! Vimshottari assigns each graha a fixed number of years; the nine periods
//! add up to one 120-year cycle. Nakshatra lordship follows the same cyclic
//! order, starting with Ketu at Ashwini.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 9 Vedic grahas, named as they appear in API output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Graha {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

/// All 9 grahas in the order planetary positions are reported.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Sun,
    Graha::Moon,
    Graha::Mars,
    Graha::Mercury,
    Graha::Jupiter,
    Graha::Venus,
    Graha::Saturn,
    Graha::Rahu,
    Graha::Ketu,
];

/// Length of one full Vimshottari cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: u32 = 120;

/// Vimshottari lord order with each lord's full period in years.
pub const VIMSHOTTARI_SEQUENCE: [(Graha, u32); 9] = [
    (Graha::Ketu, 7),
    (Graha::Venus, 20),
    (Graha::Sun, 6),
    (Graha::Moon, 10),
    (Graha::Mars, 7),
    (Graha::Rahu, 18),
    (Graha::Jupiter, 16),
    (Graha::Saturn, 19),
    (Graha::Mercury, 17),
];

impl Graha {
    /// English name, as used in JSON output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Position of this graha in [`VIMSHOTTARI_SEQUENCE`].
    pub const fn vimshottari_index(self) -> usize {
        match self {
            Self::Ketu => 0,
            Self::Venus => 1,
            Self::Sun => 2,
            Self::Moon => 3,
            Self::Mars => 4,
            Self::Rahu => 5,
            Self::Jupiter => 6,
            Self::Saturn => 7,
            Self::Mercury => 8,
        }
    }

    /// Full Mahadasha length in years.
    pub const fn vimshottari_years(self) -> u32 {
        VIMSHOTTARI_SEQUENCE[self.vimshottari_index()].1
    }

    /// Lord of the nakshatra at `nakshatra_index` (0 = Ashwini).
    pub const fn nakshatra_lord(nakshatra_index: usize) -> Graha {
        VIMSHOTTARI_SEQUENCE[nakshatra_index % VIMSHOTTARI_SEQUENCE.len()].0
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
