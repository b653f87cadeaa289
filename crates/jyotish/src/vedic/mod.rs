pub mod graha;
pub mod nakshatra;
pub mod dashas;

pub use graha::{Graha, ALL_GRAHAS, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS};
pub use nakshatra::{get_nakshatra_for_longitude, normalize_degrees, NakshatraMetadata};
pub use dashas::{
    build_antardashas, build_mahadashas, compute_vimshottari_dasha, compute_vimshottari_dasha_at,
    DashaError, DashaOptions, DashaPeriod, DashaTimeline, LordCursor,
};
