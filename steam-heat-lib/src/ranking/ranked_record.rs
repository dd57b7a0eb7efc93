use crate::catalog::EntityRecord;
use serde::Serialize;

/// An [`EntityRecord`] placed within the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    #[serde(flatten)]
    pub record: EntityRecord,

    pub norm_players: f64,
    pub norm_peak: f64,
    pub norm_rating: f64,

    /// Weighted blend of the three normalized signals, in `0.0..=1.0`.
    pub heat_score: f64,

    pub heat_rank: u32,
    pub owners_rank: u32,
}
