//! Turning per-entity records into a ranked catalog
//!
//! Scores are only meaningful relative to the whole set, so ranking always operates on
//! the complete list of [`EntityRecord`](crate::catalog::EntityRecord)s.

mod ranked_record;
mod scorer;

pub use ranked_record::RankedRecord;
pub use scorer::{HEAT_WEIGHTS, MAX_RATING_STARS, heat_score, min_rank_descending, normalize_by_max, rank};
