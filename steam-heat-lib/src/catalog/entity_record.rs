use super::{RawEntity, parse_range_estimate};
use serde::Serialize;

/// Derived metrics for one catalog entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    pub id: u64,
    pub name: String,
    pub avg_playtime_hours: f64,
    pub average_playtime_minutes: f64,
    pub positive: u64,
    pub negative: u64,
    pub total_reviews: u64,

    /// Share of positive reviews, absent when there are no reviews.
    pub pos_ratio: Option<f64>,

    /// `pos_ratio` on a 0..=5 scale, rounded to two decimals.
    pub rating_stars: Option<f64>,

    pub owners_est: Option<f64>,
    pub players_recent: u64,
    pub peak_concurrent: u64,

    /// Recently active players per estimated owner.
    pub active_owner_rate: Option<f64>,

    /// Average global achievement unlock percentage.
    pub enrichment_avg_pct: Option<f64>,
}

impl EntityRecord {
    /// Derive a record from a raw entity and its (possibly missing) enrichment average.
    ///
    /// Never fails: a missing or malformed input degrades the fields derived from it.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
    pub fn compute(raw: &RawEntity, enrichment_avg_pct: Option<f64>) -> Self {
        let average_playtime_minutes = raw.average_forever.value_or(0.0);
        // A malformed count voids both counts.
        let (positive, negative) = if raw.positive.is_malformed() || raw.negative.is_malformed() {
            (0, 0)
        } else {
            (raw.positive.value_or(0), raw.negative.value_or(0))
        };
        let total_reviews = positive.saturating_add(negative);

        let pos_ratio = (total_reviews > 0).then(|| positive as f64 / total_reviews as f64);
        let rating_stars = pos_ratio.map(|ratio| round2(ratio * 5.0));

        let owners_est = parse_range_estimate(raw.owners.as_ref());
        let players_recent = raw.players_2weeks.value_or(0);
        let active_owner_rate = owners_est
            .filter(|owners| *owners > 0.0)
            .map(|owners| players_recent as f64 / owners);

        Self {
            id: raw.appid.value_or(0),
            name: raw.name.value_or_default(),
            avg_playtime_hours: average_playtime_minutes / 60.0,
            average_playtime_minutes,
            positive,
            negative,
            total_reviews,
            pos_ratio,
            rating_stars,
            owners_est,
            players_recent,
            peak_concurrent: raw.ccu.value_or(0),
            active_owner_rate,
            enrichment_avg_pct,
        }
    }
}

/// Round to two decimals, resolving exact ties to the even digit.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
