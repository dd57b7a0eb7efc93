//! Catalog-wide normalization, heat scoring, and ranking.

use super::RankedRecord;
use crate::catalog::EntityRecord;

/// Weights applied to (recent players, peak concurrency, rating). They sum to one.
pub const HEAT_WEIGHTS: (f64, f64, f64) = (0.5, 0.3, 0.2);

/// Ratings are normalized against the top of the star scale, not the observed maximum.
pub const MAX_RATING_STARS: f64 = 5.0;

/// Scale every value by the maximum of the set. A set whose maximum is zero scales to all zeros.
#[must_use]
pub fn normalize_by_max(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        values.iter().map(|v| v / max).collect()
    } else {
        vec![0.0; values.len()]
    }
}

#[must_use]
pub fn heat_score(norm_players: f64, norm_peak: f64, norm_rating: f64) -> f64 {
    let (w_players, w_peak, w_rating) = HEAT_WEIGHTS;
    w_players * norm_players + w_peak * norm_peak + w_rating * norm_rating
}

/// Rank values in descending order with "min" tie semantics.
///
/// Tied values share the best position of their group, and the next distinct value
/// resumes at its true position, so `[0.9, 0.9, 0.5]` ranks as `[1, 1, 3]`.
#[must_use]
pub fn min_rank_descending(values: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0; values.len()];
    let mut previous: Option<(f64, u32)> = None;

    for (position, &index) in (1_u32..).zip(&order) {
        let value = values[index];
        let rank = match previous {
            Some((prev_value, prev_rank)) if prev_value.total_cmp(&value).is_eq() => prev_rank,
            _ => position,
        };
        ranks[index] = rank;
        previous = Some((value, rank));
    }

    ranks
}

/// Score and rank the complete catalog.
///
/// Normalization needs set-wide maxima, so this runs in two passes over the whole set and
/// returns the records sorted by descending heat score. Records with equal scores keep
/// their input order.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "player counts are far below 2^52")]
pub fn rank(records: Vec<EntityRecord>) -> Vec<RankedRecord> {
    let players: Vec<f64> = records.iter().map(|r| r.players_recent as f64).collect();
    let peaks: Vec<f64> = records.iter().map(|r| r.peak_concurrent as f64).collect();
    let owners: Vec<f64> = records.iter().map(|r| r.owners_est.unwrap_or(0.0)).collect();

    let norm_players = normalize_by_max(&players);
    let norm_peaks = normalize_by_max(&peaks);

    let scored: Vec<(EntityRecord, f64, f64, f64, f64)> = records
        .into_iter()
        .zip(norm_players.into_iter().zip(norm_peaks))
        .map(|(record, (norm_players, norm_peak))| {
            let norm_rating = record.rating_stars.unwrap_or(0.0) / MAX_RATING_STARS;
            let score = heat_score(norm_players, norm_peak, norm_rating);
            (record, norm_players, norm_peak, norm_rating, score)
        })
        .collect();

    let scores: Vec<f64> = scored.iter().map(|s| s.4).collect();
    let heat_ranks = min_rank_descending(&scores);
    let owners_ranks = min_rank_descending(&owners);

    let mut ranked: Vec<RankedRecord> = scored
        .into_iter()
        .zip(heat_ranks.into_iter().zip(owners_ranks))
        .map(|((record, norm_players, norm_peak, norm_rating, heat_score), (heat_rank, owners_rank))| RankedRecord {
            record,
            norm_players,
            norm_peak,
            norm_rating,
            heat_score,
            heat_rank,
            owners_rank,
        })
        .collect();

    ranked.sort_by(|a, b| b.heat_score.total_cmp(&a.heat_score));
    ranked
}
