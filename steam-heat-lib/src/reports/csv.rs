use crate::Result;
use crate::ranking::RankedRecord;
use serde::Serialize;
use std::io::Write;

/// Byte-order mark so spreadsheet applications detect UTF-8 game names.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column order of the catalog table.
const COLUMNS: [&str; 17] = [
    "id",
    "name",
    "avg_playtime_hours",
    "average_playtime_minutes",
    "positive",
    "negative",
    "total_reviews",
    "pos_ratio",
    "rating_stars",
    "owners_est",
    "players_recent",
    "peak_concurrent",
    "active_owner_rate",
    "enrichment_avg_pct",
    "heat_score",
    "heat_rank",
    "owners_rank",
];

/// One table row; field order must match [`COLUMNS`].
#[derive(Serialize)]
struct Row<'a> {
    id: u64,
    name: &'a str,
    avg_playtime_hours: f64,
    average_playtime_minutes: f64,
    positive: u64,
    negative: u64,
    total_reviews: u64,
    pos_ratio: Option<f64>,
    rating_stars: Option<f64>,
    owners_est: Option<f64>,
    players_recent: u64,
    peak_concurrent: u64,
    active_owner_rate: Option<f64>,
    enrichment_avg_pct: Option<f64>,
    heat_score: f64,
    heat_rank: u32,
    owners_rank: u32,
}

impl<'a> From<&'a RankedRecord> for Row<'a> {
    fn from(ranked: &'a RankedRecord) -> Self {
        let r = &ranked.record;
        Self {
            id: r.id,
            name: &r.name,
            avg_playtime_hours: r.avg_playtime_hours,
            average_playtime_minutes: r.average_playtime_minutes,
            positive: r.positive,
            negative: r.negative,
            total_reviews: r.total_reviews,
            pos_ratio: r.pos_ratio,
            rating_stars: r.rating_stars,
            owners_est: r.owners_est,
            players_recent: r.players_recent,
            peak_concurrent: r.peak_concurrent,
            active_owner_rate: r.active_owner_rate,
            enrichment_avg_pct: r.enrichment_avg_pct,
            heat_score: ranked.heat_score,
            heat_rank: ranked.heat_rank,
            owners_rank: ranked.owners_rank,
        }
    }
}

/// Write the catalog as a delimited table, one row per record in the given order.
///
/// Absent values are written as empty cells.
pub fn generate<W: Write>(records: &[RankedRecord], mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = ::csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(COLUMNS)?;

    for ranked in records {
        csv_writer.serialize(Row::from(ranked))?;
    }

    csv_writer.flush()?;
    Ok(())
}
