use crate::Result;
use crate::ranking::RankedRecord;
use core::fmt::Write;
use owo_colors::OwoColorize;

const NAME_WIDTH: usize = 28;

const HEADER: [(&str, usize); 13] = [
    ("heat#", 5),
    ("id", 8),
    ("name", NAME_WIDTH),
    ("hours", 8),
    ("stars", 5),
    ("pos%", 6),
    ("owners", 12),
    ("players", 10),
    ("peak", 9),
    ("active", 8),
    ("ach%", 6),
    ("heat", 6),
    ("own#", 5),
];

/// Print the first `top` records as an aligned table.
pub fn generate<W: Write>(records: &[RankedRecord], top: usize, use_colors: bool, writer: &mut W) -> Result<()> {
    let shown = records.len().min(top);
    let title = format!("Top {shown} of {} by heat score", records.len());
    if use_colors {
        writeln!(writer, "{}", title.bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }

    let header = HEADER
        .iter()
        .enumerate()
        .map(|(i, &(label, width))| if i == 2 { format!("{label:<width$}") } else { format!("{label:>width$}") })
        .collect::<Vec<_>>()
        .join(" ");

    if use_colors {
        writeln!(writer, "{}", header.bold().cyan())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    for ranked in records.iter().take(top) {
        let r = &ranked.record;
        let heat_rank = format!("{:>5}", ranked.heat_rank);
        let heat_rank = if use_colors { heat_rank.green().bold().to_string() } else { heat_rank };

        writeln!(
            writer,
            "{heat_rank} {:>8} {:<name_width$} {:>8.1} {:>5} {:>6} {:>12} {:>10} {:>9} {:>8} {:>6} {:>6.3} {:>5}",
            r.id,
            truncate_name(&r.name),
            r.avg_playtime_hours,
            format_opt(r.rating_stars, 2),
            format_opt(r.pos_ratio.map(|p| p * 100.0), 1),
            format_opt(r.owners_est, 0),
            r.players_recent,
            r.peak_concurrent,
            format_opt(r.active_owner_rate, 4),
            format_opt(r.enrichment_avg_pct, 1),
            ranked.heat_score,
            ranked.owners_rank,
            name_width = NAME_WIDTH,
        )?;
    }

    Ok(())
}

fn format_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH {
        name.to_string()
    } else {
        let mut truncated: String = name.chars().take(NAME_WIDTH - 1).collect();
        truncated.push('…');
        truncated
    }
}
