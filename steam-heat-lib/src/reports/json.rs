use crate::Result;
use crate::ranking::RankedRecord;
use core::fmt::Write;

/// Write every field of every record, including the normalized components, as a JSON array.
pub fn generate<W: Write>(records: &[RankedRecord], writer: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EntityRecord, RawEntity};
    use crate::ranking::rank;
    use serde_json::{Value, json};

    #[test]
    fn test_generate_flattens_records() {
        let record = EntityRecord::compute(
            &RawEntity::from_value(&json!({ "appid": 440, "name": "TF2", "players_2weeks": 10, "positive": 9, "negative": 1 })),
            Some(12.5),
        );
        let mut output = String::new();
        generate(&rank(vec![record]), &mut output).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        let first = &parsed[0];
        assert_eq!(first["id"], 440);
        assert_eq!(first["name"], "TF2");
        assert_eq!(first["enrichment_avg_pct"], 12.5);
        assert_eq!(first["owners_est"], Value::Null);
        assert_eq!(first["norm_players"], 1.0);
        assert_eq!(first["heat_rank"], 1);
        assert_eq!(first["owners_rank"], 1);
    }

    #[test]
    fn test_generate_empty() {
        let mut output = String::new();
        generate(&[], &mut output).unwrap();
        assert_eq!(output.trim(), "[]");
    }
}
