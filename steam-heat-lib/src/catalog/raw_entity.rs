//! Typed view over one entity returned by the bulk listing source.
//!
//! The listing source returns loosely-typed JSON: counts sometimes arrive as
//! strings, optional fields are omitted or `null`, and the owners estimate is
//! either a number or a range string. Everything is coerced once, here, into
//! [`Field`] values so later stages never inspect JSON types themselves.

use serde_json::{Map, Value};

const LOG_TARGET: &str = "   listing";

/// The result of coercing a single raw field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// The field was present and well-formed.
    Value(T),

    /// The field was absent, `null`, or an empty string.
    Missing,

    /// The field was present but could not be coerced into the expected type.
    Malformed(String),
}

impl<T: Clone> Field<T> {
    /// Collapses the field into a concrete value, using `default` when it is missing or malformed.
    pub fn value_or(&self, default: T) -> T {
        match self {
            Self::Value(v) => v.clone(),
            Self::Missing | Self::Malformed(_) => default,
        }
    }

    /// Like [`Field::value_or`], falling back to `T::default()`.
    pub fn value_or_default(&self) -> T
    where
        T: Default,
    {
        self.value_or(T::default())
    }

    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// One catalog entity as delivered by the listing source, with every field coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntity {
    pub appid: Field<u64>,
    pub name: Field<String>,

    /// Average lifetime playtime, in minutes.
    pub average_forever: Field<f64>,

    /// Raw owners value, either a number or a `"low .. high"` string. Interpreted by
    /// [`parse_range_estimate`](super::parse_range_estimate).
    pub owners: Option<Value>,

    /// Players active during the last two weeks.
    pub players_2weeks: Field<u64>,

    /// Peak concurrent users.
    pub ccu: Field<u64>,

    pub positive: Field<u64>,
    pub negative: Field<u64>,
}

impl RawEntity {
    /// Coerce a listing value into a typed entity.
    ///
    /// Values that are not JSON objects yield an entity with every field missing; the
    /// entity is kept so that the catalog size reflects what the source returned.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map_or_else(Self::empty, Self::from_map)
    }

    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let entity = Self {
            appid: coerce_count(map.get("appid")),
            name: coerce_name(map.get("name")),
            average_forever: coerce_float(map.get("average_forever")),
            owners: map.get("owners").filter(|v| !v.is_null()).cloned(),
            players_2weeks: coerce_count(map.get("players_2weeks")),
            ccu: coerce_count(map.get("ccu")),
            positive: coerce_count(map.get("positive")),
            negative: coerce_count(map.get("negative")),
        };

        entity.log_rejected_fields();
        entity
    }

    const fn empty() -> Self {
        Self {
            appid: Field::Missing,
            name: Field::Missing,
            average_forever: Field::Missing,
            owners: None,
            players_2weeks: Field::Missing,
            ccu: Field::Missing,
            positive: Field::Missing,
            negative: Field::Missing,
        }
    }

    fn log_rejected_fields(&self) {
        let rejected = [
            ("appid", self.appid.is_malformed()),
            ("name", self.name.is_malformed()),
            ("average_forever", self.average_forever.is_malformed()),
            ("players_2weeks", self.players_2weeks.is_malformed()),
            ("ccu", self.ccu.is_malformed()),
            ("positive", self.positive.is_malformed()),
            ("negative", self.negative.is_malformed()),
        ];

        for (field, _) in rejected.iter().filter(|(_, malformed)| *malformed) {
            log::debug!(target: LOG_TARGET, "Ignoring malformed '{field}' for entity {:?}", self.appid);
        }
    }
}

/// Coerce a non-negative integer. Finite floats are truncated toward zero.
fn coerce_count(value: Option<&Value>) -> Field<u64> {
    match value {
        None | Some(Value::Null) => Field::Missing,
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                Field::Value(v)
            } else if let Some(f) = n.as_f64() {
                truncate_float(f)
            } else {
                Field::Malformed(format!("unsupported number {n}"))
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Field::Missing
            } else {
                s.parse::<u64>()
                    .map_or_else(|e| Field::Malformed(format!("'{s}' is not a count: {e}")), Field::Value)
            }
        }
        Some(other) => Field::Malformed(format!("expected a count, found {other}")),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range is checked before the cast and truncation toward zero is intended"
)]
fn truncate_float(f: f64) -> Field<u64> {
    if f.is_finite() && f >= 0.0 && f < 18_446_744_073_709_551_616.0 {
        Field::Value(f.trunc() as u64)
    } else {
        Field::Malformed(format!("{f} is not a count"))
    }
}

/// Coerce a non-negative, finite float.
fn coerce_float(value: Option<&Value>) -> Field<f64> {
    let parsed = match value {
        None | Some(Value::Null) => return Field::Missing,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Field::Missing;
            }
            s.parse::<f64>().ok()
        }
        Some(other) => return Field::Malformed(format!("expected a number, found {other}")),
    };

    match parsed {
        Some(f) if f.is_finite() && f >= 0.0 => Field::Value(f),
        _ => Field::Malformed(format!("{value:?} is not a non-negative number")),
    }
}

fn coerce_name(value: Option<&Value>) -> Field<String> {
    match value {
        None | Some(Value::Null) => Field::Missing,
        Some(Value::String(s)) => Field::Value(s.trim().to_string()),
        Some(other) => Field::Malformed(format!("expected a string, found {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_entity() {
        let entity = RawEntity::from_value(&json!({
            "appid": 570,
            "name": "  Dota 2 ",
            "average_forever": 41_250,
            "owners": "200,000,000 .. 500,000,000",
            "players_2weeks": 12_345,
            "ccu": 600_000,
            "positive": 1_500_000,
            "negative": 300_000,
            "developer": "Valve"
        }));

        assert_eq!(entity.appid, Field::Value(570));
        assert_eq!(entity.name, Field::Value("Dota 2".to_string()));
        assert_eq!(entity.average_forever, Field::Value(41_250.0));
        assert_eq!(entity.owners, Some(json!("200,000,000 .. 500,000,000")));
        assert_eq!(entity.players_2weeks, Field::Value(12_345));
        assert_eq!(entity.ccu, Field::Value(600_000));
        assert_eq!(entity.positive, Field::Value(1_500_000));
        assert_eq!(entity.negative, Field::Value(300_000));
    }

    #[test]
    fn test_empty_object_is_all_missing() {
        let entity = RawEntity::from_value(&json!({}));
        assert_eq!(entity, RawEntity::empty());
    }

    #[test]
    fn test_non_object_is_all_missing() {
        assert_eq!(RawEntity::from_value(&json!([1, 2, 3])), RawEntity::empty());
        assert_eq!(RawEntity::from_value(&json!("570")), RawEntity::empty());
    }

    #[test]
    fn test_counts_from_strings() {
        let entity = RawEntity::from_value(&json!({ "appid": " 730 ", "positive": "80", "negative": "" }));
        assert_eq!(entity.appid, Field::Value(730));
        assert_eq!(entity.positive, Field::Value(80));
        assert_eq!(entity.negative, Field::Missing);
    }

    #[test]
    fn test_counts_from_floats_truncate() {
        let entity = RawEntity::from_value(&json!({ "ccu": 12.9, "players_2weeks": 0.2 }));
        assert_eq!(entity.ccu, Field::Value(12));
        assert_eq!(entity.players_2weeks, Field::Value(0));
    }

    #[test]
    fn test_malformed_counts() {
        let entity = RawEntity::from_value(&json!({
            "appid": "abc",
            "positive": -5,
            "negative": "12.5",
            "ccu": [1],
            "players_2weeks": true
        }));
        assert!(entity.appid.is_malformed());
        assert!(entity.positive.is_malformed());
        assert!(entity.negative.is_malformed());
        assert!(entity.ccu.is_malformed());
        assert!(entity.players_2weeks.is_malformed());
    }

    #[test]
    fn test_null_fields_are_missing() {
        let entity = RawEntity::from_value(&json!({ "appid": null, "name": null, "owners": null, "average_forever": null }));
        assert_eq!(entity.appid, Field::Missing);
        assert_eq!(entity.name, Field::Missing);
        assert_eq!(entity.owners, None);
        assert_eq!(entity.average_forever, Field::Missing);
    }

    #[test]
    fn test_average_forever_variants() {
        assert_eq!(coerce_float(Some(&json!("90.5"))), Field::Value(90.5));
        assert_eq!(coerce_float(Some(&json!(""))), Field::Missing);
        assert!(coerce_float(Some(&json!("soon"))).is_malformed());
        assert!(coerce_float(Some(&json!(-3))).is_malformed());
        assert!(coerce_float(Some(&json!({}))).is_malformed());
    }

    #[test]
    fn test_name_of_wrong_type_is_malformed() {
        assert!(coerce_name(Some(&json!(42))).is_malformed());
    }

    #[test]
    fn test_value_or() {
        assert_eq!(Field::Value(3_u64).value_or(0), 3);
        assert_eq!(Field::<u64>::Missing.value_or(0), 0);
        assert_eq!(Field::<u64>::Malformed("bad".into()).value_or(7), 7);
        assert_eq!(Field::<String>::Missing.value_or_default(), "");
    }
}
