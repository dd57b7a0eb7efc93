use serde_json::Value;

/// Delimiter between the bounds of a range-valued field, e.g. `"100,000 .. 200,000"`.
const RANGE_DELIMITER: &str = "..";

/// Estimate a single number from a field that is either numeric or a textual range.
///
/// Ranges resolve to the midpoint of their bounds. Thousands separators and surrounding
/// whitespace are ignored. Anything that cannot be interpreted, including non-finite
/// values such as `"nan"` or `"inf"`, yields `None`.
#[must_use]
pub fn parse_range_estimate(value: Option<&Value>) -> Option<f64> {
    let estimate = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_range_str(s),
        _ => None,
    }?;

    // `-0` collapses to `0`.
    estimate.is_finite().then_some(estimate + 0.0)
}

fn parse_range_str(s: &str) -> Option<f64> {
    let s = s.replace(',', "");
    let s = s.trim();

    if let Some((low, high)) = s.split_once(RANGE_DELIMITER) {
        let low = low.trim().parse::<f64>().ok()?;
        let high = high.trim().parse::<f64>().ok()?;
        return Some((low + high) / 2.0);
    }

    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_midpoint() {
        assert_eq!(parse_range_estimate(Some(&json!("100,000 .. 200,000"))), Some(150_000.0));
    }

    #[test]
    fn test_range_without_spaces() {
        assert_eq!(parse_range_estimate(Some(&json!("0..20000"))), Some(10_000.0));
    }

    #[test]
    fn test_integer_value() {
        assert_eq!(parse_range_estimate(Some(&json!(102_151_578))), Some(102_151_578.0));
    }

    #[test]
    fn test_float_value() {
        assert_eq!(parse_range_estimate(Some(&json!(1.5))), Some(1.5));
    }

    #[test]
    fn test_plain_numeric_string() {
        assert_eq!(parse_range_estimate(Some(&json!(" 1,234,567 "))), Some(1_234_567.0));
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(parse_range_estimate(Some(&json!("not a number"))), None);
    }

    #[test]
    fn test_absent() {
        assert_eq!(parse_range_estimate(None), None);
        assert_eq!(parse_range_estimate(Some(&Value::Null)), None);
    }

    #[test]
    fn test_range_with_bad_bound() {
        assert_eq!(parse_range_estimate(Some(&json!("100 .. lots"))), None);
        assert_eq!(parse_range_estimate(Some(&json!(".. 200"))), None);
    }

    #[test]
    fn test_non_finite_is_none() {
        assert_eq!(parse_range_estimate(Some(&json!("nan"))), None);
        assert_eq!(parse_range_estimate(Some(&json!("inf"))), None);
        assert_eq!(parse_range_estimate(Some(&json!("-inf .. 10"))), None);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let estimate = parse_range_estimate(Some(&json!("-0"))).unwrap();
        assert!(estimate.is_sign_positive());
        assert_eq!(estimate.to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn test_other_types() {
        assert_eq!(parse_range_estimate(Some(&json!(true))), None);
        assert_eq!(parse_range_estimate(Some(&json!([100, 200]))), None);
        assert_eq!(parse_range_estimate(Some(&json!({ "low": 1 }))), None);
    }
}
