//! Lenient decoders for documents written by earlier versions of the app,
//! which stored ids as epoch-millisecond numbers and amounts as free text.

use serde::{de::Error as _, Deserialize, Deserializer};
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(f64),
    Text(String),
}

/// Accepts a UUID string or a legacy numeric id.
pub fn record_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    match RawScalar::deserialize(deserializer)? {
        RawScalar::Number(value) => Ok(legacy_id(value)),
        RawScalar::Text(text) => Uuid::parse_str(text.trim())
            .or_else(|_| text.trim().parse::<f64>().map(legacy_id))
            .map_err(|_| D::Error::custom(format!("invalid record id `{text}`"))),
    }
}

/// Accepts a JSON number or a numeric string.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawScalar::deserialize(deserializer)? {
        RawScalar::Number(value) => Ok(value),
        RawScalar::Text(text) => parse_decimal(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid amount `{text}`"))),
    }
}

/// Like [`amount`] but coerces anything unusable to zero.
pub fn balance<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Number(value)) => value,
        Some(RawScalar::Text(text)) => parse_decimal(&text).unwrap_or(0.0),
        None => 0.0,
    };
    Ok(sanitize_balance(value))
}

/// Reads `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses `1234.56`, `1234,56`, `1,234.56` or `1.234,56`. When both separators
/// appear, the last one is the decimal point and the other groups thousands.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = match (trimmed.rfind(','), trimmed.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => trimmed.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => trimmed.replace(',', ""),
        (Some(_), None) => trimmed.replace(',', "."),
        _ => trimmed.to_string(),
    };
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn sanitize_balance(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn legacy_id(value: f64) -> Uuid {
    Uuid::from_u64_pair(0, value.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "record_id")]
        id: Uuid,
        #[serde(deserialize_with = "amount")]
        value: f64,
    }

    #[test]
    fn legacy_numeric_ids_map_to_stable_uuids() {
        let first: Probe = serde_json::from_str(r#"{"id": 1709600000000, "value": 10}"#).unwrap();
        let second: Probe =
            serde_json::from_str(r#"{"id": "1709600000000", "value": "10"}"#).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.value, 10.0);
        assert!(!first.id.is_nil());
    }

    #[test]
    fn fractional_ids_from_copied_months_are_distinct() {
        let a: Probe = serde_json::from_str(r#"{"id": 1709600000000.25, "value": 1}"#).unwrap();
        let b: Probe = serde_json::from_str(r#"{"id": 1709600000000.5, "value": 1}"#).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn uuid_ids_round_trip() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id": "{id}", "value": 2.5}}"#);
        let probe: Probe = serde_json::from_str(&json).unwrap();
        assert_eq!(probe.id, id);
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let err = serde_json::from_str::<Probe>(r#"{"id": 1, "value": "abc"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn decimal_parsing_accepts_comma_separator() {
        assert_eq!(parse_decimal("12,50"), Some(12.5));
        assert_eq!(parse_decimal("1,234.50"), Some(1234.5));
        assert_eq!(parse_decimal("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal("1.234.567,5"), Some(1234567.5));
        assert_eq!(parse_decimal("1,5,0"), None);
        assert_eq!(parse_decimal(" "), None);
        assert_eq!(parse_decimal("NaN"), None);
    }
}
