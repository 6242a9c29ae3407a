//! Boundary parsing for fields the backend serializes inconsistently.
//!
//! Numbers may arrive as JSON numbers, numeric strings or null, ids as
//! strings or integers, lists as arrays or null. Everything is normalized
//! here once so the rest of the crate only sees typed values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Parse a numeric string the way the listing backend writes them
/// ("1250000", " 1,250,000 ", "95.5").
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse an ISO date or datetime. Date-only values are midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        NumberOrText::Number(n) => Some(n),
        NumberOrText::Text(s) => parse_number(&s),
        NumberOrText::Other(_) => None,
    }))
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        NumberOrText::Text(s) => parse_timestamp(&s),
        NumberOrText::Number(ms) => DateTime::from_timestamp_millis(ms as i64),
        NumberOrText::Other(_) => None,
    }))
}

pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Integer(n)) => n.to_string(),
        None => String::new(),
    })
}

pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// List of records where one unreadable entry is skipped with a warning
/// instead of failing the whole list. A non-array value is still an error.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, "skipping unreadable record: {}", e);
                None
            }
        })
        .collect())
}

/// Optional string; numbers are stringified, anything else is dropped
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn numeric_strings_are_parsed() {
        assert_eq!(parse_number("1250000"), Some(1_250_000.0));
        assert_eq!(parse_number(" 1,250,000 "), Some(1_250_000.0));
        assert_eq!(parse_number("95.5"), Some(95.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("on request"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn date_only_timestamps_are_midnight_utc() {
        let ts = parse_timestamp("2024-02-01").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 2, 1));
        assert_eq!(ts.timestamp() % 86_400, 0);

        let with_zone = parse_timestamp("2024-02-01T10:00:00.000Z").unwrap();
        assert_eq!(with_zone.timestamp() - ts.timestamp(), 10 * 3600);

        let without_zone = parse_timestamp("2024-02-01T10:00:00").unwrap();
        assert_eq!(without_zone, with_zone);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "number")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "id")]
        id: String,
        #[serde(default, deserialize_with = "list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "optional_text")]
        note: Option<String>,
    }

    #[derive(Deserialize)]
    struct Batch {
        #[serde(default, deserialize_with = "records")]
        items: Vec<Sample>,
    }

    #[test]
    fn unreadable_records_are_skipped() {
        let batch: Batch =
            serde_json::from_str(r#"{"items": [{"id": 1}, "garbage", {"id": "two"}]}"#).unwrap();
        let ids: Vec<&str> = batch.items.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "two"]);

        let batch: Batch = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(batch.items.is_empty());

        assert!(serde_json::from_str::<Batch>(r#"{"items": {"id": 1}}"#).is_err());
    }

    #[test]
    fn mixed_wire_values_normalize() {
        let sample: Sample =
            serde_json::from_str(r#"{"price": "150000", "id": 42, "tags": null}"#).unwrap();
        assert_eq!(sample.price, Some(150_000.0));
        assert_eq!(sample.id, "42");
        assert!(sample.tags.is_empty());
        assert_eq!(sample.note, None);

        let sample: Sample = serde_json::from_str(r#"{"note": 7}"#).unwrap();
        assert_eq!(sample.note.as_deref(), Some("7"));

        let sample: Sample = serde_json::from_str(r#"{"price": true}"#).unwrap();
        assert_eq!(sample.price, None);
        assert_eq!(sample.id, "");
    }
}
