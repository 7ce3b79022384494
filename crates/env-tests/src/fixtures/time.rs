//! Deserialization of the service's Java `LocalDateTime` timestamps.
//!
//! The service serializes `createdAt`/`updatedAt`/`completedAt` without a
//! timezone and with a varying number of fractional-second digits, e.g.
//! `2024-03-01T12:34:56.123456`. RFC 3339 with an offset is also accepted
//! in case the serializer configuration changes.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Parse a Java `LocalDateTime` string, falling back to RFC 3339.
pub fn parse_local_date_time(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Serde helper for `Option<NaiveDateTime>` fields. Null, absent, and empty
/// values all map to `None`; an unparseable non-empty string is an error.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_local_date_time(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("cannot parse timestamp: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_local_date_time_without_fraction() {
        let dt = parse_local_date_time("2024-03-01T12:34:56").expect("should parse");
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.second(), 56);
    }

    #[test]
    fn parses_local_date_time_with_microseconds() {
        let dt = parse_local_date_time("2024-03-01T12:34:56.123456").expect("should parse");
        assert_eq!(dt.and_utc().timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn parses_local_date_time_with_milliseconds() {
        let dt = parse_local_date_time("2024-03-01T12:34:56.123").expect("should parse");
        assert_eq!(dt.and_utc().timestamp_subsec_millis(), 123);
    }

    #[test]
    fn parses_rfc3339_fallback() {
        let dt = parse_local_date_time("2024-03-01T12:34:56Z").expect("should parse");
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_local_date_time("yesterday").is_none());
    }

    #[test]
    fn optional_field_accepts_null_and_missing() {
        #[derive(Deserialize)]
        struct Record {
            #[serde(default, deserialize_with = "deserialize_opt")]
            created_at: Option<NaiveDateTime>,
        }

        let with_null: Record = serde_json::from_str(r#"{"created_at": null}"#).expect("null ok");
        assert!(with_null.created_at.is_none());

        let missing: Record = serde_json::from_str("{}").expect("missing ok");
        assert!(missing.created_at.is_none());

        let present: Record =
            serde_json::from_str(r#"{"created_at": "2024-03-01T12:34:56"}"#).expect("value ok");
        assert!(present.created_at.is_some());
    }
}
