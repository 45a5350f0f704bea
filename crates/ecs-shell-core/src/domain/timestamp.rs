//! Timestamp normalization for `startedAt`.
//!
//! The control plane is loose about this field: it can be missing, an RFC 3339
//! string (`...Z` or with an explicit offset), or epoch seconds depending on the
//! CLI output mode. Everything is folded into a `DateTime<Utc>` here so the
//! selectors only ever compare fully-typed values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `startedAt` exactly as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),

    /// Seconds since the UNIX epoch (fractional part allowed).
    Epoch(f64),

    /// Any other JSON shape. Kept so decoding never fails on this field.
    Other(serde_json::Value),
}

impl RawTimestamp {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

/// Value used for missing or unreadable timestamps. Loses to every real one.
pub const MIN_TIMESTAMP: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// Normalize a raw `startedAt`.
///
/// Never fails: absent, unparsable or oddly-typed values become [`MIN_TIMESTAMP`].
pub fn normalize(raw: Option<&RawTimestamp>) -> DateTime<Utc> {
    match raw {
        Some(RawTimestamp::Text(s)) => parse_text(s).unwrap_or(MIN_TIMESTAMP),
        Some(RawTimestamp::Epoch(secs)) => from_epoch(*secs).unwrap_or(MIN_TIMESTAMP),
        Some(RawTimestamp::Other(_)) | None => MIN_TIMESTAMP,
    }
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    // `Z` → `+00:00`
    let owned;
    let s = match s.strip_suffix('Z') {
        Some(head) => {
            owned = format!("{head}+00:00");
            owned.as_str()
        }
        None => s,
    };

    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn from_epoch(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1_000_000_000.0).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[rstest]
    #[case::zulu("2024-01-01T00:00:00Z", utc(2024, 1, 1, 0, 0, 0))]
    #[case::explicit_offset("2024-01-01T09:00:00+09:00", utc(2024, 1, 1, 0, 0, 0))]
    #[case::fractional("2024-03-05T10:20:30.123456Z", utc(2024, 3, 5, 10, 20, 30) + chrono::Duration::microseconds(123456))]
    #[case::space_separator("2024-01-01 12:00:00+00:00", utc(2024, 1, 1, 12, 0, 0))]
    fn parses_offset_aware_text(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(normalize(Some(&RawTimestamp::text(input))), expected);
    }

    #[rstest]
    #[case::garbage(RawTimestamp::text("yesterday"))]
    #[case::empty(RawTimestamp::text(""))]
    #[case::naive(RawTimestamp::text("2024-01-01T00:00:00"))]
    #[case::boolean(RawTimestamp::Other(serde_json::json!(true)))]
    #[case::object(RawTimestamp::Other(serde_json::json!({"t": 1})))]
    #[case::not_finite(RawTimestamp::Epoch(f64::NAN))]
    fn unreadable_values_become_the_minimum(#[case] raw: RawTimestamp) {
        assert_eq!(normalize(Some(&raw)), MIN_TIMESTAMP);
    }

    #[test]
    fn missing_value_is_the_minimum() {
        assert_eq!(normalize(None), MIN_TIMESTAMP);
    }

    #[test]
    fn epoch_seconds_are_structured_timestamps() {
        let ts = normalize(Some(&RawTimestamp::Epoch(1_704_067_200.5)));
        assert_eq!(ts, utc(2024, 1, 1, 0, 0, 0) + chrono::Duration::milliseconds(500));
    }

    #[test]
    fn decodes_every_wire_shape() {
        let v: Vec<RawTimestamp> =
            serde_json::from_str(r#"["2024-01-01T00:00:00Z", 1704067200.0, null, [1]]"#).unwrap();
        assert!(matches!(v[0], RawTimestamp::Text(_)));
        assert!(matches!(v[1], RawTimestamp::Epoch(_)));
        assert!(matches!(v[2], RawTimestamp::Other(serde_json::Value::Null)));
        assert!(matches!(v[3], RawTimestamp::Other(_)));
    }

    #[test]
    fn real_timestamp_beats_the_minimum() {
        let real = normalize(Some(&RawTimestamp::text("1970-01-01T00:00:00Z")));
        assert!(real > MIN_TIMESTAMP);
    }
}
