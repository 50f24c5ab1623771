pub(crate) mod alert;
pub(crate) mod highlights;
pub(crate) mod matches;
pub(crate) mod news;
pub(crate) mod streams;

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::StartZone;
use crate::error::{FeedError, Result};

pub use highlights::map_highlight;
pub use matches::{map_match, map_match_in};
pub use news::fallback_articles;
pub use streams::slug_from_details_url;

const OFFSET_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Fetch a URL and decode its body as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<T> {
    send_json(client.get(url), url, timeout).await
}

/// Send a prepared request and decode the response body as JSON.
///
/// The whole exchange (connect, status, body) is bounded by `timeout`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
    timeout: Duration,
) -> Result<T> {
    debug!(url, "fetching feed");

    let exchange = async {
        let response = request.send().await.map_err(|e| FeedError::Http {
            url: url.to_owned(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        response.text().await.map_err(|e| FeedError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })
    };

    let body = tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| FeedError::Timeout {
            url: url.to_owned(),
            timeout,
        })??;

    serde_json::from_str(&body).map_err(|e| FeedError::Decode {
        url: url.to_owned(),
        source: e,
    })
}

/// Flatten a feed payload that is either a bare array or an object holding
/// the list under `key`. Anything else yields no items.
pub(crate) fn list_items(payload: Value, key: &str) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove(key) {
            Some(Value::Array(items)) => items,
            _ => vec![],
        },
        _ => vec![],
    }
}

/// First non-blank text value among `keys`. Numbers are rendered as text.
pub(crate) fn text_field(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Leading numeric part of a value, the way a lenient float parse reads `"2.5h"`.
pub(crate) fn number_field(raw: &Value, key: &str) -> Option<f64> {
    match raw.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }
}

fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = 0;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'0'..=b'9' => end = i + 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        i += 1;
    }

    // An exponent only counts when the mantissa had digits and the exponent does too.
    if end > 0 && matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let digits = bytes[j..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            end = j + digits;
        }
    }

    s[..end].parse().ok()
}

pub(crate) fn string_list_field(raw: &Value, key: &str) -> Option<Vec<String>> {
    let items = raw.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::to_string)
            .collect(),
    )
}

/// Read a feed timestamp.
///
/// Accepts RFC 3339, date-times with a `+hhmm` or `+hh:mm` offset, date-times
/// without an offset (placed in `zone`), bare dates (UTC midnight) and epoch
/// milliseconds.
pub(crate) fn parse_timestamp(raw: &Value, zone: StartZone) -> Option<DateTime<Utc>> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|ms| ms.is_finite()).map(|ms| ms.trunc() as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .ok()
                .or_else(|| {
                    OFFSET_TIMESTAMP_FORMATS
                        .iter()
                        .find_map(|format| DateTime::parse_from_str(s, format).ok())
                })
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|| {
                    NAIVE_TIMESTAMP_FORMATS
                        .iter()
                        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
                        .map(|naive| zone.resolve(naive))
                })
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                        .map(|midnight| midnight.and_utc())
                })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    use super::*;

    #[test]
    fn list_items_accepts_both_shapes() {
        assert_eq!(list_items(json!([1, 2]), "matches").len(), 2);
        assert_eq!(list_items(json!({"matches": [1, 2, 3]}), "matches").len(), 3);
        assert!(list_items(json!({"other": [1]}), "matches").is_empty());
        assert!(list_items(json!({"matches": "nope"}), "matches").is_empty());
        assert!(list_items(json!(null), "matches").is_empty());
    }

    #[test]
    fn text_field_skips_blank_values() {
        let raw = json!({"a": "  ", "b": "Lord's", "id": 42});
        assert_eq!(text_field(&raw, &["a", "b"]).as_deref(), Some("Lord's"));
        assert_eq!(text_field(&raw, &["id"]).as_deref(), Some("42"));
        assert_eq!(text_field(&raw, &["missing"]), None);
    }

    #[test]
    fn number_field_coerces_strings() {
        let raw = json!({"a": "2.5", "b": 3, "c": "1.75 hours", "d": "abc", "e": true});
        assert_eq!(number_field(&raw, "a"), Some(2.5));
        assert_eq!(number_field(&raw, "b"), Some(3.0));
        assert_eq!(number_field(&raw, "c"), Some(1.75));
        assert_eq!(number_field(&raw, "d"), None);
        assert_eq!(number_field(&raw, "e"), None);
    }

    #[test]
    fn leading_float_reads_exponents() {
        assert_eq!(parse_leading_float("1e1"), Some(10.0));
        assert_eq!(parse_leading_float("2.5E-1h"), Some(0.25));
        assert_eq!(parse_leading_float("-3e+2"), Some(-300.0));
        assert_eq!(parse_leading_float("4e"), Some(4.0));
        assert_eq!(parse_leading_float("5e+x"), Some(5.0));
        assert_eq!(parse_leading_float("e5"), None);
        assert_eq!(parse_leading_float("-"), None);
    }

    fn kathmandu() -> StartZone {
        StartZone::Fixed(FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap())
    }

    #[test]
    fn parses_supported_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 5, 2, 14, 30, 0).unwrap();
        for raw in [
            json!("2026-05-02T14:30:00Z"),
            json!("2026-05-02T20:00:00+05:30"),
            json!("2026-05-02T20:00:00+0530"),
            json!("2026-05-02 20:00+05:30"),
            json!(expected.timestamp_millis()),
            json!(expected.timestamp_millis() as f64 + 0.75),
        ] {
            assert_eq!(parse_timestamp(&raw, kathmandu()), Some(expected), "{raw}");
        }
        assert_eq!(parse_timestamp(&json!("next tuesday"), StartZone::Utc), None);
        assert_eq!(parse_timestamp(&json!(null), StartZone::Utc), None);
    }

    #[test]
    fn offsetless_times_use_the_configured_zone() {
        let expected = Utc.with_ymd_and_hms(2026, 4, 10, 14, 0, 0).unwrap();
        assert_eq!(
            parse_timestamp(&json!("2026-04-10T19:45:00"), kathmandu()),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp(&json!("2026-04-10 19:45"), kathmandu()),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp(&json!("2026-04-10T19:45"), StartZone::Utc),
            Some(Utc.with_ymd_and_hms(2026, 4, 10, 19, 45, 0).unwrap())
        );
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        assert_eq!(
            parse_timestamp(&json!("2026-04-10"), kathmandu()),
            Some(Utc.with_ymd_and_hms(2026, 4, 10, 0, 0, 0).unwrap())
        );
    }
}
