/// Alert Feed Service client.
///
/// Retrieves the active alert list as a JSON array. Timestamps arrive either
/// as ISO 8601 text (with or without an offset) or as epoch numbers; all are
/// normalized to UTC here so the rest of the crate deals in instants only.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::model::{AlertRecord, AlertSeverity, AlertThreshold, ClientError};

/// Epoch values at or above this are taken as milliseconds (the seconds
/// reading would land after the year 5000).
const EPOCH_MILLIS_CUTOFF: u64 = 100_000_000_000;

/// Offset-less layouts accepted after RFC 3339, tried in order. All read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ============================================================================
// Response Structures
// ============================================================================

/// One alert as sent by the feed.
#[derive(Debug, Deserialize)]
pub struct AlertEntry {
    pub location: String,
    pub parameter: String,
    pub value: f64,
    pub threshold: AlertThreshold,
    pub severity: AlertSeverity,
    pub timestamp: RawTimestamp,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Epoch(i64),
    /// Fractional epoch, e.g. `1714568400.5` from a Python `time.time()`.
    EpochFloat(f64),
    Text(String),
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Fetches all active alerts from `url`.
pub fn fetch_alerts(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Vec<AlertRecord>, ClientError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()?;

    let body = super::read_body(response)?;
    parse_alerts_response(&body)
}

/// Decodes an alert feed body. A single bad record fails the whole feed.
pub fn parse_alerts_response(body: &str) -> Result<Vec<AlertRecord>, ClientError> {
    let entries: Vec<AlertEntry> = serde_json::from_str(body)?;
    entries.into_iter().map(parse_entry).collect()
}

fn parse_entry(entry: AlertEntry) -> Result<AlertRecord, ClientError> {
    Ok(AlertRecord {
        timestamp: parse_timestamp(&entry.timestamp)?,
        location: entry.location,
        parameter: entry.parameter,
        value: entry.value,
        threshold: entry.threshold,
        severity: entry.severity,
    })
}

/// Normalizes a feed timestamp to UTC.
///
/// Text without an offset is read as UTC; a bare date is midnight UTC.
pub fn parse_timestamp(raw: &RawTimestamp) -> Result<DateTime<Utc>, ClientError> {
    match raw {
        RawTimestamp::Epoch(n) if n.unsigned_abs() >= EPOCH_MILLIS_CUTOFF => Utc
            .timestamp_millis_opt(*n)
            .single()
            .ok_or_else(|| bad_timestamp(&n.to_string())),
        RawTimestamp::Epoch(n) => Utc
            .timestamp_opt(*n, 0)
            .single()
            .ok_or_else(|| bad_timestamp(&n.to_string())),
        RawTimestamp::EpochFloat(v) => {
            parse_fractional_epoch(*v).ok_or_else(|| bad_timestamp(&v.to_string()))
        }
        RawTimestamp::Text(s) => parse_text_timestamp(s).ok_or_else(|| bad_timestamp(s)),
    }
}

fn parse_fractional_epoch(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    let secs = if value.abs() >= EPOCH_MILLIS_CUTOFF as f64 {
        value / 1000.0
    } else {
        value
    };
    let whole = secs.floor();
    if whole.abs() >= i64::MAX as f64 {
        return None;
    }
    let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
    Utc.timestamp_opt(whole as i64, nanos).single()
}

fn parse_text_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn bad_timestamp(raw: &str) -> ClientError {
    ClientError::Parse(format!("unparseable alert timestamp: {}", raw))
}

// ============================================================================
// Tests
// ============================================================================
