/// Core data types for the water-quality analysis client.
///
/// This module defines the shared domain model imported by all other modules:
/// parameters, threshold rules, statuses, prediction results, alert records,
/// and the client error type. It contains no I/O.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// The seven water-quality measurements understood by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Ph,
    Turbidity,
    DissolvedOxygen,
    Conductivity,
    Temperature,
    Chlorine,
    Nitrate,
}

impl Parameter {
    /// All parameters in submission order.
    pub const ALL: [Parameter; 7] = [
        Parameter::Ph,
        Parameter::Turbidity,
        Parameter::DissolvedOxygen,
        Parameter::Conductivity,
        Parameter::Temperature,
        Parameter::Chlorine,
        Parameter::Nitrate,
    ];

    /// Wire key used in request and response bodies.
    pub fn key(self) -> &'static str {
        match self {
            Parameter::Ph => "ph",
            Parameter::Turbidity => "turbidity",
            Parameter::DissolvedOxygen => "dissolved_oxygen",
            Parameter::Conductivity => "conductivity",
            Parameter::Temperature => "temperature",
            Parameter::Chlorine => "chlorine",
            Parameter::Nitrate => "nitrate",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single user-entered measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterReading {
    pub name: Parameter,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Threshold types
// ---------------------------------------------------------------------------

/// Acceptable range for a parameter. A missing bound is unbounded on that
/// side; registry entries always carry at least one bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRule {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ThresholdRule {
    pub const fn range(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    pub const fn at_least(min: f64) -> Self {
        Self { min: Some(min), max: None }
    }

    pub const fn at_most(max: f64) -> Self {
        Self { min: None, max: Some(max) }
    }
}

/// Tri-state safety status of a single measurement, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Status {
    Normal,
    Warning,
    Danger,
}

impl Status {
    /// Presentation class for the status badge.
    pub fn class(self) -> &'static str {
        match self {
            Status::Normal => "safe",
            Status::Warning => "warning",
            Status::Danger => "danger",
        }
    }

    /// Badge text.
    pub fn label(self) -> &'static str {
        match self {
            Status::Normal => "Normal",
            Status::Warning => "Warning",
            Status::Danger => "Danger",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Service result types
// ---------------------------------------------------------------------------

/// Model output for one submitted sample.
///
/// `safe_probability + contaminant_probability` is expected to be close to 1
/// but this is not checked. `parameters` keeps the order of the response body.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub predicted_safe: bool,
    pub safe_probability: f64,
    pub contaminant_probability: f64,
    pub parameters: IndexMap<String, f64>,
    /// Parameters the service itself flagged, when it reports them.
    pub contaminants: Vec<String>,
    /// Service-side analysis timestamp, passed through verbatim.
    pub analyzed_at: Option<String>,
}

/// Alert severity as reported by the alert feed. Anything other than
/// `high` or `medium` is treated as `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::High => "high",
            AlertSeverity::Medium => "medium",
            AlertSeverity::Low => "low",
        }
    }
}

impl From<String> for AlertSeverity {
    fn from(s: String) -> Self {
        match s.as_str() {
            "high" => AlertSeverity::High,
            "medium" => AlertSeverity::Medium,
            _ => AlertSeverity::Low,
        }
    }
}

/// Alert threshold as sent by the feed: a single limit or a range string
/// such as `"6.5-8.5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertThreshold {
    Value(f64),
    Text(String),
}

impl fmt::Display for AlertThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertThreshold::Value(v) => write!(f, "{}", v),
            AlertThreshold::Text(s) => f.write_str(s),
        }
    }
}

/// One record from the alert feed. Rendered immediately, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    pub location: String,
    pub parameter: String,
    pub value: f64,
    pub threshold: AlertThreshold,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while submitting a sample or loading alerts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The service could not be reached, or the request timed out.
    #[error("Transport error: {0}")]
    Transport(String),
    /// Non-2xx HTTP response, with the service's `error` field if present.
    #[error("HTTP error: {status}{}", service_message_suffix(.message))]
    HttpStatus { status: u16, message: Option<String> },
    /// The response body could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),
    /// A submitted field did not hold a usable number.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
}

fn service_message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(" ({})", m)).unwrap_or_default()
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::HttpStatus { status: status.as_u16(), message: None }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}
