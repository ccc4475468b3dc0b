/// Render instructions for the presentation layer.
///
/// Workflows never touch UI state. They return `RenderInstruction` values
/// that any front end can consume: serialized as JSON (tagged by `kind`) or
/// printed as plain text through `Display`, which is what the CLI does.

use std::fmt;

use serde::Serialize;

use crate::analysis::Verdict;
use crate::model::{AlertRecord, AlertSeverity, Status};
use crate::parameters;

/// Message shown when a submission fails for any reason.
pub const SUBMISSION_ERROR_MESSAGE: &str = "Error analyzing water sample. Please try again.";

/// Message shown in place of alert cards when the feed cannot be loaded.
pub const ALERTS_UNAVAILABLE_MESSAGE: &str = "Unable to load alerts. Please try again later.";

/// Alert timestamps are shown in UTC in this format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Verdict plus one status row per returned parameter, in response order.
    Analysis {
        verdict: Verdict,
        rows: Vec<ParameterRow>,
        contaminants: Vec<String>,
        /// Service-side analysis time, verbatim.
        analyzed_at: Option<String>,
    },
    AlertCards { cards: Vec<AlertCard> },
    ErrorBanner { message: String },
    Notice { message: String },
}

/// One row of the parameter table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRow {
    pub name: String,
    pub label: String,
    pub value: f64,
    pub unit: Option<&'static str>,
    pub status: Status,
    pub status_class: &'static str,
}

impl ParameterRow {
    pub fn new(name: &str, value: f64, status: Status) -> Self {
        let spec = parameters::find_parameter(name);
        ParameterRow {
            name: name.to_string(),
            label: parameters::display_name(name).to_string(),
            value,
            unit: spec.and_then(|s| s.unit),
            status,
            status_class: status.class(),
        }
    }
}

/// One alert, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertCard {
    pub location: String,
    pub parameter: String,
    pub value: f64,
    pub threshold: String,
    pub observed_at: String,
    pub severity: AlertSeverity,
    /// Extra visual class for the card; `None` for high severity.
    pub css_class: Option<&'static str>,
}

impl From<&AlertRecord> for AlertCard {
    fn from(alert: &AlertRecord) -> Self {
        AlertCard {
            location: alert.location.clone(),
            parameter: alert.parameter.clone(),
            value: alert.value,
            threshold: alert.threshold.to_string(),
            observed_at: alert.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            severity: alert.severity,
            css_class: severity_class(alert.severity),
        }
    }
}

/// Visual class for an alert card.
pub fn severity_class(severity: AlertSeverity) -> Option<&'static str> {
    match severity {
        AlertSeverity::High => None,
        AlertSeverity::Medium => Some("warning"),
        AlertSeverity::Low => Some("info"),
    }
}

// ---------------------------------------------------------------------------
// Plain-text rendering
// ---------------------------------------------------------------------------

impl fmt::Display for RenderInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderInstruction::Analysis {
                verdict,
                rows,
                contaminants,
                analyzed_at,
            } => {
                writeln!(f, "{}", verdict.label)?;
                writeln!(f, "  {} (safe share {:.1}%)", verdict.caption(), verdict.bar_percentage)?;
                writeln!(f)?;
                for row in rows {
                    let value = match row.unit {
                        Some(unit) => format!("{} {}", row.value, unit),
                        None => row.value.to_string(),
                    };
                    writeln!(f, "  {:<18} {:>14}  [{}]", row.label, value, row.status)?;
                }
                if !contaminants.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "  Flagged by service: {}", contaminants.join(", "))?;
                }
                if let Some(at) = analyzed_at {
                    writeln!(f, "  Analyzed at: {}", at)?;
                }
                Ok(())
            }
            RenderInstruction::AlertCards { cards } if cards.is_empty() => {
                writeln!(f, "No active alerts.")
            }
            RenderInstruction::AlertCards { cards } => {
                for card in cards {
                    writeln!(
                        f,
                        "[{}] {} - {}",
                        card.severity.as_str().to_uppercase(),
                        card.location,
                        card.parameter
                    )?;
                    writeln!(
                        f,
                        "    Value: {} (Threshold: {}) - {}",
                        card.value, card.threshold, card.observed_at
                    )?;
                }
                Ok(())
            }
            RenderInstruction::ErrorBanner { message } => writeln!(f, "✗ {}", message),
            RenderInstruction::Notice { message } => writeln!(f, "{}", message),
        }
    }
}
