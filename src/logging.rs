/// Structured logging for the water-quality client
///
/// Tags every event with the service it concerns and classifies failures
/// as expected (bad input, client-side 4xx) or unexpected (unreachable
/// service, 5xx, malformed bodies). Events go to the console and, when
/// configured, are appended to a log file.

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter, Layer};

use crate::model::ClientError;

// ---------------------------------------------------------------------------
// Service Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Prediction,
    AlertFeed,
    Input,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Prediction => write!(f, "PREDICT"),
            Service::AlertFeed => write!(f, "ALERTS"),
            Service::Input => write!(f, "INPUT"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Caused by what was sent, not by the service: bad input or a 4xx.
    Expected,
    /// Service unreachable, failing (5xx), or answering in an unknown shape.
    Unexpected,
    /// Cannot tell, e.g. a redirect or informational status.
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

pub fn classify_failure(err: &ClientError) -> FailureType {
    match err {
        ClientError::InvalidInput { .. } => FailureType::Expected,
        ClientError::HttpStatus { status, .. } if (400..500).contains(status) => {
            FailureType::Expected
        }
        ClientError::HttpStatus { status, .. } if *status >= 500 => FailureType::Unexpected,
        ClientError::HttpStatus { .. } => FailureType::Unknown,
        ClientError::Transport(_) | ClientError::Parse(_) => FailureType::Unexpected,
    }
}

// ---------------------------------------------------------------------------
// Logger Setup
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("invalid log filter {directive:?}: {source}")]
    Filter {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),
}

/// Parses a configured filter directive, rejecting malformed ones instead
/// of silently dropping them.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, LogInitError> {
    EnvFilter::try_new(directive).map_err(|source| LogInitError::Filter {
        directive: directive.to_string(),
        source,
    })
}

/// Installs the global subscriber.
///
/// `default_level` is a tracing filter directive (e.g. `info` or
/// `aquamon_client=debug`); a valid `RUST_LOG` overrides it. When `log_file`
/// is set, events are also appended there without ANSI colours. Calling this
/// twice keeps the first subscriber.
pub fn init_logger(
    default_level: &str,
    log_file: Option<&str>,
    console_timestamps: bool,
) -> Result<(), LogInitError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(default_level)?,
    };

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let console = tracing_fmt::layer().with_writer(std::io::stderr).with_target(false);
    let console = if console_timestamps {
        console.boxed()
    } else {
        console.without_time().boxed()
    };

    // Only fails when a global subscriber is already installed.
    if tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("logger already initialized; keeping existing subscriber");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Logs a service failure at a level matching its classification.
pub fn log_service_failure(service: Service, operation: &str, err: &ClientError) {
    let failure_type = classify_failure(err);
    let service = service.to_string();

    match failure_type {
        FailureType::Expected => {
            tracing::debug!(%service, operation, kind = %failure_type, error = %err, "request failed")
        }
        FailureType::Unexpected => {
            tracing::error!(%service, operation, kind = %failure_type, error = %err, "request failed")
        }
        FailureType::Unknown => {
            tracing::warn!(%service, operation, kind = %failure_type, error = %err, "request failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_classification() {
        let input = ClientError::InvalidInput { field: "ph", value: "x".to_string() };
        assert_eq!(classify_failure(&input), FailureType::Expected);

        let bad_request = ClientError::HttpStatus { status: 400, message: None };
        assert_eq!(classify_failure(&bad_request), FailureType::Expected);

        let server = ClientError::HttpStatus { status: 500, message: None };
        assert_eq!(classify_failure(&server), FailureType::Unexpected);

        let redirect = ClientError::HttpStatus { status: 304, message: None };
        assert_eq!(classify_failure(&redirect), FailureType::Unknown);

        let down = ClientError::Transport("connection refused".to_string());
        assert_eq!(classify_failure(&down), FailureType::Unexpected);
        assert_eq!(classify_failure(&ClientError::Parse("eof".into())), FailureType::Unexpected);
    }

    #[test]
    fn test_service_tags() {
        assert_eq!(Service::Prediction.to_string(), "PREDICT");
        assert_eq!(Service::AlertFeed.to_string(), "ALERTS");
    }

    #[test]
    fn test_malformed_filter_directive_is_rejected() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("aquamon_client=debug,reqwest=warn").is_ok());

        let err = parse_filter("aquamon_client=loud").unwrap_err();
        assert!(matches!(err, LogInitError::Filter { .. }));
        assert!(err.to_string().contains("aquamon_client=loud"));
    }

    #[test]
    fn test_init_logger_appends_to_file_and_tolerates_reinit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.log");
        let path = path.to_str().unwrap();
        init_logger("info", Some(path), true).expect("log file should open");
        init_logger("debug", None, false).expect("second init is a no-op");
        assert!(std::path::Path::new(path).exists());
    }
}
