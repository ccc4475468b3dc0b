/// Remote service clients.
///
/// Both services are reached over blocking HTTP with a shared
/// `reqwest::blocking::Client`. Workflows depend on the `PredictionService`
/// and `AlertFeed` traits rather than on HTTP directly, so they can be driven
/// by in-memory fakes in tests.
///
/// Submodules:
/// - `prediction` - sample submission and response decoding.
/// - `alerts`     - alert feed retrieval and record decoding.

pub mod alerts;
pub mod prediction;

use std::time::Duration;

use crate::config::Config;
use crate::input::WaterSample;
use crate::model::{AlertRecord, ClientError, PredictionResult};

/// Submits a sample and returns the model's prediction.
pub trait PredictionService {
    fn analyze(&self, sample: &WaterSample) -> Result<PredictionResult, ClientError>;
}

/// Fetches the current alert list.
pub trait AlertFeed {
    fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, ClientError>;
}

impl<T: PredictionService + ?Sized> PredictionService for &T {
    fn analyze(&self, sample: &WaterSample) -> Result<PredictionResult, ClientError> {
        (**self).analyze(sample)
    }
}

impl<T: AlertFeed + ?Sized> AlertFeed for &T {
    fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, ClientError> {
        (**self).fetch_alerts()
    }
}

/// HTTP client for both remote services.
pub struct ServiceClient {
    http: reqwest::blocking::Client,
    prediction_url: String,
    alerts_url: String,
}

impl ServiceClient {
    /// Builds a client from configuration. Every request is bounded by
    /// `request_timeout_secs`.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            prediction_url: config.prediction_service_url.clone(),
            alerts_url: config.alert_service_url.clone(),
        })
    }
}

impl PredictionService for ServiceClient {
    fn analyze(&self, sample: &WaterSample) -> Result<PredictionResult, ClientError> {
        prediction::submit_sample(&self.http, &self.prediction_url, sample)
    }
}

impl AlertFeed for ServiceClient {
    fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, ClientError> {
        alerts::fetch_alerts(&self.http, &self.alerts_url)
    }
}

/// Reads a response body, mapping non-2xx statuses to `HttpStatus` with the
/// service's `{"error": "..."}` message when one is present.
pub(crate) fn read_body(response: reqwest::blocking::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(ClientError::HttpStatus {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(body)
}

fn error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("error")?.as_str().map(String::from)
}
