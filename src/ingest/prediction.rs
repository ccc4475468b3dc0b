/// Prediction Service client.
///
/// Posts one sample as JSON and decodes the model's answer. The response's
/// `parameters` object is kept in body order, which is the order rows are
/// displayed in.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::input::WaterSample;
use crate::model::{ClientError, PredictionResult};

// ============================================================================
// Response Structures
// ============================================================================

/// Body returned by the analyze endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    /// 0 means safe, anything else contaminated.
    pub prediction: f64,
    pub safe_probability: f64,
    pub contaminant_probability: f64,
    pub parameters: IndexMap<String, f64>,
    #[serde(default)]
    pub contaminants: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl From<PredictionResponse> for PredictionResult {
    fn from(r: PredictionResponse) -> Self {
        PredictionResult {
            predicted_safe: r.prediction == 0.0,
            safe_probability: r.safe_probability,
            contaminant_probability: r.contaminant_probability,
            parameters: r.parameters,
            contaminants: r.contaminants,
            analyzed_at: r.timestamp,
        }
    }
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Submits `sample` to the analyze endpoint at `url`.
pub fn submit_sample(
    client: &reqwest::blocking::Client,
    url: &str,
    sample: &WaterSample,
) -> Result<PredictionResult, ClientError> {
    let response = client
        .post(url)
        .header("Accept", "application/json")
        .json(sample)
        .send()?;

    let body = super::read_body(response)?;
    parse_prediction_response(&body)
}

/// Decodes an analyze response body.
pub fn parse_prediction_response(body: &str) -> Result<PredictionResult, ClientError> {
    let response: PredictionResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

// ============================================================================
// Tests
// ============================================================================
