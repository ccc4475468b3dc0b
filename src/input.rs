/// Sample input parsing.
///
/// Converts the seven raw text fields a user enters into the typed request
/// body the prediction service expects. Every field is a float except
/// conductivity, which the service takes as an integer.

use serde::Serialize;

use crate::model::{ClientError, Parameter, ParameterReading};

/// Raw, unparsed form fields for one sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSample {
    pub ph: String,
    pub turbidity: String,
    pub dissolved_oxygen: String,
    pub conductivity: String,
    pub temperature: String,
    pub chlorine: String,
    pub nitrate: String,
}

/// A parsed sample, serialized as the prediction request body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaterSample {
    pub ph: f64,
    pub turbidity: f64,
    pub dissolved_oxygen: f64,
    pub conductivity: i64,
    pub temperature: f64,
    pub chlorine: f64,
    pub nitrate: f64,
}

impl WaterSample {
    /// The sample as one reading per parameter, in submission order.
    pub fn readings(&self) -> Vec<ParameterReading> {
        Parameter::ALL
            .into_iter()
            .map(|name| ParameterReading { name, value: self.value(name) })
            .collect()
    }

    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Turbidity => self.turbidity,
            Parameter::DissolvedOxygen => self.dissolved_oxygen,
            Parameter::Conductivity => self.conductivity as f64,
            Parameter::Temperature => self.temperature,
            Parameter::Chlorine => self.chlorine,
            Parameter::Nitrate => self.nitrate,
        }
    }
}

impl TryFrom<&RawSample> for WaterSample {
    type Error = ClientError;

    fn try_from(raw: &RawSample) -> Result<Self, Self::Error> {
        Ok(WaterSample {
            ph: parse_float("ph", &raw.ph)?,
            turbidity: parse_float("turbidity", &raw.turbidity)?,
            dissolved_oxygen: parse_float("dissolved_oxygen", &raw.dissolved_oxygen)?,
            conductivity: parse_integer("conductivity", &raw.conductivity)?,
            temperature: parse_float("temperature", &raw.temperature)?,
            chlorine: parse_float("chlorine", &raw.chlorine)?,
            nitrate: parse_float("nitrate", &raw.nitrate)?,
        })
    }
}

/// Parses a finite float. Surrounding whitespace is ignored.
pub fn parse_float(field: &'static str, raw: &str) -> Result<f64, ClientError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(field, raw))
}

/// Parses an integer. Decimal text is accepted and truncated toward zero,
/// so `"1250.9"` submits as 1250.
pub fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ClientError> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v);
    }
    let v = parse_float(field, raw)?;
    if v.abs() >= i64::MAX as f64 {
        return Err(invalid(field, raw));
    }
    Ok(v.trunc() as i64)
}

fn invalid(field: &'static str, raw: &str) -> ClientError {
    ClientError::InvalidInput { field, value: raw.to_string() }
}
