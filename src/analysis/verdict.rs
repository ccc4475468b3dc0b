//! Result aggregation: model output to safety verdict.

use serde::Serialize;

pub const SAFE_LABEL: &str = "Water is SAFE to drink";
pub const CONTAMINATED_LABEL: &str = "WARNING: Water is CONTAMINATED";

/// Semantic colour tag for the verdict. The presentation layer maps it to
/// actual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Safe,
    Danger,
}

/// Human-facing judgment derived from one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub label: &'static str,
    pub tone: Tone,
    /// Probability of the predicted class, as a percentage to one decimal.
    pub display_percentage: f64,
    /// Safe probability as a percentage, whichever class was predicted.
    pub bar_percentage: f64,
}

impl Verdict {
    /// Short caption such as `83.0% safe` or `90.0% contaminated`.
    pub fn caption(&self) -> String {
        let class = match self.tone {
            Tone::Safe => "safe",
            Tone::Danger => "contaminated",
        };
        format!("{:.1}% {}", self.display_percentage, class)
    }
}

/// Builds the verdict for a prediction.
///
/// Probabilities are not range-checked; whatever the service sends is scaled
/// and rounded as is.
pub fn aggregate(predicted_safe: bool, safe_probability: f64, contaminant_probability: f64) -> Verdict {
    let safe_pct = to_percentage(safe_probability);
    if predicted_safe {
        Verdict {
            label: SAFE_LABEL,
            tone: Tone::Safe,
            display_percentage: safe_pct,
            bar_percentage: safe_pct,
        }
    } else {
        Verdict {
            label: CONTAMINATED_LABEL,
            tone: Tone::Danger,
            display_percentage: to_percentage(contaminant_probability),
            bar_percentage: safe_pct,
        }
    }
}

fn to_percentage(probability: f64) -> f64 {
    (probability * 1000.0).round() / 10.0
}
