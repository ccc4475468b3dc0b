/// Parameter registry for the water-quality client.
///
/// Defines the canonical list of measurements the prediction service accepts,
/// with their display labels, units, and acceptable-range rules. This is the
/// single source of truth for thresholds; other modules look rules up here
/// rather than hardcoding them.

use crate::model::{Parameter, ThresholdRule};

// ---------------------------------------------------------------------------
// Parameter metadata
// ---------------------------------------------------------------------------

/// Metadata for a single measured parameter.
pub struct ParameterSpec {
    pub parameter: Parameter,
    /// Human-readable label for result tables.
    pub display_name: &'static str,
    /// Measurement unit, if the quantity has one.
    pub unit: Option<&'static str>,
    /// Acceptable range. Loaded once, never mutated.
    pub rule: ThresholdRule,
}

/// All recognized parameters, in submission order.
///
/// Ranges follow simplified WHO drinking-water guidance.
pub static PARAMETER_REGISTRY: &[ParameterSpec] = &[
    ParameterSpec {
        parameter: Parameter::Ph,
        display_name: "pH Level",
        unit: None,
        rule: ThresholdRule::range(6.5, 8.5),
    },
    ParameterSpec {
        parameter: Parameter::Turbidity,
        display_name: "Turbidity",
        unit: Some("NTU"),
        rule: ThresholdRule::at_most(5.0),
    },
    ParameterSpec {
        parameter: Parameter::DissolvedOxygen,
        display_name: "Dissolved Oxygen",
        unit: Some("mg/L"),
        rule: ThresholdRule::at_least(6.0),
    },
    ParameterSpec {
        parameter: Parameter::Conductivity,
        display_name: "Conductivity",
        unit: Some("μS/cm"),
        rule: ThresholdRule::at_most(1000.0),
    },
    ParameterSpec {
        parameter: Parameter::Temperature,
        display_name: "Temperature",
        unit: Some("°C"),
        rule: ThresholdRule::range(10.0, 30.0),
    },
    ParameterSpec {
        parameter: Parameter::Chlorine,
        display_name: "Chlorine",
        unit: Some("mg/L"),
        rule: ThresholdRule::range(0.2, 4.0),
    },
    ParameterSpec {
        parameter: Parameter::Nitrate,
        display_name: "Nitrate",
        unit: Some("mg/L"),
        rule: ThresholdRule::at_most(10.0),
    },
];

/// Looks up a parameter by its wire key. Returns `None` if not recognized.
pub fn find_parameter(name: &str) -> Option<&'static ParameterSpec> {
    PARAMETER_REGISTRY.iter().find(|s| s.parameter.key() == name)
}

/// Returns the threshold rule for `name`, or `None` for unknown parameters.
///
/// `None` is not an error: callers classify unknown parameters as Normal.
pub fn lookup(name: &str) -> Option<&'static ThresholdRule> {
    find_parameter(name).map(|s| &s.rule)
}

/// Display label for `name`, falling back to the raw key.
pub fn display_name(name: &str) -> &str {
    find_parameter(name).map(|s| s.display_name).unwrap_or(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_parameter_once() {
        assert_eq!(PARAMETER_REGISTRY.len(), Parameter::ALL.len());
        let mut seen = std::collections::HashSet::new();
        for spec in PARAMETER_REGISTRY {
            assert!(
                seen.insert(spec.parameter),
                "duplicate registry entry for '{}'",
                spec.parameter
            );
        }
    }

    #[test]
    fn test_every_rule_has_at_least_one_bound() {
        for spec in PARAMETER_REGISTRY {
            assert!(
                spec.rule.min.is_some() || spec.rule.max.is_some(),
                "rule for '{}' must bound at least one side",
                spec.parameter
            );
        }
    }

    #[test]
    fn test_bounds_are_ordered_where_both_defined() {
        // min >= max would make every value violate one side.
        for spec in PARAMETER_REGISTRY {
            if let (Some(min), Some(max)) = (spec.rule.min, spec.rule.max) {
                assert!(min < max, "min must be below max for '{}'", spec.parameter);
            }
        }
    }

    #[test]
    fn test_lookup_returns_expected_table() {
        assert_eq!(lookup("ph"), Some(&ThresholdRule::range(6.5, 8.5)));
        assert_eq!(lookup("turbidity"), Some(&ThresholdRule::at_most(5.0)));
        assert_eq!(lookup("dissolved_oxygen"), Some(&ThresholdRule::at_least(6.0)));
        assert_eq!(lookup("conductivity"), Some(&ThresholdRule::at_most(1000.0)));
        assert_eq!(lookup("temperature"), Some(&ThresholdRule::range(10.0, 30.0)));
        assert_eq!(lookup("chlorine"), Some(&ThresholdRule::range(0.2, 4.0)));
        assert_eq!(lookup("nitrate"), Some(&ThresholdRule::at_most(10.0)));
    }

    #[test]
    fn test_lookup_returns_none_for_unknown_name() {
        assert!(lookup("salinity").is_none());
        assert!(lookup("").is_none());
        // Keys are case-sensitive on the wire.
        assert!(lookup("PH").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_raw_key() {
        assert_eq!(display_name("ph"), "pH Level");
        assert_eq!(display_name("dissolved_oxygen"), "Dissolved Oxygen");
        assert_eq!(display_name("lead"), "lead");
    }

    #[test]
    fn test_registry_is_in_submission_order() {
        let keys: Vec<&str> = PARAMETER_REGISTRY.iter().map(|s| s.parameter.key()).collect();
        assert_eq!(
            keys,
            vec![
                "ph",
                "turbidity",
                "dissolved_oxygen",
                "conductivity",
                "temperature",
                "chlorine",
                "nitrate"
            ]
        );
    }
}
