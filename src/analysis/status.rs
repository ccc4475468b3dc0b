//! Parameter status classification.
//!
//! Each bound of a parameter's rule is checked independently. Exceeding a
//! bound by up to 10% of its value is a Warning; beyond that band it is a
//! Danger. The band is fixed and not configurable.

use crate::model::{Status, ThresholdRule};
use crate::parameters;

/// Lower bounds scale down by this factor to find the danger threshold.
const LOWER_DANGER_FACTOR: f64 = 0.9;

/// Upper bounds scale up by this factor to find the danger threshold.
const UPPER_DANGER_FACTOR: f64 = 1.1;

/// Classifies `value` for the parameter named `name`.
///
/// Unknown parameter names have no rule and always classify as Normal.
pub fn classify(name: &str, value: f64) -> Status {
    match parameters::lookup(name) {
        Some(rule) => classify_against(rule, value),
        None => Status::Normal,
    }
}

/// Classifies `value` against an explicit rule.
///
/// A `min` of exactly 0 puts the danger threshold on the bound itself, so any
/// negative value is Danger with no Warning band in between.
pub fn classify_against(rule: &ThresholdRule, value: f64) -> Status {
    let below = rule.min.and_then(|min| lower_bound_status(min, value));
    let above = rule.max.and_then(|max| upper_bound_status(max, value));

    below
        .into_iter()
        .chain(above)
        .max()
        .unwrap_or(Status::Normal)
}

fn lower_bound_status(min: f64, value: f64) -> Option<Status> {
    (value < min).then(|| {
        if value < min * LOWER_DANGER_FACTOR {
            Status::Danger
        } else {
            Status::Warning
        }
    })
}

fn upper_bound_status(max: f64, value: f64) -> Option<Status> {
    (value > max).then(|| {
        if value > max * UPPER_DANGER_FACTOR {
            Status::Danger
        } else {
            Status::Warning
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::PARAMETER_REGISTRY;

    // --- Normal -------------------------------------------------------------

    #[test]
    fn test_values_inside_range_are_normal() {
        for spec in PARAMETER_REGISTRY {
            let key = spec.parameter.key();
            let inside = match (spec.rule.min, spec.rule.max) {
                (Some(min), Some(max)) => (min + max) / 2.0,
                (Some(min), None) => min * 5.0,
                (None, Some(max)) => max / 2.0,
                (None, None) => unreachable!("registry rules always have a bound"),
            };
            assert_eq!(classify(key, inside), Status::Normal, "{} at {}", key, inside);
        }
    }

    #[test]
    fn test_values_exactly_on_a_bound_are_normal() {
        // Violation is strictly outside the bound.
        assert_eq!(classify("ph", 6.5), Status::Normal);
        assert_eq!(classify("ph", 8.5), Status::Normal);
        assert_eq!(classify("turbidity", 5.0), Status::Normal);
        assert_eq!(classify("dissolved_oxygen", 6.0), Status::Normal);
    }

    #[test]
    fn test_undefined_bound_is_unbounded() {
        assert_eq!(classify("dissolved_oxygen", 1_000.0), Status::Normal);
        assert_eq!(classify("turbidity", -50.0), Status::Normal);
        assert_eq!(classify("nitrate", 0.0), Status::Normal);
    }

    #[test]
    fn test_unknown_parameter_is_always_normal() {
        for value in [-1e9, -1.0, 0.0, 7.0, 1e9] {
            assert_eq!(classify("salinity", value), Status::Normal);
        }
    }

    // --- Upper bound --------------------------------------------------------

    #[test]
    fn test_turbidity_examples() {
        assert_eq!(classify("turbidity", 4.9), Status::Normal);
        assert_eq!(classify("turbidity", 5.4), Status::Warning);
        assert_eq!(classify("turbidity", 6.0), Status::Danger);
    }

    #[test]
    fn test_upper_tolerance_band_edges() {
        // max * 1.1 for conductivity is 1100; the band edge itself is Warning.
        assert_eq!(classify("conductivity", 1001.0), Status::Warning);
        assert_eq!(classify("conductivity", 1000.0 * UPPER_DANGER_FACTOR), Status::Warning);
        assert_eq!(classify("conductivity", 1101.0), Status::Danger);
    }

    // --- Lower bound --------------------------------------------------------

    #[test]
    fn test_ph_examples() {
        // min * 0.9 = 5.85
        assert_eq!(classify("ph", 6.0), Status::Warning);
        assert_eq!(classify("ph", 5.8), Status::Danger);
    }

    #[test]
    fn test_lower_tolerance_band_edges() {
        assert_eq!(classify("dissolved_oxygen", 5.9), Status::Warning);
        assert_eq!(classify("dissolved_oxygen", 6.0 * LOWER_DANGER_FACTOR), Status::Warning);
        assert_eq!(classify("dissolved_oxygen", 5.3), Status::Danger);
        assert_eq!(classify("chlorine", 0.19), Status::Warning);
        assert_eq!(classify("chlorine", 0.1), Status::Danger);
    }

    #[test]
    fn test_two_sided_rule_checks_both_sides() {
        assert_eq!(classify("temperature", 9.5), Status::Warning);
        assert_eq!(classify("temperature", 5.0), Status::Danger);
        assert_eq!(classify("temperature", 32.0), Status::Warning);
        assert_eq!(classify("temperature", 40.0), Status::Danger);
    }

    // --- Degenerate rules ---------------------------------------------------

    #[test]
    fn test_zero_minimum_collapses_warning_band() {
        let rule = ThresholdRule::at_least(0.0);
        assert_eq!(classify_against(&rule, 0.0), Status::Normal);
        assert_eq!(classify_against(&rule, -0.001), Status::Danger);
    }

    #[test]
    fn test_danger_wins_when_both_sides_fire() {
        // Inverted bounds can only come from a hand-built rule; both checks
        // fire and the more severe outcome is kept.
        // 5.0 is far below 10 (Danger) but only just above 4.9 (Warning).
        let rule = ThresholdRule::range(10.0, 4.9);
        assert_eq!(classify_against(&rule, 5.0), Status::Danger);
        let rule = ThresholdRule::range(5.2, 5.0);
        assert_eq!(classify_against(&rule, 5.1), Status::Warning);
    }

    #[test]
    fn test_nan_violates_no_bound() {
        assert_eq!(classify("ph", f64::NAN), Status::Normal);
    }
}
