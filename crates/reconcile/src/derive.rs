//! Per-cell conversions between the two uncertainty representations.

/// `(min, max)` from a value and its percentage error.
///
/// Uses `|value|` so that negative fluxes still get `min <= max`.
pub fn bounds_from_percent(value: f64, error: f64) -> (f64, f64) {
    let half = value.abs() * error / 100.0;
    (value - half, value + half)
}

/// Percentage error from a value and its bounds, assuming symmetry.
///
/// NaN where `value` is zero or NaN.
pub fn percent_from_bounds(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        return f64::NAN;
    }
    0.5 * (max - min) / value.abs() * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bounds_are_ordered_for_negative_values() {
        let (lo, hi) = bounds_from_percent(-2.0, 10.0);
        assert_relative_eq!(lo, -2.2, epsilon = 1e-12);
        assert_relative_eq!(hi, -1.8, epsilon = 1e-12);
    }

    #[test]
    fn percent_round_trips() {
        for (v, e) in [(1.0, 10.0), (-3.5, 42.0), (1e-3, 0.5)] {
            let (lo, hi) = bounds_from_percent(v, e);
            assert_relative_eq!(percent_from_bounds(v, lo, hi), e, max_relative = 1e-9);
        }
    }

    #[test]
    fn asymmetric_bounds_are_averaged() {
        assert_relative_eq!(percent_from_bounds(1.0, 0.5, 1.1), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_value_gives_nan() {
        assert!(percent_from_bounds(0.0, -1.0, 1.0).is_nan());
        assert!(percent_from_bounds(f64::NAN, -1.0, 1.0).is_nan());
    }
}
