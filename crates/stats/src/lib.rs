//! NaN-aware statistical helpers for the fluxrec pipeline.
//!
//! NaN is the "no data" marker throughout the workspace. Functions prefixed
//! `nan_` skip it; `strict_` functions propagate it.

/// Mean of the non-NaN values. Returns NaN if there are none.
pub fn nan_mean(data: &[f64]) -> f64 {
    let (sum, n) = data
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), &v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Population standard deviation (denominator N) of the non-NaN values.
///
/// Returns NaN if there are no values.
pub fn nan_std(data: &[f64]) -> f64 {
    let m = nan_mean(data);
    if m.is_nan() {
        return f64::NAN;
    }
    let (ss, n) = data
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), &v| (s + (v - m) * (v - m), n + 1));
    (ss / n as f64).sqrt()
}

/// Arithmetic mean that propagates NaN: any NaN input yields NaN.
///
/// Returns NaN for an empty slice.
pub fn strict_mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Minimum that propagates NaN. Returns NaN for an empty slice.
pub fn strict_min(data: &[f64]) -> f64 {
    strict_fold(data, f64::min)
}

/// Maximum that propagates NaN. Returns NaN for an empty slice.
pub fn strict_max(data: &[f64]) -> f64 {
    strict_fold(data, f64::max)
}

fn strict_fold(data: &[f64], f: fn(f64, f64) -> f64) -> f64 {
    let mut iter = data.iter().copied();
    let Some(first) = iter.next() else {
        return f64::NAN;
    };
    // f64::min/max ignore NaN, so it has to be checked explicitly.
    iter.try_fold(first, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            None
        } else {
            Some(f(acc, v))
        }
    })
    .filter(|v| !v.is_nan())
    .unwrap_or(f64::NAN)
}

/// Replaces NaN with zero.
pub fn nan_to_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

/// Returns `true` if every value is NaN (or the slice is empty).
pub fn all_nan(data: &[f64]) -> bool {
    data.iter().all(|v| v.is_nan())
}

/// Converts a relative error back to an absolute one: `error * value`.
///
/// Sign is irrelevant downstream because the result is squared.
pub fn absolute_error(relative: f64, value: f64) -> f64 {
    relative * value
}

/// Accumulates absolute errors in quadrature and normalises once at the end.
///
/// Squares are summed as terms arrive; the square root and the division by
/// the combined value happen only in [`finish`](Self::finish), so repeated
/// additions do not compound rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quadrature {
    sum_sq: f64,
}

impl Quadrature {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an accumulator from an already-summed square total.
    pub fn from_sum_sq(sum_sq: f64) -> Self {
        Self { sum_sq }
    }

    /// Adds one absolute error term.
    pub fn add(&mut self, absolute: f64) {
        self.sum_sq += absolute * absolute;
    }

    /// Running sum of squares.
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// `sqrt(sum_sq) / |total|`, or NaN where `total` is zero or NaN.
    pub fn finish(&self, total: f64) -> f64 {
        relative_from_sum_sq(self.sum_sq, total)
    }
}

/// `sqrt(sum_sq) / |total|`, defined only where `total` is non-zero and
/// non-NaN; NaN otherwise.
pub fn relative_from_sum_sq(sum_sq: f64, total: f64) -> f64 {
    if total.is_nan() || total == 0.0 {
        f64::NAN
    } else {
        sum_sq.sqrt() / total.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nan_mean_skips_nan() {
        assert_relative_eq!(nan_mean(&[1.0, f64::NAN, 3.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_mean_all_nan() {
        assert!(nan_mean(&[f64::NAN, f64::NAN]).is_nan());
        assert!(nan_mean(&[]).is_nan());
    }

    #[test]
    fn test_nan_std_population() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(nan_std(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_std_ignores_nan() {
        let data = [2.0, f64::NAN, 4.0];
        assert_relative_eq!(nan_std(&data), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_strict_mean_propagates_nan() {
        assert!(strict_mean(&[2.0, 3.0, f64::NAN]).is_nan());
        assert_relative_eq!(strict_mean(&[2.0, 3.0]), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_strict_min_max() {
        assert_eq!(strict_min(&[3.0, -1.0, 2.0]), -1.0);
        assert_eq!(strict_max(&[3.0, -1.0, 2.0]), 3.0);
        assert!(strict_min(&[3.0, f64::NAN, 2.0]).is_nan());
        assert!(strict_max(&[f64::NAN, 1.0]).is_nan());
        assert!(strict_max(&[]).is_nan());
    }

    #[test]
    fn test_nan_to_zero() {
        assert_eq!(nan_to_zero(f64::NAN), 0.0);
        assert_eq!(nan_to_zero(-2.5), -2.5);
    }

    #[test]
    fn test_quadrature_two_terms() {
        // 10% of 1.0 and 20% of 0.1, expressed as fractions.
        let mut q = Quadrature::new();
        q.add(absolute_error(0.1, 1.0));
        q.add(absolute_error(0.2, 0.1));
        let expected = (0.1_f64.powi(2) + 0.02_f64.powi(2)).sqrt() / 1.1;
        assert_relative_eq!(q.finish(1.1), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_quadrature_undefined_total() {
        let mut q = Quadrature::new();
        q.add(1.0);
        assert!(q.finish(0.0).is_nan());
        assert!(q.finish(f64::NAN).is_nan());
    }

    #[test]
    fn test_quadrature_negative_total() {
        let q = Quadrature::from_sum_sq(4.0);
        assert_relative_eq!(q.finish(-4.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_all_nan() {
        assert!(all_nan(&[f64::NAN]));
        assert!(!all_nan(&[f64::NAN, 0.0]));
    }
}
