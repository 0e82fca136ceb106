//! Subtracting removal series from flagged series.

use fluxrec_flux::{FluxTensor, SeriesRegistry};
use fluxrec_stats::nan_to_zero;
use ndarray::{Array2, Axis, Zip};

use crate::error::AdjustError;

/// Subtracts the sum of `removals` from every series flagged for
/// correction, returning the number of series corrected.
///
/// Removals count as zero where NaN. Values and bounds shift by the
/// removal; the absolute error is kept and re-expressed as a percentage of
/// the corrected value. Cells that reach exactly zero become NaN, and each
/// corrected series' label gains a `(net of ...)` suffix. Removal series
/// themselves are never corrected.
///
/// # Errors
///
/// Returns [`AdjustError::UnknownRemoval`] if a removal is not registered.
#[tracing::instrument(skip(tensor, registry))]
pub fn apply_correction(
    tensor: &mut FluxTensor,
    registry: &mut SeriesRegistry,
    removals: &[String],
) -> Result<usize, AdjustError> {
    let removal_idx = removals
        .iter()
        .map(|name| {
            registry
                .index_of(name)
                .map_err(|_| AdjustError::UnknownRemoval { name: name.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (_, n_years, n_groups) = tensor.dim();
    let mut removal = Array2::<f64>::zeros((n_years, n_groups));
    for &r in &removal_idx {
        Zip::from(&mut removal)
            .and(tensor.value().index_axis(Axis(0), r))
            .for_each(|acc, &v| *acc += nan_to_zero(v));
    }

    let targets: Vec<usize> = registry
        .iter()
        .enumerate()
        .filter(|(s, meta)| meta.correct() && !removal_idx.contains(s))
        .map(|(s, _)| s)
        .collect();

    let suffix = format!(" (net of {})", removals.join(", "));
    for &s in &targets {
        {
            let (value, error, min, max) = tensor.parts_mut();
            Zip::from(value.index_axis_mut(Axis(0), s))
                .and(error.index_axis_mut(Axis(0), s))
                .and(min.index_axis_mut(Axis(0), s))
                .and(max.index_axis_mut(Axis(0), s))
                .and(&removal)
                .for_each(|v, e, lo, hi, &r| {
                    let absolute = v.abs() * *e;
                    *v -= r;
                    *lo -= r;
                    *hi -= r;
                    *e = if v.is_nan() || *v == 0.0 {
                        f64::NAN
                    } else {
                        absolute / v.abs()
                    };
                });
        }
        let zeroed = tensor.remap_zero_values(Some(s));
        if let Some(meta) = registry.get_mut(s) {
            let label = format!("{}{suffix}", meta.label());
            tracing::debug!(series = meta.name(), label = %label, zeroed, "corrected series");
            meta.set_label(label);
        }
    }

    tracing::info!(n_corrected = targets.len(), "correction applied");
    Ok(targets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fluxrec_calendar::YearRange;
    use fluxrec_flux::{SeriesKind, SeriesMeta};

    fn setup() -> (FluxTensor, SeriesRegistry) {
        let registry = SeriesRegistry::new(vec![
            SeriesMeta::new("INV", SeriesKind::Inventory)
                .with_correct(true)
                .with_display_name("Inventory"),
            SeriesMeta::new("TD", SeriesKind::TopDown),
            SeriesMeta::new("Lakes", SeriesKind::Other),
        ])
        .unwrap();
        let mut t = FluxTensor::new(3, YearRange::new(2000, 2001).unwrap(), vec!["FRA".into()]);
        // INV: 10 +/- 10% (bounds 9..11) both years.
        for y in 0..2 {
            t.value_mut()[[0, y, 0]] = 10.0;
            t.error_mut()[[0, y, 0]] = 10.0;
            t.min_mut()[[0, y, 0]] = 9.0;
            t.max_mut()[[0, y, 0]] = 11.0;
            t.value_mut()[[1, y, 0]] = 7.0;
        }
        t.value_mut()[[2, 0, 0]] = 2.0;
        // Lakes missing in 2001.
        (t, registry)
    }

    #[test]
    fn subtracts_and_keeps_absolute_error() {
        let (mut t, mut reg) = setup();
        let n = apply_correction(&mut t, &mut reg, &["Lakes".to_string()]).unwrap();
        assert_eq!(n, 1);

        assert_relative_eq!(t.value()[[0, 0, 0]], 8.0, epsilon = 1e-12);
        assert_relative_eq!(t.min()[[0, 0, 0]], 7.0, epsilon = 1e-12);
        assert_relative_eq!(t.max()[[0, 0, 0]], 9.0, epsilon = 1e-12);
        // Absolute error 1.0 on a value of 8.0.
        assert_relative_eq!(t.error()[[0, 0, 0]], 12.5, epsilon = 1e-12);

        // NaN removal counts as zero.
        assert_relative_eq!(t.value()[[0, 1, 0]], 10.0, epsilon = 1e-12);
        assert_relative_eq!(t.error()[[0, 1, 0]], 10.0, epsilon = 1e-12);

        // Unflagged series untouched.
        assert_eq!(t.value()[[1, 0, 0]], 7.0);
    }

    #[test]
    fn relabels_corrected_series() {
        let (mut t, mut reg) = setup();
        apply_correction(&mut t, &mut reg, &["Lakes".to_string()]).unwrap();
        assert_eq!(reg.get(0).unwrap().label(), "Inventory (net of Lakes)");
        assert_eq!(reg.get(1).unwrap().label(), "TD");
    }

    #[test]
    fn exact_zero_becomes_nan() {
        let (mut t, mut reg) = setup();
        t.value_mut()[[2, 0, 0]] = 10.0;
        apply_correction(&mut t, &mut reg, &["Lakes".to_string()]).unwrap();
        assert!(t.value()[[0, 0, 0]].is_nan());
        assert!(t.min()[[0, 0, 0]].is_nan());
        assert!(t.error()[[0, 0, 0]].is_nan());
    }

    #[test]
    fn unknown_removal_is_fatal() {
        let (mut t, mut reg) = setup();
        let err = apply_correction(&mut t, &mut reg, &["Rivers".to_string()]).unwrap_err();
        assert_eq!(
            err,
            AdjustError::UnknownRemoval {
                name: "Rivers".to_string()
            }
        );
    }
}
