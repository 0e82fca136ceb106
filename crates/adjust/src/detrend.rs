//! Z-normalisation of point-estimate series.

use fluxrec_flux::{FluxTensor, SeriesRegistry};
use fluxrec_stats::{nan_mean, nan_std};
use ndarray::Axis;

use crate::error::AdjustError;

/// Replaces every series/group column with its z-score over non-NaN years.
///
/// The standard deviation is the population one. A column with zero
/// deviation, or with no data, becomes all NaN. Percentage errors are
/// cleared since they no longer describe the normalised values.
///
/// # Errors
///
/// Returns [`AdjustError::IntervalData`] for the first series that carries
/// any min or max, before any series is modified.
#[tracing::instrument(skip_all)]
pub fn detrend(tensor: &mut FluxTensor, registry: &SeriesRegistry) -> Result<(), AdjustError> {
    let (n_series, n_years, n_groups) = tensor.dim();

    for s in 0..n_series {
        if !tensor.series_has_bounds(s) {
            continue;
        }
        for y in 0..n_years {
            for g in 0..n_groups {
                if !tensor.min()[[s, y, g]].is_nan() || !tensor.max()[[s, y, g]].is_nan() {
                    return Err(AdjustError::IntervalData {
                        cell: tensor.cell_ref(registry, s, y, g),
                    });
                }
            }
        }
    }

    let mut column = Vec::with_capacity(n_years);
    for s in 0..n_series {
        for g in 0..n_groups {
            column.clear();
            column.extend((0..n_years).map(|y| tensor.value()[[s, y, g]]));
            let mean = nan_mean(&column);
            let sd = nan_std(&column);
            for y in 0..n_years {
                let v = &mut tensor.value_mut()[[s, y, g]];
                *v = if sd > 0.0 { (*v - mean) / sd } else { f64::NAN };
            }
        }
        tensor
            .error_mut()
            .index_axis_mut(Axis(0), s)
            .fill(f64::NAN);
    }

    tracing::info!(n_series, "detrended");
    Ok(())
}
