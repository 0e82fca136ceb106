//! Tensor-wide reconciliation.

use fluxrec_flux::{FluxTensor, SeriesRegistry};
use ndarray::{Array3, Zip};

use crate::derive::{bounds_from_percent, percent_from_bounds};
use crate::error::ReconcileError;

/// Which representation a cell's uncertainty was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UncertaintySource {
    /// No uncertainty, or no value.
    #[default]
    None,
    /// Percentage error; min/max were derived.
    Percent,
    /// Min/max bounds; the percentage error was derived.
    Bounds,
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileReport {
    sources: Array3<UncertaintySource>,
    zeroed: usize,
    cleared: usize,
}

impl ReconcileReport {
    /// Provenance of cell `(series, year, group)`.
    pub fn source(&self, series: usize, year: usize, group: usize) -> UncertaintySource {
        self.sources[[series, year, group]]
    }

    /// Per-cell provenance.
    pub fn sources(&self) -> &Array3<UncertaintySource> {
        &self.sources
    }

    /// Cells whose zero value was remapped to NaN.
    pub fn zeroed(&self) -> usize {
        self.zeroed
    }

    /// Cells with no value whose leftover error or bounds were cleared.
    pub fn cleared(&self) -> usize {
        self.cleared
    }

    /// Cells whose bounds were derived from a percentage error.
    pub fn from_percent(&self) -> usize {
        self.count(UncertaintySource::Percent)
    }

    /// Cells whose percentage error was derived from bounds.
    pub fn from_bounds(&self) -> usize {
        self.count(UncertaintySource::Bounds)
    }

    fn count(&self, which: UncertaintySource) -> usize {
        self.sources.iter().filter(|s| **s == which).count()
    }
}

/// Verifies and completes the uncertainty of every cell in place.
///
/// Fails on the first cell where min and max disagree on presence, or where
/// a percentage error coexists with bounds. Then remaps zero values to NaN,
/// clears any uncertainty left on cells without a value, and derives
/// whichever representation is missing.
///
/// # Errors
///
/// [`ReconcileError::MinMaxMismatch`] or
/// [`ReconcileError::ConflictingUncertainty`], naming the cell.
#[tracing::instrument(skip_all)]
pub fn reconcile(
    tensor: &mut FluxTensor,
    registry: &SeriesRegistry,
) -> Result<ReconcileReport, ReconcileError> {
    check(tensor, registry)?;

    let zeroed = tensor.remap_zero_values(None);

    let mut sources = Array3::from_elem(tensor.dim(), UncertaintySource::None);
    let mut cleared = 0usize;
    let (value, error, min, max) = tensor.parts_mut();
    Zip::from(&mut sources)
        .and(&*value)
        .and(error)
        .and(min)
        .and(max)
        .for_each(|src, &v, e, lo, hi| {
            if v.is_nan() {
                if !(e.is_nan() && lo.is_nan() && hi.is_nan()) {
                    *e = f64::NAN;
                    *lo = f64::NAN;
                    *hi = f64::NAN;
                    cleared += 1;
                }
                return;
            }
            if !e.is_nan() && lo.is_nan() {
                (*lo, *hi) = bounds_from_percent(v, *e);
                *src = UncertaintySource::Percent;
            } else if !lo.is_nan() && e.is_nan() {
                *e = percent_from_bounds(v, *lo, *hi);
                *src = UncertaintySource::Bounds;
            }
        });

    let report = ReconcileReport {
        sources,
        zeroed,
        cleared,
    };
    tracing::info!(
        zeroed,
        cleared,
        from_percent = report.from_percent(),
        from_bounds = report.from_bounds(),
        "reconciled uncertainty"
    );
    Ok(report)
}

fn check(tensor: &FluxTensor, registry: &SeriesRegistry) -> Result<(), ReconcileError> {
    for ((s, y, g), &lo) in tensor.min().indexed_iter() {
        let hi = tensor.max()[[s, y, g]];
        if lo.is_nan() != hi.is_nan() {
            let (present, missing) = if lo.is_nan() {
                ("max", "min")
            } else {
                ("min", "max")
            };
            return Err(ReconcileError::MinMaxMismatch {
                cell: tensor.cell_ref(registry, s, y, g),
                present,
                missing,
            });
        }
        if !lo.is_nan() && !tensor.error()[[s, y, g]].is_nan() {
            return Err(ReconcileError::ConflictingUncertainty {
                cell: tensor.cell_ref(registry, s, y, g),
            });
        }
    }
    Ok(())
}
