//! Placement of raw time steps onto a (year, month) cube.

use fluxrec_calendar::YearRange;
use ndarray::{Array3, Axis};
use tracing::debug;

use crate::annual::AnnualTable;
use crate::error::ResampleError;
use crate::grid::MonthlyGrid;

/// Monthly values laid out as `[year, month, column]`, NaN where no source
/// month exists.
#[derive(Debug, Clone)]
pub struct MonthlyCube {
    years: YearRange,
    data: Array3<f64>,
}

impl MonthlyCube {
    /// Year range of the cube.
    pub fn years(&self) -> YearRange {
        self.years
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Value at `(year index, month index 0..12, column)`.
    pub fn get(&self, year_idx: usize, month_idx: usize, column: usize) -> f64 {
        self.data[[year_idx, month_idx, column]]
    }

    /// Underlying array.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Averages the non-NaN months of each year.
    pub fn annual_mean(&self) -> AnnualTable {
        let (n_years, _, n_columns) = self.data.dim();
        let mut out = ndarray::Array2::from_elem((n_years, n_columns), f64::NAN);
        for y in 0..n_years {
            for c in 0..n_columns {
                let months: Vec<f64> = (0..12).map(|m| self.data[[y, m, c]]).collect();
                out[[y, c]] = fluxrec_stats::nan_mean(&months);
            }
        }
        AnnualTable::from_array(self.years, out)
    }
}

/// Places every time step of `grid` into its calendar month within `years`.
///
/// Time steps outside `years` are ignored. When several time steps fall in
/// the same month their non-NaN values are averaged.
///
/// # Errors
///
/// Returns [`ResampleError::Calendar`] if an offset cannot be placed on the
/// calendar (NaN or overflowing offsets).
#[tracing::instrument(skip_all, fields(n_steps = grid.n_steps(), n_columns = grid.n_columns()))]
pub fn resample_monthly(grid: &MonthlyGrid, years: YearRange) -> Result<MonthlyCube, ResampleError> {
    let n_columns = grid.n_columns();
    let shape = (years.len(), 12, n_columns);
    let mut sums = Array3::<f64>::zeros(shape);
    let mut counts = Array3::<u32>::zeros(shape);

    let mut n_placed = 0usize;
    for (t, &offset) in grid.offsets().iter().enumerate() {
        let ym = grid.axis().year_month(offset)?;
        let Some(y) = years.index_of(ym.year()) else {
            continue;
        };
        let m = ym.month_index();
        for (c, &v) in grid.row(t).iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            sums[[y, m, c]] += v;
            counts[[y, m, c]] += 1;
        }
        n_placed += 1;
    }

    if n_placed == 0 {
        debug!(
            start = years.start(),
            end = years.end(),
            "source grid does not overlap requested years"
        );
    }

    let data = ndarray::Zip::from(&sums)
        .and(&counts)
        .map_collect(|&s, &n| if n == 0 { f64::NAN } else { s / n as f64 });

    Ok(MonthlyCube { years, data })
}
