//! Annual table produced by resampling.

use fluxrec_calendar::YearRange;
use ndarray::{Array2, ArrayView1, Axis};

/// One value per `(year, column)` over a fixed year range.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualTable {
    years: YearRange,
    data: Array2<f64>,
}

impl AnnualTable {
    pub(crate) fn from_array(years: YearRange, data: Array2<f64>) -> Self {
        Self { years, data }
    }

    /// All-NaN table of the given shape.
    pub fn nan(years: YearRange, n_columns: usize) -> Self {
        Self {
            years,
            data: Array2::from_elem((years.len(), n_columns), f64::NAN),
        }
    }

    /// Year range of the table.
    pub fn years(&self) -> YearRange {
        self.years
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Value at `(year index, column)`.
    pub fn value(&self, year_idx: usize, column: usize) -> f64 {
        self.data[[year_idx, column]]
    }

    /// Column `c` across all years.
    pub fn column(&self, column: usize) -> ArrayView1<'_, f64> {
        self.data.column(column)
    }

    /// Underlying `[year, column]` array.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Mutable access to the underlying array.
    pub fn data_mut(&mut self) -> &mut Array2<f64> {
        &mut self.data
    }

    /// Consumes the table and returns the array.
    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Returns `true` if every value is NaN.
    pub fn is_all_nan(&self) -> bool {
        self.data.iter().all(|v| v.is_nan())
    }
}
