//! Raw monthly value grid.

use fluxrec_calendar::TimeAxis;

use crate::error::ResampleError;

/// A monthly value grid as delivered by a data source.
///
/// `values` is time-major: row `t` holds one value per column (country or
/// region code) for the time step at `offsets[t]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyGrid {
    axis: TimeAxis,
    offsets: Vec<f64>,
    n_columns: usize,
    values: Vec<f64>,
}

impl MonthlyGrid {
    /// Builds a grid, checking that `values` holds `offsets.len() * n_columns`
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::NoColumns`] if `n_columns` is zero and
    /// [`ResampleError::LengthMismatch`] on a shape mismatch.
    pub fn new(
        axis: TimeAxis,
        offsets: Vec<f64>,
        n_columns: usize,
        values: Vec<f64>,
    ) -> Result<Self, ResampleError> {
        if n_columns == 0 {
            return Err(ResampleError::NoColumns);
        }
        let expected = offsets.len() * n_columns;
        if values.len() != expected {
            return Err(ResampleError::LengthMismatch {
                field: "values",
                expected,
                got: values.len(),
            });
        }
        Ok(Self {
            axis,
            offsets,
            n_columns,
            values,
        })
    }

    /// The grid's time axis.
    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    /// Day offsets of each time step.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Number of time steps.
    pub fn n_steps(&self) -> usize {
        self.offsets.len()
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Values of time step `t`, one per column.
    pub fn row(&self, t: usize) -> &[f64] {
        &self.values[t * self.n_columns..(t + 1) * self.n_columns]
    }

    /// All values, time-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access to all values, e.g. for unit conversion.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> TimeAxis {
        TimeAxis::from_cf_units("days since 2000-01-01").unwrap()
    }

    #[test]
    fn rows_are_time_major() {
        let g = MonthlyGrid::new(axis(), vec![0.0, 31.0], 3, (0..6).map(f64::from).collect())
            .unwrap();
        assert_eq!(g.row(0), &[0.0, 1.0, 2.0]);
        assert_eq!(g.row(1), &[3.0, 4.0, 5.0]);
        assert_eq!(g.n_steps(), 2);
    }

    #[test]
    fn shape_mismatch() {
        let err = MonthlyGrid::new(axis(), vec![0.0, 31.0], 3, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            ResampleError::LengthMismatch {
                field: "values",
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn zero_columns() {
        let err = MonthlyGrid::new(axis(), vec![], 0, vec![]).unwrap_err();
        assert_eq!(err, ResampleError::NoColumns);
    }
}
