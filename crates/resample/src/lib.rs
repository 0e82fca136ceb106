//! Temporal resampling for the fluxrec pipeline.
//!
//! Converts a monthly value grid on an arbitrary day-offset time axis into a
//! fixed annual table over the run's year range.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌──────────────────┐     ┌────────────────┐
//!  │ MonthlyGrid  │────▶│  MonthlyCube     │────▶│  AnnualTable   │
//!  │ (T x C)      │     │  (Y x 12 x C)    │     │  (Y x C)       │
//!  └──────────────┘     └──────────────────┘     └────────────────┘
//! ```
//!
//! Months with no source time step stay NaN. A year's value is the mean of
//! its non-NaN months; a year with no months is NaN. A grid that does not
//! overlap the requested years yields an all-NaN table, not an error.
//!
//! # Quick start
//!
//! ```
//! use fluxrec_calendar::{TimeAxis, YearRange};
//! use fluxrec_resample::{MonthlyGrid, annualize};
//!
//! let axis = TimeAxis::from_cf_units("days since 2000-01-01").unwrap();
//! // Two months of a single column.
//! let grid = MonthlyGrid::new(axis, vec![0.0, 31.0], 1, vec![1.0, 3.0]).unwrap();
//! let years = YearRange::new(2000, 2000).unwrap();
//! let table = annualize(&grid, years).unwrap();
//! assert_eq!(table.value(0, 0), 2.0);
//! ```

mod annual;
mod error;
mod grid;
mod monthly;

pub use annual::AnnualTable;
pub use error::ResampleError;
pub use grid::MonthlyGrid;
pub use monthly::{MonthlyCube, resample_monthly};

use fluxrec_calendar::YearRange;

/// Resamples `grid` onto `years` and averages each year's months.
///
/// # Errors
///
/// Returns [`ResampleError`] if a time offset cannot be placed on the
/// calendar.
pub fn annualize(grid: &MonthlyGrid, years: YearRange) -> Result<AnnualTable, ResampleError> {
    Ok(resample_monthly(grid, years)?.annual_mean())
}
