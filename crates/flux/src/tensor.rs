//! The `[series, year, group]` tensor.

use std::fmt;

use fluxrec_calendar::YearRange;
use ndarray::{Array3, ArrayView2, Axis, Zip, s};

use crate::block::SeriesBlock;
use crate::error::FluxError;
use crate::series::SeriesRegistry;

/// Coordinates of one tensor cell, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    /// Series name.
    pub series: String,
    /// Calendar year.
    pub year: i32,
    /// Plot group name.
    pub group: String,
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "series '{}', year {}, group '{}'",
            self.series, self.year, self.group
        )
    }
}

/// Value, percentage error, min and max arrays indexed by
/// `(series, year, group)`. All four always share one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxTensor {
    years: YearRange,
    groups: Vec<String>,
    value: Array3<f64>,
    error: Array3<f64>,
    min: Array3<f64>,
    max: Array3<f64>,
}

/// Mutable borrows of the four arrays at once.
pub type TensorPartsMut<'a> = (
    &'a mut Array3<f64>,
    &'a mut Array3<f64>,
    &'a mut Array3<f64>,
    &'a mut Array3<f64>,
);

impl FluxTensor {
    /// All-NaN tensor for `n_series` series over `years` and `groups`.
    pub fn new(n_series: usize, years: YearRange, groups: Vec<String>) -> Self {
        let nan = Array3::from_elem((n_series, years.len(), groups.len()), f64::NAN);
        Self {
            years,
            groups,
            value: nan.clone(),
            error: nan.clone(),
            min: nan.clone(),
            max: nan,
        }
    }

    /// `(n_series, n_years, n_groups)`.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.value.dim()
    }

    /// Year grid.
    pub fn years(&self) -> YearRange {
        self.years
    }

    /// Plot group names, in column order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Column index of plot group `name`.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g == name)
    }

    /// Values.
    pub fn value(&self) -> &Array3<f64> {
        &self.value
    }

    /// Percentage errors.
    pub fn error(&self) -> &Array3<f64> {
        &self.error
    }

    /// Lower bounds.
    pub fn min(&self) -> &Array3<f64> {
        &self.min
    }

    /// Upper bounds.
    pub fn max(&self) -> &Array3<f64> {
        &self.max
    }

    /// Mutable values.
    pub fn value_mut(&mut self) -> &mut Array3<f64> {
        &mut self.value
    }

    /// Mutable errors.
    pub fn error_mut(&mut self) -> &mut Array3<f64> {
        &mut self.error
    }

    /// Mutable lower bounds.
    pub fn min_mut(&mut self) -> &mut Array3<f64> {
        &mut self.min
    }

    /// Mutable upper bounds.
    pub fn max_mut(&mut self) -> &mut Array3<f64> {
        &mut self.max
    }

    /// Mutable value, error, min and max together.
    pub fn parts_mut(&mut self) -> TensorPartsMut<'_> {
        (
            &mut self.value,
            &mut self.error,
            &mut self.min,
            &mut self.max,
        )
    }

    /// `[year, group]` view of one series' values.
    pub fn series_value(&self, series: usize) -> ArrayView2<'_, f64> {
        self.value.index_axis(Axis(0), series)
    }

    /// Overwrites series `series` with a `[year, group]` block.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::ShapeMismatch`] if the block is not
    /// `(n_years, n_groups)`.
    pub fn set_series(&mut self, series: usize, block: &SeriesBlock) -> Result<(), FluxError> {
        let (_, n_years, n_groups) = self.dim();
        if block.dim() != (n_years, n_groups) {
            return Err(FluxError::ShapeMismatch {
                field: "series block",
                expected: vec![n_years, n_groups],
                got: vec![block.dim().0, block.dim().1],
            });
        }
        self.value.slice_mut(s![series, .., ..]).assign(block.value());
        self.error.slice_mut(s![series, .., ..]).assign(block.error());
        self.min.slice_mut(s![series, .., ..]).assign(block.min());
        self.max.slice_mut(s![series, .., ..]).assign(block.max());
        Ok(())
    }

    /// Copies series `series` out as a `[year, group]` block.
    pub fn series_block(&self, series: usize) -> SeriesBlock {
        let take = |a: &Array3<f64>| a.index_axis(Axis(0), series).to_owned();
        SeriesBlock::from_parts(
            take(&self.value),
            take(&self.error),
            take(&self.min),
            take(&self.max),
        )
    }

    /// Named coordinates of a cell, for diagnostics.
    pub fn cell_ref(
        &self,
        registry: &SeriesRegistry,
        series: usize,
        year: usize,
        group: usize,
    ) -> CellRef {
        CellRef {
            series: registry.name_at(series).to_string(),
            year: self.years.year_at(year).unwrap_or(self.years.start() + year as i32),
            group: self.groups.get(group).cloned().unwrap_or_default(),
        }
    }

    /// Returns `true` if series `series` has no value in any cell.
    pub fn series_is_all_nan(&self, series: usize) -> bool {
        self.series_value(series).iter().all(|v| v.is_nan())
    }

    /// Returns `true` if series `series` has any populated min or max.
    pub fn series_has_bounds(&self, series: usize) -> bool {
        let populated = |a: &Array3<f64>| a.index_axis(Axis(0), series).iter().any(|v| !v.is_nan());
        populated(&self.min) || populated(&self.max)
    }

    /// Number of NaN value cells.
    pub fn nan_value_cells(&self) -> usize {
        self.value.iter().filter(|v| v.is_nan()).count()
    }

    /// Treats an exact zero value as "no data": the value and its error,
    /// min and max become NaN. Restricted to one series when `series` is
    /// given. Returns the number of cells remapped.
    pub fn remap_zero_values(&mut self, series: Option<usize>) -> usize {
        let mut n = 0usize;
        let mut remap = |v: &mut f64, e: &mut f64, lo: &mut f64, hi: &mut f64| {
            if *v == 0.0 {
                *v = f64::NAN;
                *e = f64::NAN;
                *lo = f64::NAN;
                *hi = f64::NAN;
                n += 1;
            }
        };
        match series {
            Some(sidx) => Zip::from(self.value.index_axis_mut(Axis(0), sidx))
                .and(self.error.index_axis_mut(Axis(0), sidx))
                .and(self.min.index_axis_mut(Axis(0), sidx))
                .and(self.max.index_axis_mut(Axis(0), sidx))
                .for_each(|v, e, lo, hi| remap(v, e, lo, hi)),
            None => Zip::from(&mut self.value)
                .and(&mut self.error)
                .and(&mut self.min)
                .and(&mut self.max)
                .for_each(|v, e, lo, hi| remap(v, e, lo, hi)),
        }
        n
    }
}
