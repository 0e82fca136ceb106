//! 2-D value/error/min/max quadruple.

use ndarray::Array2;

use crate::error::FluxError;
use crate::kind::UncertaintyForm;

/// Value, percentage error, min and max arrays of one series, laid out as
/// `[year, column]`. Absent representations are all-NaN.
///
/// Columns are raw country/region codes before aggregation and plot groups
/// after it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBlock {
    value: Array2<f64>,
    error: Array2<f64>,
    min: Array2<f64>,
    max: Array2<f64>,
}

impl SeriesBlock {
    /// All-NaN block.
    pub fn nan(n_years: usize, n_columns: usize) -> Self {
        let nan = Array2::from_elem((n_years, n_columns), f64::NAN);
        Self {
            value: nan.clone(),
            error: nan.clone(),
            min: nan.clone(),
            max: nan,
        }
    }

    /// Block with values only.
    pub fn from_value(value: Array2<f64>) -> Self {
        let nan = Array2::from_elem(value.dim(), f64::NAN);
        Self {
            value,
            error: nan.clone(),
            min: nan.clone(),
            max: nan,
        }
    }

    /// Builds a block from four arrays of identical shape.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::ShapeMismatch`] if any array's shape differs from
    /// `value`'s.
    pub fn new(
        value: Array2<f64>,
        error: Array2<f64>,
        min: Array2<f64>,
        max: Array2<f64>,
    ) -> Result<Self, FluxError> {
        let expected = value.shape().to_vec();
        for (field, arr) in [("error", &error), ("min", &min), ("max", &max)] {
            if arr.shape() != expected.as_slice() {
                return Err(FluxError::ShapeMismatch {
                    field,
                    expected,
                    got: arr.shape().to_vec(),
                });
            }
        }
        Ok(Self {
            value,
            error,
            min,
            max,
        })
    }

    /// Assembles a block whose arrays are known to share a shape.
    pub(crate) fn from_parts(
        value: Array2<f64>,
        error: Array2<f64>,
        min: Array2<f64>,
        max: Array2<f64>,
    ) -> Self {
        debug_assert!(value.dim() == error.dim() && value.dim() == min.dim());
        Self {
            value,
            error,
            min,
            max,
        }
    }

    /// `(n_years, n_columns)`.
    pub fn dim(&self) -> (usize, usize) {
        self.value.dim()
    }

    /// Values.
    pub fn value(&self) -> &Array2<f64> {
        &self.value
    }

    /// Percentage errors.
    pub fn error(&self) -> &Array2<f64> {
        &self.error
    }

    /// Lower bounds.
    pub fn min(&self) -> &Array2<f64> {
        &self.min
    }

    /// Upper bounds.
    pub fn max(&self) -> &Array2<f64> {
        &self.max
    }

    /// Mutable values.
    pub fn value_mut(&mut self) -> &mut Array2<f64> {
        &mut self.value
    }

    /// Mutable errors.
    pub fn error_mut(&mut self) -> &mut Array2<f64> {
        &mut self.error
    }

    /// Mutable lower bounds.
    pub fn min_mut(&mut self) -> &mut Array2<f64> {
        &mut self.min
    }

    /// Mutable upper bounds.
    pub fn max_mut(&mut self) -> &mut Array2<f64> {
        &mut self.max
    }

    /// Returns `true` if no value is populated.
    pub fn is_all_nan(&self) -> bool {
        self.value.iter().all(|v| v.is_nan())
    }
}

/// Uncertainty arrays as read from a source, before kind dispatch.
///
/// `None` means the source does not declare the variable at all, which is
/// different from a declared variable that is all NaN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawUncertainty {
    /// Percentage errors.
    pub error: Option<Array2<f64>>,
    /// Lower bounds.
    pub min: Option<Array2<f64>>,
    /// Upper bounds.
    pub max: Option<Array2<f64>>,
}

impl RawUncertainty {
    /// No uncertainty variables.
    pub fn none() -> Self {
        Self::default()
    }

    /// Percentage errors only.
    pub fn percent(error: Array2<f64>) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Min/max bounds only.
    pub fn bounds(min: Array2<f64>, max: Array2<f64>) -> Self {
        Self {
            error: None,
            min: Some(min),
            max: Some(max),
        }
    }

    /// Which representation the declared variables amount to.
    ///
    /// A lone min or max still counts as bounds; the missing side is checked
    /// cell by cell during reconciliation.
    pub fn form(&self) -> UncertaintyForm {
        let has_bounds = self.min.is_some() || self.max.is_some();
        match (self.error.is_some(), has_bounds) {
            (false, false) => UncertaintyForm::None,
            (true, false) => UncertaintyForm::Percent,
            (false, true) => UncertaintyForm::Bounds,
            (true, true) => UncertaintyForm::Mixed,
        }
    }
}

/// A series' annual arrays over raw country/region codes, ready for
/// aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSeries {
    name: String,
    codes: Vec<String>,
    block: SeriesBlock,
    propagate_error: bool,
}

impl RawSeries {
    /// Creates a raw series.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::ShapeMismatch`] if the block does not have one
    /// column per code.
    pub fn new(
        name: impl Into<String>,
        codes: Vec<String>,
        block: SeriesBlock,
        propagate_error: bool,
    ) -> Result<Self, FluxError> {
        let (n_years, n_columns) = block.dim();
        if n_columns != codes.len() {
            return Err(FluxError::ShapeMismatch {
                field: "codes",
                expected: vec![n_years, codes.len()],
                got: vec![n_years, n_columns],
            });
        }
        Ok(Self {
            name: name.into(),
            codes,
            block,
            propagate_error,
        })
    }

    /// Series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw column codes.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Column index of `code`, if present.
    pub fn column_of(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c == code)
    }

    /// The annual arrays.
    pub fn block(&self) -> &SeriesBlock {
        &self.block
    }

    /// Whether percentage errors of this source combine meaningfully.
    pub fn propagate_error(&self) -> bool {
        self.propagate_error
    }
}
