//! Series kinds and kind-specific production of raw series.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, Zip};

use crate::block::{RawSeries, RawUncertainty, SeriesBlock};
use crate::error::FluxError;
use crate::series::SeriesMeta;

/// Category of a data source. Decides which uncertainty representation the
/// source may carry and whether its errors propagate through aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Bottom-up reporting inventory with percentage errors.
    Inventory,
    /// Source reporting explicit lower and upper bounds.
    MinMax,
    /// Model ensemble whose spread is given as min/max.
    Trendy,
    /// Other bottom-up estimate.
    BottomUp,
    /// Top-down (inversion) estimate.
    TopDown,
    /// Anything else.
    Other,
}

/// Representation of uncertainty a source supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UncertaintyForm {
    /// No uncertainty variables.
    None,
    /// Percentage error.
    Percent,
    /// Min/max bounds.
    Bounds,
    /// Both at once, never accepted.
    Mixed,
}

impl fmt::Display for UncertaintyForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UncertaintyForm::None => "no",
            UncertaintyForm::Percent => "percentage-error",
            UncertaintyForm::Bounds => "min/max",
            UncertaintyForm::Mixed => "both percentage-error and min/max",
        };
        f.write_str(s)
    }
}

impl SeriesKind {
    /// All kinds, in declaration order.
    pub const ALL: [SeriesKind; 6] = [
        SeriesKind::Inventory,
        SeriesKind::MinMax,
        SeriesKind::Trendy,
        SeriesKind::BottomUp,
        SeriesKind::TopDown,
        SeriesKind::Other,
    ];

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesKind::Inventory => "INVENTORY",
            SeriesKind::MinMax => "MINMAX",
            SeriesKind::Trendy => "TRENDY",
            SeriesKind::BottomUp => "BOTTOM_UP",
            SeriesKind::TopDown => "TOP_DOWN",
            SeriesKind::Other => "OTHER",
        }
    }

    /// Whether this kind may carry `form`.
    pub fn accepts(self, form: UncertaintyForm) -> bool {
        match (self, form) {
            (_, UncertaintyForm::None) => true,
            (_, UncertaintyForm::Mixed) => false,
            (SeriesKind::Inventory, f) => f == UncertaintyForm::Percent,
            (SeriesKind::MinMax | SeriesKind::Trendy, f) => f == UncertaintyForm::Bounds,
            (SeriesKind::BottomUp | SeriesKind::TopDown | SeriesKind::Other, _) => true,
        }
    }

    /// Turns raw annual arrays into a [`RawSeries`] for this kind.
    ///
    /// Applies the series' sign flip: values and bounds are negated and min
    /// and max swap places so `min <= max` survives. Percentage errors are
    /// sign-free and left alone.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::KindMismatch`] if the kind does not accept the
    /// supplied representation, and [`FluxError::ShapeMismatch`] if any
    /// uncertainty array differs in shape from `value` or from `codes`.
    pub fn produce(
        self,
        meta: &SeriesMeta,
        codes: Vec<String>,
        value: Array2<f64>,
        uncertainty: RawUncertainty,
    ) -> Result<RawSeries, FluxError> {
        let form = uncertainty.form();
        if !self.accepts(form) {
            return Err(FluxError::KindMismatch {
                series: meta.name().to_string(),
                kind: self.to_string(),
                form: form.to_string(),
            });
        }

        let block = match self {
            SeriesKind::Inventory => produce_percent(value, uncertainty)?,
            SeriesKind::MinMax | SeriesKind::Trendy => produce_bounds(value, uncertainty)?,
            SeriesKind::BottomUp | SeriesKind::TopDown | SeriesKind::Other => match form {
                UncertaintyForm::Percent => produce_percent(value, uncertainty)?,
                _ => produce_bounds(value, uncertainty)?,
            },
        };

        let block = if meta.flip_sign() {
            flip(block)?
        } else {
            block
        };

        let propagate = form == UncertaintyForm::Percent;
        tracing::debug!(
            series = meta.name(),
            kind = %self,
            form = %form,
            flipped = meta.flip_sign(),
            "produced raw series"
        );
        RawSeries::new(meta.name(), codes, block, propagate)
    }
}

fn nan_like(value: &Array2<f64>) -> Array2<f64> {
    Array2::from_elem(value.dim(), f64::NAN)
}

fn produce_percent(
    value: Array2<f64>,
    uncertainty: RawUncertainty,
) -> Result<SeriesBlock, FluxError> {
    let error = uncertainty.error.unwrap_or_else(|| nan_like(&value));
    let nan = nan_like(&value);
    SeriesBlock::new(value, error, nan.clone(), nan)
}

fn produce_bounds(
    value: Array2<f64>,
    uncertainty: RawUncertainty,
) -> Result<SeriesBlock, FluxError> {
    let min = uncertainty.min.unwrap_or_else(|| nan_like(&value));
    let max = uncertainty.max.unwrap_or_else(|| nan_like(&value));
    let error = nan_like(&value);
    SeriesBlock::new(value, error, min, max)
}

fn flip(block: SeriesBlock) -> Result<SeriesBlock, FluxError> {
    let value = block.value().mapv(|v| -v);
    let mut min = block.max().mapv(|v| -v);
    let mut max = block.min().mapv(|v| -v);
    // A lone bound keeps its own side after the swap.
    Zip::from(&mut min)
        .and(&mut max)
        .for_each(|lo, hi| {
            if lo.is_nan() != hi.is_nan() {
                std::mem::swap(lo, hi);
            }
        });
    SeriesBlock::new(value, block.error().clone(), min, max)
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesKind {
    type Err = FluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        SeriesKind::ALL
            .into_iter()
            .find(|k| k.as_str() == key || (key == "MIN_MAX" && *k == SeriesKind::MinMax))
            .ok_or_else(|| FluxError::UnknownKind {
                kind: s.to_string(),
            })
    }
}
