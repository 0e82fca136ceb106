//! Turning a source file into a raw series.

use fluxrec_calendar::YearRange;
use fluxrec_flux::{RawSeries, RawUncertainty, SeriesMeta};
use fluxrec_resample::annualize;
use fluxrec_units::{Conversion, Unit, UnitError, convert_in_place};
use ndarray::Array2;
use tracing::debug;

use crate::error::IoError;
use crate::source::{FluxSource, RawVariable, SourceFile};

/// Variable names to look up in a series' file.
///
/// The value variable is required. The uncertainty variables are optional:
/// whichever are present decide the series' uncertainty representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNames {
    value: String,
    error: String,
    min: String,
    max: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        Self {
            value: "flux".into(),
            error: "flux_error".into(),
            min: "flux_min".into(),
            max: "flux_max".into(),
        }
    }
}

impl VariableNames {
    /// Set the value variable name.
    pub fn with_value(mut self, name: impl Into<String>) -> Self {
        self.value = name.into();
        self
    }

    /// Set the percentage-error variable name.
    pub fn with_error(mut self, name: impl Into<String>) -> Self {
        self.error = name.into();
        self
    }

    /// Set the lower-bound variable name.
    pub fn with_min(mut self, name: impl Into<String>) -> Self {
        self.min = name.into();
        self
    }

    /// Set the upper-bound variable name.
    pub fn with_max(mut self, name: impl Into<String>) -> Self {
        self.max = name.into();
        self
    }

    /// Value variable name.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Percentage-error variable name.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Lower-bound variable name.
    pub fn min(&self) -> &str {
        &self.min
    }

    /// Upper-bound variable name.
    pub fn max(&self) -> &str {
        &self.max
    }
}

/// Reads one series from `file` in `source`.
///
/// Each variable is converted, then averaged onto `years`. Values and
/// bounds are converted into `target`. Error variables are never rescaled
/// by mass-flux factors; a fraction is turned into a percentage and any
/// non-relative unit is rejected. The result goes through the series kind's
/// [`produce`](fluxrec_flux::SeriesKind::produce).
///
/// # Errors
///
/// - [`IoError::MissingVariable`] if the value variable is absent.
/// - [`IoError::Unit`] for an unrecognised or unconvertible unit.
/// - [`IoError::NonRelativeError`] for an error variable in a mass unit.
/// - [`IoError::Flux`] if the kind rejects the uncertainty representation.
#[tracing::instrument(skip(source, meta, vars), fields(series = meta.name()))]
pub fn read_series<S: FluxSource + ?Sized>(
    source: &S,
    meta: &SeriesMeta,
    file: &str,
    vars: &VariableNames,
    years: YearRange,
    target: Unit,
) -> Result<RawSeries, IoError> {
    let loaded = source.load(file)?;

    let value = loaded
        .read_variable(vars.value())?
        .ok_or_else(|| IoError::MissingVariable {
            name: vars.value().to_string(),
            file: file.to_string(),
        })?;
    let value = annual(value, years, Conversion::To(target))?;

    let error = match loaded.read_variable(vars.error())? {
        Some(var) => {
            let conversion = error_conversion(vars.error(), &var.unit)?;
            Some(annual(var, years, conversion)?)
        }
        None => None,
    };
    let min = optional(&loaded, vars.min(), years, target)?;
    let max = optional(&loaded, vars.max(), years, target)?;

    debug!(
        file,
        has_error = error.is_some(),
        has_min = min.is_some(),
        has_max = max.is_some(),
        "read series variables"
    );

    let uncertainty = RawUncertainty { error, min, max };
    Ok(meta
        .kind()
        .produce(meta, loaded.codes.clone(), value, uncertainty)?)
}

fn optional(
    file: &SourceFile,
    name: &str,
    years: YearRange,
    target: Unit,
) -> Result<Option<Array2<f64>>, IoError> {
    file.read_variable(name)?
        .map(|var| annual(var, years, Conversion::To(target)))
        .transpose()
}

fn annual(
    mut var: RawVariable,
    years: YearRange,
    conversion: Conversion,
) -> Result<Array2<f64>, IoError> {
    convert_in_place(var.grid.values_mut(), &var.unit, conversion)?;
    Ok(annualize(&var.grid, years)?.into_array())
}

fn error_conversion(name: &str, declared: &str) -> Result<Conversion, IoError> {
    match Unit::parse(declared)? {
        Unit::Percent => Ok(Conversion::None),
        Unit::Fraction => Ok(Conversion::To(Unit::Percent)),
        Unit::MassRate { .. } => Err(IoError::NonRelativeError {
            name: name.to_string(),
            unit: declared.to_string(),
        }),
    }
}
