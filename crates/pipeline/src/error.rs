//! Error types for the fluxrec-pipeline crate.

use std::fmt;

use fluxrec_adjust::AdjustError;
use fluxrec_combine::CombineError;
use fluxrec_flux::FluxError;
use fluxrec_io::IoError;
use fluxrec_reconcile::ReconcileError;
use fluxrec_region::RegionError;

/// Broad class of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A referenced series, group or variable does not exist, or a rule is
    /// malformed.
    Configuration,
    /// The data violate a reconciliation invariant.
    DataIntegrity,
    /// A unit is unknown or cannot be converted.
    UnitConversion,
    /// A source file is missing, unreadable or malformed.
    Input,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorClass::Configuration => "configuration error",
            ErrorClass::DataIntegrity => "data integrity error",
            ErrorClass::UnitConversion => "unit conversion error",
            ErrorClass::Input => "input error",
        };
        f.write_str(s)
    }
}

/// Error type for a pipeline run. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid run configuration.
    #[error("invalid pipeline config: {reason}")]
    InvalidConfig {
        /// Explanation of the problem.
        reason: String,
    },

    /// A required series holds no data after aggregation or combination.
    #[error("required series '{series}' has no data in any year or plot group")]
    NoData {
        /// The empty series.
        series: String,
    },

    /// Error while reading a source.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error from the data model.
    #[error(transparent)]
    Flux(#[from] FluxError),

    /// Error resolving plot groups.
    #[error(transparent)]
    Region(#[from] RegionError),

    /// Uncertainty reconciliation failed.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// A combination rule failed.
    #[error(transparent)]
    Combine(#[from] CombineError),

    /// Correction or detrending failed.
    #[error(transparent)]
    Adjust(#[from] AdjustError),
}

impl PipelineError {
    /// Which class of failure this is.
    pub fn class(&self) -> ErrorClass {
        match self {
            PipelineError::InvalidConfig { .. }
            | PipelineError::Region(_)
            | PipelineError::Combine(_) => ErrorClass::Configuration,
            PipelineError::NoData { .. } | PipelineError::Reconcile(_) => {
                ErrorClass::DataIntegrity
            }
            PipelineError::Flux(e) => flux_class(e),
            PipelineError::Adjust(AdjustError::IntervalData { .. }) => ErrorClass::DataIntegrity,
            PipelineError::Adjust(_) => ErrorClass::Configuration,
            PipelineError::Io(e) => match e {
                IoError::Unit(_) | IoError::NonRelativeError { .. } => ErrorClass::UnitConversion,
                IoError::MissingVariable { .. } => ErrorClass::Configuration,
                IoError::Flux(e) => flux_class(e),
                IoError::Resample(_) | IoError::Calendar(_) => ErrorClass::DataIntegrity,
                _ => ErrorClass::Input,
            },
        }
    }
}

fn flux_class(e: &FluxError) -> ErrorClass {
    match e {
        FluxError::ShapeMismatch { .. } => ErrorClass::DataIntegrity,
        _ => ErrorClass::Configuration,
    }
}
