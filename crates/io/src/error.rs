//! Error types for fluxrec-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the fluxrec-io crate.
///
/// Covers filesystem and parse failures, structural validation of source
/// files, and errors bubbled up from the calendar, unit, resampling and
/// data-model crates while turning a file into a series.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file exists but cannot be read.
    #[error("failed to read {}: {reason}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a file's contents are not a valid source document.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse {
        /// Path being parsed.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// Returned when one or more structural checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when the value variable of a series is not in its file.
    #[error("variable '{name}' not found in source '{file}'")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Source file identifier.
        file: String,
    },

    /// Returned when an error variable is declared in a mass-flux unit.
    #[error("error variable '{name}' has non-relative unit '{unit}'")]
    NonRelativeError {
        /// Variable name.
        name: String,
        /// Declared unit.
        unit: String,
    },

    /// Returned when export output cannot be serialised.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },

    /// Returned when export output cannot be written.
    #[error("failed to write {}: {reason}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Error from the calendar crate.
    #[error(transparent)]
    Calendar(#[from] fluxrec_calendar::CalendarError),

    /// Error from the unit normaliser.
    #[error(transparent)]
    Unit(#[from] fluxrec_units::UnitError),

    /// Error from the temporal resampler.
    #[error(transparent)]
    Resample(#[from] fluxrec_resample::ResampleError),

    /// Error from the data model.
    #[error(transparent)]
    Flux(#[from] fluxrec_flux::FluxError),
}
