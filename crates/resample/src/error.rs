//! Error types for the fluxrec-resample crate.

/// Error type for all fallible operations in the fluxrec-resample crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// Returned when the grid has no columns.
    #[error("monthly grid has no columns")]
    NoColumns,

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] fluxrec_calendar::CalendarError),
}
