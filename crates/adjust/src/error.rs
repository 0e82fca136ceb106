//! Error types for the fluxrec-adjust crate.

use fluxrec_flux::CellRef;

/// Error type for the correction and detrend passes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdjustError {
    /// Detrending was requested for a series carrying min/max bounds.
    #[error("cannot detrend interval data: min/max populated at {cell}")]
    IntervalData {
        /// First populated cell found.
        cell: CellRef,
    },

    /// A removal series is not registered.
    #[error("correction removal series '{name}' not found")]
    UnknownRemoval {
        /// The missing series name.
        name: String,
    },

    /// Invalid adjustment configuration.
    #[error("invalid adjust config: {reason}")]
    InvalidConfig {
        /// Explanation of the problem.
        reason: String,
    },
}
