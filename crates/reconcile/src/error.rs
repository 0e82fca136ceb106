//! Error types for the fluxrec-reconcile crate.

use fluxrec_flux::CellRef;

/// Data-integrity violations found while reconciling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// Exactly one of min and max is populated.
    #[error("min/max mismatch at {cell}: {present} is populated but {missing} is not")]
    MinMaxMismatch {
        /// Offending cell.
        cell: CellRef,
        /// The populated bound (`"min"` or `"max"`).
        present: &'static str,
        /// The empty bound.
        missing: &'static str,
    },

    /// A percentage error and min/max are both populated.
    #[error("both percentage error and min/max populated at {cell}")]
    ConflictingUncertainty {
        /// Offending cell.
        cell: CellRef,
    },
}
