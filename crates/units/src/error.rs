//! Error types for the fluxrec-units crate.

/// Error type for unit parsing and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// The unit string is not in the recognised table.
    #[error("unknown unit '{unit}'")]
    UnknownUnit {
        /// The unrecognised unit string.
        unit: String,
    },

    /// Both units are known but no conversion exists between them.
    #[error("no conversion from '{from}' to '{to}'")]
    UnsupportedConversion {
        /// Source unit.
        from: String,
        /// Target unit.
        to: String,
    },
}
