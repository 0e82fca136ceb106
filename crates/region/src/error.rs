//! Error types for the fluxrec-region crate.

/// Error type for plot-group resolution and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// A plot group is neither a union nor a known raw code.
    #[error("plot group '{group}' is neither a known union nor a known code")]
    UnknownGroup {
        /// The unresolved group name.
        group: String,
    },

    /// A union member does not appear in any source.
    #[error("plot group '{group}' references unknown code '{code}'")]
    UnknownCode {
        /// The union being resolved.
        group: String,
        /// The missing raw code.
        code: String,
    },

    /// A union was defined with no members.
    #[error("union '{name}' has no member codes")]
    EmptyUnion {
        /// The union name.
        name: String,
    },

    /// Invalid aggregation configuration.
    #[error("invalid aggregation config: {reason}")]
    InvalidConfig {
        /// Explanation of the problem.
        reason: String,
    },
}
