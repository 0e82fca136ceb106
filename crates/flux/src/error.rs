//! Error types for the fluxrec-flux crate.

/// Error type for data-model operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FluxError {
    /// A kind string did not name a known series kind.
    #[error("unknown series kind '{kind}'")]
    UnknownKind {
        /// The unrecognised kind string.
        kind: String,
    },

    /// A series name was referenced but never registered.
    #[error("series '{name}' not found")]
    UnknownSeries {
        /// The missing series name.
        name: String,
    },

    /// Two series were registered with the same name.
    #[error("series '{name}' registered more than once")]
    DuplicateSeries {
        /// The repeated name.
        name: String,
    },

    /// A source supplied an uncertainty representation its kind does not
    /// accept, or supplied both representations at once.
    #[error("series '{series}' of kind {kind} cannot carry {form} uncertainty")]
    KindMismatch {
        /// Series name.
        series: String,
        /// Series kind.
        kind: String,
        /// The offending representation.
        form: String,
    },

    /// Two arrays that must share a shape do not.
    #[error("{field}: expected shape {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Name of the offending array.
        field: &'static str,
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_kind() {
        let e = FluxError::UnknownKind {
            kind: "SATELLITE".to_string(),
        };
        assert_eq!(e.to_string(), "unknown series kind 'SATELLITE'");
    }

    #[test]
    fn display_unknown_series() {
        let e = FluxError::UnknownSeries {
            name: "UNFCCC".to_string(),
        };
        assert_eq!(e.to_string(), "series 'UNFCCC' not found");
    }

    #[test]
    fn display_kind_mismatch() {
        let e = FluxError::KindMismatch {
            series: "ORCHIDEE".to_string(),
            kind: "TRENDY".to_string(),
            form: "percentage-error".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "series 'ORCHIDEE' of kind TRENDY cannot carry percentage-error uncertainty"
        );
    }

    #[test]
    fn display_shape_mismatch() {
        let e = FluxError::ShapeMismatch {
            field: "error",
            expected: vec![2, 3],
            got: vec![3, 2],
        };
        assert_eq!(e.to_string(), "error: expected shape [2, 3], got [3, 2]");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<FluxError>();
    }
}
