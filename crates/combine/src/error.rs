//! Error types for the fluxrec-combine crate.

/// Error type for combination rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CombineError {
    /// A rule names a series that is not registered.
    #[error("combination '{rule}' references unknown series '{name}'")]
    UnknownSeries {
        /// Target of the offending rule.
        rule: String,
        /// The unknown series.
        name: String,
    },

    /// A sum rule's coefficient count differs from its source count.
    #[error("combination '{rule}' has {sources} sources but {coefficients} coefficients")]
    CoefficientMismatch {
        /// Target of the offending rule.
        rule: String,
        /// Number of sources.
        sources: usize,
        /// Number of coefficients.
        coefficients: usize,
    },

    /// A rule has no sources.
    #[error("combination '{rule}' has no sources")]
    EmptySources {
        /// Target of the offending rule.
        rule: String,
    },

    /// A rule lists its own target among its sources.
    #[error("combination '{rule}' uses its own target as a source")]
    SelfReference {
        /// Target of the offending rule.
        rule: String,
    },

    /// A coefficient is NaN or infinite.
    #[error("combination '{rule}' has non-finite coefficient {value}")]
    NonFiniteCoefficient {
        /// Target of the offending rule.
        rule: String,
        /// The coefficient.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_series() {
        let err = CombineError::UnknownSeries {
            rule: "TRENDY mean".to_string(),
            name: "ORCHIDEE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "combination 'TRENDY mean' references unknown series 'ORCHIDEE'"
        );
    }

    #[test]
    fn display_coefficient_mismatch() {
        let err = CombineError::CoefficientMismatch {
            rule: "LULUCF".to_string(),
            sources: 3,
            coefficients: 2,
        };
        assert_eq!(
            err.to_string(),
            "combination 'LULUCF' has 3 sources but 2 coefficients"
        );
    }

    #[test]
    fn display_empty_sources() {
        let err = CombineError::EmptySources {
            rule: "X".to_string(),
        };
        assert_eq!(err.to_string(), "combination 'X' has no sources");
    }

    #[test]
    fn display_self_reference() {
        let err = CombineError::SelfReference {
            rule: "X".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "combination 'X' uses its own target as a source"
        );
    }

    #[test]
    fn display_non_finite_coefficient() {
        let err = CombineError::NonFiniteCoefficient {
            rule: "X".to_string(),
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "combination 'X' has non-finite coefficient inf");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CombineError>();
    }
}
