//! Combination rules.

use crate::error::CombineError;

/// How sources are combined.
#[derive(Debug, Clone, PartialEq)]
pub enum CombineOp {
    /// Weighted sum, one coefficient per source.
    Sum {
        /// Per-source weights.
        coefficients: Vec<f64>,
    },
    /// Strict element-wise mean, with min/max taken across sources.
    Mean,
}

impl CombineOp {
    /// Lower-case name as written in run files.
    pub fn as_str(&self) -> &'static str {
        match self {
            CombineOp::Sum { .. } => "sum",
            CombineOp::Mean => "mean",
        }
    }
}

/// Derives `target` from `sources`.
///
/// The target must already be registered as a placeholder series; its
/// contents are overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationRule {
    target: String,
    op: CombineOp,
    sources: Vec<String>,
}

impl CombinationRule {
    /// Weighted sum rule.
    pub fn sum(target: impl Into<String>, sources: Vec<String>, coefficients: Vec<f64>) -> Self {
        Self {
            target: target.into(),
            op: CombineOp::Sum { coefficients },
            sources,
        }
    }

    /// Plain sum with every coefficient equal to one.
    pub fn unit_sum(target: impl Into<String>, sources: Vec<String>) -> Self {
        let coefficients = vec![1.0; sources.len()];
        Self::sum(target, sources, coefficients)
    }

    /// Mean rule.
    pub fn mean(target: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            target: target.into(),
            op: CombineOp::Mean,
            sources,
        }
    }

    /// Series overwritten by this rule.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The operation.
    pub fn op(&self) -> &CombineOp {
        &self.op
    }

    /// Source series names, in order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Checks the rule's shape without looking at any registry.
    pub fn validate(&self) -> Result<(), CombineError> {
        if self.sources.is_empty() {
            return Err(CombineError::EmptySources {
                rule: self.target.clone(),
            });
        }
        if self.sources.iter().any(|s| *s == self.target) {
            return Err(CombineError::SelfReference {
                rule: self.target.clone(),
            });
        }
        if let CombineOp::Sum { coefficients } = &self.op {
            if coefficients.len() != self.sources.len() {
                return Err(CombineError::CoefficientMismatch {
                    rule: self.target.clone(),
                    sources: self.sources.len(),
                    coefficients: coefficients.len(),
                });
            }
            if let Some(&bad) = coefficients.iter().find(|c| !c.is_finite()) {
                return Err(CombineError::NonFiniteCoefficient {
                    rule: self.target.clone(),
                    value: bad,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unit_sum_has_one_coefficient_per_source() {
        let rule = CombinationRule::unit_sum("T", names(&["A", "B"]));
        assert_eq!(
            rule.op(),
            &CombineOp::Sum {
                coefficients: vec![1.0, 1.0]
            }
        );
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn mismatched_coefficients_rejected() {
        let rule = CombinationRule::sum("T", names(&["A", "B"]), vec![1.0]);
        assert!(matches!(
            rule.validate(),
            Err(CombineError::CoefficientMismatch { .. })
        ));
    }

    #[test]
    fn empty_and_self_referencing_rules_rejected() {
        assert!(matches!(
            CombinationRule::mean("T", vec![]).validate(),
            Err(CombineError::EmptySources { .. })
        ));
        assert!(matches!(
            CombinationRule::mean("T", names(&["A", "T"])).validate(),
            Err(CombineError::SelfReference { .. })
        ));
    }

    #[test]
    fn nan_coefficient_rejected() {
        let rule = CombinationRule::sum("T", names(&["A"]), vec![f64::NAN]);
        assert!(matches!(
            rule.validate(),
            Err(CombineError::NonFiniteCoefficient { .. })
        ));
    }

    #[test]
    fn op_names() {
        assert_eq!(CombineOp::Mean.as_str(), "mean");
        assert_eq!(
            CombineOp::Sum {
                coefficients: vec![]
            }
            .as_str(),
            "sum"
        );
    }
}
