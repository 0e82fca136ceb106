//! Configuration for region aggregation.

use std::collections::{BTreeSet, HashSet};

use crate::error::RegionError;
use crate::group::{PlotGroup, resolve_groups};
use crate::leakage::LeakageTable;
use crate::table::UnionTable;

/// Plot groups, unions and leakage rules for one run.
///
/// # Example
///
/// ```
/// use fluxrec_region::{AggregateConfig, LeakageTable};
///
/// let config = AggregateConfig::new(vec!["FMA".to_string(), "DEU".to_string()])
///     .with_leakage(LeakageTable::new().with_rule("ECCO", ["DEU"]));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateConfig {
    groups: Vec<String>,
    unions: UnionTable,
    leakage: LeakageTable,
}

impl AggregateConfig {
    /// Creates a configuration over `groups` with the built-in unions and no
    /// leakage rules.
    pub fn new(groups: Vec<String>) -> Self {
        Self {
            groups,
            unions: UnionTable::builtin(),
            leakage: LeakageTable::new(),
        }
    }

    /// Replaces the union table.
    pub fn with_unions(mut self, unions: UnionTable) -> Self {
        self.unions = unions;
        self
    }

    /// Sets the leakage rules.
    pub fn with_leakage(mut self, leakage: LeakageTable) -> Self {
        self.leakage = leakage;
        self
    }

    /// Returns the ordered plot-group names.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Returns the union table.
    pub fn unions(&self) -> &UnionTable {
        &self.unions
    }

    /// Returns the leakage rules.
    pub fn leakage(&self) -> &LeakageTable {
        &self.leakage
    }

    /// Validates this configuration.
    ///
    /// Checks that at least one group is requested, that no group repeats,
    /// and that leakage rules only name requested groups.
    pub fn validate(&self) -> Result<(), RegionError> {
        if self.groups.is_empty() {
            return Err(RegionError::InvalidConfig {
                reason: "at least one plot group is required".to_string(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.groups.iter().find(|g| !seen.insert(g.as_str())) {
            return Err(RegionError::InvalidConfig {
                reason: format!("plot group '{dup}' listed more than once"),
            });
        }
        for (series, allowed) in self.leakage.iter() {
            if let Some(g) = allowed.iter().find(|g| !seen.contains(g.as_str())) {
                return Err(RegionError::InvalidConfig {
                    reason: format!(
                        "leakage rule for '{series}' names group '{g}' which is not plotted"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Validates, then resolves every group against `known_codes`.
    ///
    /// # Errors
    ///
    /// Any error from [`validate`](Self::validate) or [`resolve_groups`].
    pub fn resolve(&self, known_codes: &BTreeSet<String>) -> Result<Vec<PlotGroup>, RegionError> {
        self.validate()?;
        resolve_groups(&self.groups, &self.unions, known_codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(n: &[&str]) -> Vec<String> {
        n.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn empty_groups_invalid() {
        assert!(AggregateConfig::new(vec![]).validate().is_err());
    }

    #[test]
    fn duplicate_group_invalid() {
        let err = AggregateConfig::new(groups(&["FRA", "FRA"]))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("'FRA' listed more than once"));
    }

    #[test]
    fn leakage_must_name_plotted_groups() {
        let config = AggregateConfig::new(groups(&["FRA"]))
            .with_leakage(LeakageTable::new().with_rule("ECCO", ["DEU"]));
        assert!(matches!(
            config.validate(),
            Err(RegionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn resolve_uses_builtin_unions() {
        let known: BTreeSet<String> = ["FRA", "AND"].iter().map(|c| c.to_string()).collect();
        let resolved = AggregateConfig::new(groups(&["FMA", "FRA"]))
            .resolve(&known)
            .unwrap();
        assert_eq!(resolved[0].codes(), ["FRA", "AND"]);
        assert_eq!(resolved[1].codes(), ["FRA"]);
    }
}
