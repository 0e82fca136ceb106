//! Per-series spatial-leakage overrides.

use std::collections::{BTreeMap, BTreeSet};

/// Series whose data are only trusted for a fixed set of plot groups.
///
/// Every other group of such a series is forced to NaN during aggregation.
/// Series absent from the table are unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeakageTable {
    rules: BTreeMap<String, BTreeSet<String>>,
}

impl LeakageTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts `series` to `allowed_groups`.
    pub fn with_rule<I, S>(mut self, series: impl Into<String>, allowed_groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.insert(
            series.into(),
            allowed_groups.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Returns `true` if `series` may carry data in `group`.
    pub fn allows(&self, series: &str, group: &str) -> bool {
        self.rules
            .get(series)
            .is_none_or(|allowed| allowed.contains(group))
    }

    /// Returns `true` if `series` has a rule.
    pub fn restricts(&self, series: &str) -> bool {
        self.rules.contains_key(series)
    }

    /// Rules in series-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of restricted series.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no series is restricted.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrestricted_series_allowed_everywhere() {
        let t = LeakageTable::new().with_rule("ECCO", ["BEL", "NLD"]);
        assert!(t.allows("UNFCCC", "DEU"));
        assert!(!t.restricts("UNFCCC"));
    }

    #[test]
    fn restricted_series_only_allowed_groups() {
        let t = LeakageTable::new().with_rule("ECCO", ["BEL", "NLD"]);
        assert!(t.restricts("ECCO"));
        assert!(t.allows("ECCO", "BEL"));
        assert!(!t.allows("ECCO", "DEU"));
        assert_eq!(t.len(), 1);
    }
}
