//! Configuration for a pipeline run.

use std::collections::HashSet;

use fluxrec_adjust::AdjustConfig;
use fluxrec_calendar::YearRange;
use fluxrec_combine::CombinationRule;
use fluxrec_flux::SeriesMeta;
use fluxrec_io::VariableNames;
use fluxrec_region::AggregateConfig;
use fluxrec_units::{Species, Unit};

use crate::error::PipelineError;

/// One series of the run: metadata, where to read it, and which variables.
///
/// A series without a file is a placeholder that only a combination rule
/// fills.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    meta: SeriesMeta,
    file: Option<String>,
    vars: VariableNames,
}

impl SeriesSpec {
    /// Series read from `file` with default variable names.
    pub fn from_file(meta: SeriesMeta, file: impl Into<String>) -> Self {
        Self {
            meta,
            file: Some(file.into()),
            vars: VariableNames::default(),
        }
    }

    /// Placeholder series filled by a combination rule.
    pub fn placeholder(meta: SeriesMeta) -> Self {
        Self {
            meta,
            file: None,
            vars: VariableNames::default(),
        }
    }

    /// Sets the variable names.
    pub fn with_vars(mut self, vars: VariableNames) -> Self {
        self.vars = vars;
        self
    }

    /// Returns the metadata.
    pub fn meta(&self) -> &SeriesMeta {
        &self.meta
    }

    /// Returns the source file identifier, if any.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the variable names.
    pub fn vars(&self) -> &VariableNames {
        &self.vars
    }
}

/// Everything one run needs.
///
/// # Example
///
/// ```
/// use fluxrec_calendar::YearRange;
/// use fluxrec_flux::{SeriesKind, SeriesMeta};
/// use fluxrec_pipeline::{PipelineConfig, SeriesSpec};
/// use fluxrec_region::AggregateConfig;
///
/// let config = PipelineConfig::new(YearRange::new(1990, 2020).unwrap())
///     .with_series(vec![SeriesSpec::from_file(
///         SeriesMeta::new("UNFCCC", SeriesKind::Inventory),
///         "unfccc.json",
///     )])
///     .with_aggregate(AggregateConfig::new(vec!["FMA".to_string()]));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    years: YearRange,
    target_unit: Unit,
    series: Vec<SeriesSpec>,
    aggregate: AggregateConfig,
    rules: Vec<CombinationRule>,
    adjust: AdjustConfig,
}

impl PipelineConfig {
    /// Creates a configuration over `years`.
    ///
    /// Defaults: target unit `Tg C yr-1`, no series, no plot groups, no
    /// combinations, no post-processing.
    pub fn new(years: YearRange) -> Self {
        Self {
            years,
            target_unit: Unit::MassRate {
                exponent: 12,
                species: Species::Carbon,
            },
            series: Vec::new(),
            aggregate: AggregateConfig::new(Vec::new()),
            rules: Vec::new(),
            adjust: AdjustConfig::new(),
        }
    }

    /// Sets the unit every value is converted into.
    pub fn with_target_unit(mut self, unit: Unit) -> Self {
        self.target_unit = unit;
        self
    }

    /// Sets the series, in tensor order.
    pub fn with_series(mut self, series: Vec<SeriesSpec>) -> Self {
        self.series = series;
        self
    }

    /// Sets plot groups, unions and leakage rules.
    pub fn with_aggregate(mut self, aggregate: AggregateConfig) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Sets the combination rules, applied in order.
    pub fn with_rules(mut self, rules: Vec<CombinationRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the post-processing passes.
    pub fn with_adjust(mut self, adjust: AdjustConfig) -> Self {
        self.adjust = adjust;
        self
    }

    // --- Accessors ---

    /// Returns the year range.
    pub fn years(&self) -> YearRange {
        self.years
    }

    /// Returns the target unit.
    pub fn target_unit(&self) -> Unit {
        self.target_unit
    }

    /// Returns the series.
    pub fn series(&self) -> &[SeriesSpec] {
        &self.series
    }

    /// Returns the aggregation configuration.
    pub fn aggregate(&self) -> &AggregateConfig {
        &self.aggregate
    }

    /// Returns the combination rules.
    pub fn rules(&self) -> &[CombinationRule] {
        &self.rules
    }

    /// Returns the post-processing configuration.
    pub fn adjust(&self) -> &AdjustConfig {
        &self.adjust
    }

    /// Validates this configuration.
    ///
    /// Checks that the target unit is a mass rate, that some series reads a
    /// file, that every combination target is a placeholder, that every
    /// leakage rule names a configured series, and delegates to the stage
    /// configs.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.target_unit.is_relative() {
            return Err(PipelineError::InvalidConfig {
                reason: format!("target unit must be a mass rate, got '{}'", self.target_unit),
            });
        }
        if !self.series.iter().any(|s| s.file.is_some()) {
            return Err(PipelineError::InvalidConfig {
                reason: "at least one series must be read from a file".to_string(),
            });
        }
        let placeholders: HashSet<&str> = self
            .series
            .iter()
            .filter(|s| s.file.is_none())
            .map(|s| s.meta.name())
            .collect();
        for rule in &self.rules {
            rule.validate()?;
            if !placeholders.contains(rule.target()) && self.has_series(rule.target()) {
                return Err(PipelineError::InvalidConfig {
                    reason: format!(
                        "combination target '{}' is read from a file, not a placeholder",
                        rule.target()
                    ),
                });
            }
        }
        for (series, _) in self.aggregate.leakage().iter() {
            if !self.has_series(series) {
                return Err(PipelineError::InvalidConfig {
                    reason: format!("leakage rule names unknown series '{series}'"),
                });
            }
        }
        self.aggregate.validate()?;
        self.adjust.validate()?;
        Ok(())
    }

    fn has_series(&self, name: &str) -> bool {
        self.series.iter().any(|s| s.meta.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxrec_flux::SeriesKind;
    use fluxrec_region::LeakageTable;

    fn base() -> PipelineConfig {
        PipelineConfig::new(YearRange::new(2000, 2001).unwrap())
            .with_series(vec![
                SeriesSpec::from_file(SeriesMeta::new("A", SeriesKind::Other), "a.json"),
                SeriesSpec::placeholder(SeriesMeta::new("T", SeriesKind::Other)),
            ])
            .with_aggregate(AggregateConfig::new(vec!["FRA".to_string()]))
    }

    #[test]
    fn default_target_is_tg_carbon() {
        assert_eq!(base().target_unit().to_string(), "Tg C yr-1");
        assert!(base().validate().is_ok());
    }

    #[test]
    fn relative_target_unit_invalid() {
        let c = base().with_target_unit(Unit::Percent);
        assert!(matches!(c.validate(), Err(PipelineError::InvalidConfig { .. })));
    }

    #[test]
    fn placeholders_only_invalid() {
        let c = base().with_series(vec![SeriesSpec::placeholder(SeriesMeta::new(
            "T",
            SeriesKind::Other,
        ))]);
        assert!(c.validate().is_err());
    }

    #[test]
    fn file_backed_target_invalid() {
        let c = base().with_rules(vec![CombinationRule::mean("A", vec!["T".to_string()])]);
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("not a placeholder"));
    }

    #[test]
    fn malformed_rule_surfaces() {
        let c = base().with_rules(vec![CombinationRule::sum(
            "T",
            vec!["A".to_string()],
            vec![1.0, 2.0],
        )]);
        assert!(matches!(c.validate(), Err(PipelineError::Combine(_))));
    }

    #[test]
    fn leakage_for_unknown_series_invalid() {
        let aggregate = AggregateConfig::new(vec!["FRA".to_string()])
            .with_leakage(LeakageTable::new().with_rule("TYPO", ["FRA"]));
        let c = base().with_aggregate(aggregate);
        let err = c.validate().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig { .. }));
        assert!(err.to_string().contains("TYPO"));
    }

    #[test]
    fn leakage_for_known_series_valid() {
        let aggregate = AggregateConfig::new(vec!["FRA".to_string()])
            .with_leakage(LeakageTable::new().with_rule("A", ["FRA"]));
        assert!(base().with_aggregate(aggregate).validate().is_ok());
    }
}
