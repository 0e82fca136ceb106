//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use fluxrec_adjust::AdjustConfig;
use fluxrec_calendar::YearRange;
use fluxrec_combine::CombinationRule;
use fluxrec_flux::{SeriesKind, SeriesMeta};
use fluxrec_io::VariableNames;
use fluxrec_pipeline::{PipelineConfig, SeriesSpec};
use fluxrec_region::{AggregateConfig, LeakageTable, UnionTable};
use fluxrec_units::Unit;

/// Builds a [`SeriesSpec`] from one `[[series]]` entry.
pub fn build_series_spec(series: &SeriesToml) -> Result<SeriesSpec> {
    let kind: SeriesKind = series
        .kind
        .parse()
        .with_context(|| format!("series {:?}", series.name))?;
    let mut meta = SeriesMeta::new(&series.name, kind)
        .with_flip_sign(series.flip_sign)
        .with_production(series.production)
        .with_display(series.display)
        .with_correct(series.correct)
        .with_required(series.required);
    if let Some(ref label) = series.display_name {
        meta = meta.with_display_name(label);
    }
    let vars = VariableNames::default()
        .with_value(&series.value_var)
        .with_error(&series.error_var)
        .with_min(&series.min_var)
        .with_max(&series.max_var);
    Ok(match series.file {
        Some(ref file) => SeriesSpec::from_file(meta, file).with_vars(vars),
        None => SeriesSpec::placeholder(meta),
    })
}

/// Parses one `[[combination]]` entry into a [`CombinationRule`].
pub fn build_rule(rule: &CombinationToml) -> Result<CombinationRule> {
    let target = rule.target.clone();
    let sources = rule.sources.clone();
    match (rule.op.to_lowercase().as_str(), &rule.coefficients) {
        ("sum", Some(coefficients)) => {
            Ok(CombinationRule::sum(target, sources, coefficients.clone()))
        }
        ("sum", None) => Ok(CombinationRule::unit_sum(target, sources)),
        ("mean", None) => Ok(CombinationRule::mean(target, sources)),
        ("mean", Some(_)) => bail!("combination {target:?}: mean takes no coefficients"),
        (other, _) => bail!("combination {target:?}: unknown op {other:?}"),
    }
}

/// Builds an [`AggregateConfig`] from the plot groups, ad hoc unions and
/// leakage rules.
pub fn build_aggregate_config(config: &FluxrecConfig) -> Result<AggregateConfig> {
    let mut unions = UnionTable::builtin();
    for u in &config.unions {
        unions
            .insert(&u.name, u.codes.clone())
            .with_context(|| format!("union {:?}", u.name))?;
    }
    let leakage = config
        .leakage
        .iter()
        .fold(LeakageTable::new(), |table, rule| {
            table.with_rule(&rule.series, rule.allowed_groups.iter().cloned())
        });
    Ok(AggregateConfig::new(config.plot_groups.clone())
        .with_unions(unions)
        .with_leakage(leakage))
}

/// Builds an [`AdjustConfig`] from the correction and detrend sections.
pub fn build_adjust_config(correction: &CorrectionToml, detrend: &DetrendToml) -> AdjustConfig {
    AdjustConfig::new()
        .with_removals(correction.removals.clone())
        .with_detrend(detrend.enabled)
}

/// Builds the full [`PipelineConfig`] for a run.
pub fn build_pipeline_config(config: &FluxrecConfig) -> Result<PipelineConfig> {
    let years = YearRange::new(config.run.start_year, config.run.end_year)
        .context("invalid [run] year range")?;
    let unit = Unit::parse(&config.run.target_unit).context("invalid [run] target_unit")?;
    let series = config
        .series
        .iter()
        .map(build_series_spec)
        .collect::<Result<Vec<_>>>()?;
    let rules = config
        .combinations
        .iter()
        .map(build_rule)
        .collect::<Result<Vec<_>>>()?;

    let cfg = PipelineConfig::new(years)
        .with_target_unit(unit)
        .with_series(series)
        .with_aggregate(build_aggregate_config(config)?)
        .with_rules(rules)
        .with_adjust(build_adjust_config(&config.correction, &config.detrend));
    cfg.validate().context("invalid run configuration")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN: &str = r#"
plot_groups = ["FMA", "DEU", "Nordic"]

[run]
start_year = 1990
end_year = 2000

[[series]]
name = "UNFCCC"
kind = "inventory"
file = "unfccc.json"
required = true
correct = true

[[series]]
name = "ORCHIDEE"
kind = "trendy"
file = "orchidee.json"
display = false
value_var = "nbp"

[[series]]
name = "Lakes"
kind = "other"
file = "lakes.json"

[[series]]
name = "TRENDY"
kind = "trendy"

[[union]]
name = "Nordic"
codes = ["NOR", "SWE"]

[[combination]]
target = "TRENDY"
op = "mean"
sources = ["ORCHIDEE"]

[[leakage]]
series = "ORCHIDEE"
allowed_groups = ["DEU"]

[correction]
removals = ["Lakes"]
"#;

    fn parse(s: &str) -> FluxrecConfig {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn builds_full_run() {
        let cfg = build_pipeline_config(&parse(RUN)).unwrap();
        assert_eq!(cfg.years().len(), 11);
        assert_eq!(cfg.series().len(), 4);
        assert_eq!(cfg.series()[1].vars().value(), "nbp");
        assert!(!cfg.series()[1].meta().display());
        assert!(cfg.series()[3].file().is_none());
        assert_eq!(cfg.rules().len(), 1);
        assert_eq!(cfg.aggregate().unions().get("Nordic").unwrap(), ["NOR", "SWE"]);
        assert!(cfg.aggregate().leakage().restricts("ORCHIDEE"));
        assert!(cfg.adjust().correction_enabled());
        assert!(!cfg.adjust().detrend_enabled());
    }

    #[test]
    fn unknown_kind_names_series() {
        let mut config = parse(RUN);
        config.series[0].kind = "satellite".to_string();
        let err = build_pipeline_config(&config).unwrap_err();
        assert!(format!("{err:#}").contains("UNFCCC"));
    }

    #[test]
    fn mean_rejects_coefficients() {
        let rule = CombinationToml {
            target: "T".into(),
            op: "mean".into(),
            sources: vec!["A".into()],
            coefficients: Some(vec![1.0]),
        };
        assert!(build_rule(&rule).is_err());
    }

    #[test]
    fn sum_defaults_to_unit_coefficients() {
        let rule = CombinationToml {
            target: "T".into(),
            op: "sum".into(),
            sources: vec!["A".into(), "B".into()],
            coefficients: None,
        };
        assert_eq!(
            build_rule(&rule).unwrap(),
            CombinationRule::sum("T", vec!["A".into(), "B".into()], vec![1.0, 1.0])
        );
    }

    #[test]
    fn rejects_unknown_unit() {
        let mut config = parse(RUN);
        config.run.target_unit = "furlongs".to_string();
        assert!(build_pipeline_config(&config).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        let bad = RUN.replace("required = true", "mandatory = true");
        assert!(toml::from_str::<FluxrecConfig>(&bad).is_err());
    }
}
