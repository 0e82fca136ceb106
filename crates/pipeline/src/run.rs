//! The pipeline driver.

use std::collections::BTreeSet;

use fluxrec_adjust::{apply_correction, detrend};
use fluxrec_combine::combine_simulations;
use fluxrec_flux::{FluxTensor, RawSeries, SeriesRegistry};
use fluxrec_io::{FluxSource, read_series};
use fluxrec_reconcile::reconcile;
use fluxrec_region::group_input;
use tracing::{debug, info, info_span};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::output::PipelineOutput;

/// Runs every stage over `config`, reading series from `source`.
///
/// # Errors
///
/// Returns the first [`PipelineError`] raised by any stage; nothing is
/// skipped or retried.
#[tracing::instrument(skip_all, fields(
    start = config.years().start(),
    end = config.years().end(),
    n_series = config.series().len(),
))]
pub fn run<S: FluxSource + ?Sized>(
    config: &PipelineConfig,
    source: &S,
) -> Result<PipelineOutput, PipelineError> {
    config.validate()?;

    let mut registry =
        SeriesRegistry::new(config.series().iter().map(|s| s.meta().clone()).collect())?;

    // Read
    let raw: Vec<(usize, RawSeries)> = {
        let _span = info_span!("read").entered();
        let mut out = Vec::new();
        for (idx, spec) in config.series().iter().enumerate() {
            let Some(file) = spec.file() else {
                debug!(series = spec.meta().name(), "placeholder, not read");
                continue;
            };
            let series = read_series(
                source,
                spec.meta(),
                file,
                spec.vars(),
                config.years(),
                config.target_unit(),
            )?;
            out.push((idx, series));
        }
        info!(n_read = out.len(), "series read");
        out
    };

    // Resolve plot groups against every code any source carries.
    let known_codes: BTreeSet<String> = raw
        .iter()
        .flat_map(|(_, r)| r.codes().iter().cloned())
        .collect();
    let groups = config.aggregate().resolve(&known_codes)?;

    // Aggregate
    let mut tensor = FluxTensor::new(
        registry.len(),
        config.years(),
        groups.iter().map(|g| g.name().to_string()).collect(),
    );
    {
        let _span = info_span!("aggregate").entered();
        for (idx, series) in &raw {
            let block = group_input(series, &groups, config.aggregate().leakage());
            tensor.set_series(*idx, &block)?;
            if block.is_all_nan() {
                debug!(series = series.name(), "no data in any plot group");
            }
        }
        info!(nan_cells = tensor.nan_value_cells(), "aggregated");
    }

    let report = {
        let _span = info_span!("reconcile").entered();
        let report = reconcile(&mut tensor, &registry)?;
        info!(nan_cells = tensor.nan_value_cells(), "reconciled");
        report
    };
    // Zeros are gone by now, so an all-zero series counts as empty.
    check_required(&tensor, &registry, |idx| {
        config.series()[idx].file().is_some()
    })?;

    {
        let _span = info_span!("combine").entered();
        combine_simulations(&mut tensor, &registry, config.rules())?;
        info!(nan_cells = tensor.nan_value_cells(), "combined");
    }
    check_required(&tensor, &registry, |idx| {
        config.series()[idx].file().is_none()
    })?;

    let adjust = config.adjust();
    if adjust.correction_enabled() {
        let _span = info_span!("correct").entered();
        apply_correction(&mut tensor, &mut registry, adjust.removals())?;
        info!(nan_cells = tensor.nan_value_cells(), "corrected");
    }
    if adjust.detrend_enabled() {
        let _span = info_span!("detrend").entered();
        detrend(&mut tensor, &registry)?;
        info!(nan_cells = tensor.nan_value_cells(), "detrended");
    }

    Ok(PipelineOutput {
        registry,
        groups,
        tensor,
        reconcile: report,
    })
}

fn check_required(
    tensor: &FluxTensor,
    registry: &SeriesRegistry,
    applies: impl Fn(usize) -> bool,
) -> Result<(), PipelineError> {
    for (idx, meta) in registry.iter().enumerate() {
        if meta.required() && applies(idx) && tensor.series_is_all_nan(idx) {
            return Err(PipelineError::NoData {
                series: meta.name().to_string(),
            });
        }
    }
    Ok(())
}
