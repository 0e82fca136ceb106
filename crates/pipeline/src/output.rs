//! Result of a pipeline run.

use fluxrec_flux::{FluxTensor, SeriesRegistry};
use fluxrec_io::{ExportTable, export_tables};
use fluxrec_reconcile::ReconcileReport;
use fluxrec_region::PlotGroup;

/// The reconciled tensor together with everything needed to interpret it.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub(crate) registry: SeriesRegistry,
    pub(crate) groups: Vec<PlotGroup>,
    pub(crate) tensor: FluxTensor,
    pub(crate) reconcile: ReconcileReport,
}

impl PipelineOutput {
    /// Series metadata, including labels rewritten by the correction pass.
    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    /// Resolved plot groups, in column order.
    pub fn groups(&self) -> &[PlotGroup] {
        &self.groups
    }

    /// The `[series, year, group]` tensor.
    pub fn tensor(&self) -> &FluxTensor {
        &self.tensor
    }

    /// Provenance of each cell's uncertainty, as reconciled.
    pub fn reconcile_report(&self) -> &ReconcileReport {
        &self.reconcile
    }

    /// Value of `series` in `year` for `group`, by name.
    pub fn value(&self, series: &str, year: i32, group: &str) -> Option<f64> {
        let s = self.registry.index_of(series).ok()?;
        let y = self.tensor.years().index_of(year)?;
        let g = self.tensor.group_index(group)?;
        Some(self.tensor.value()[[s, y, g]])
    }

    /// Percentage error of `series` in `year` for `group`, by name.
    pub fn error(&self, series: &str, year: i32, group: &str) -> Option<f64> {
        let s = self.registry.index_of(series).ok()?;
        let y = self.tensor.years().index_of(year)?;
        let g = self.tensor.group_index(group)?;
        Some(self.tensor.error()[[s, y, g]])
    }

    /// Tabular projection, one table per plot group.
    pub fn export(&self) -> Vec<ExportTable> {
        export_tables(&self.tensor, &self.registry)
    }
}
