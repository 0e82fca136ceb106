//! Tabular projection of the reconciled tensor.

use std::path::Path;

use fluxrec_flux::{FluxTensor, SeriesRegistry};
use ndarray::{ArrayView1, s};
use serde::Serialize;

use crate::error::IoError;

/// One exported row: a label and one value per year, `null` where missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    /// Display label, with a ` MIN` or ` MAX` suffix on bound rows.
    pub label: String,
    /// Registry name of the series the row comes from.
    pub series: String,
    /// Whether the series is a production (not illustrative) series.
    pub production: bool,
    /// One cell per year of the table.
    pub values: Vec<Option<f64>>,
}

/// All rows of one plot group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportTable {
    /// Plot group name.
    pub group: String,
    /// Column years, in order.
    pub years: Vec<i32>,
    /// Rows in registry order.
    pub rows: Vec<ExportRow>,
}

fn to_cells(lane: ArrayView1<'_, f64>) -> Vec<Option<f64>> {
    lane.iter().map(|v| (!v.is_nan()).then_some(*v)).collect()
}

fn differs(bound: ArrayView1<'_, f64>, value: ArrayView1<'_, f64>) -> bool {
    bound
        .iter()
        .zip(value.iter())
        .any(|(b, v)| !b.is_nan() && b != v)
}

/// Rows for plot group `group`: one per displayed series with any data,
/// followed by `MIN`/`MAX` rows when a bound differs from the value.
pub fn export_group(tensor: &FluxTensor, registry: &SeriesRegistry, group: usize) -> ExportTable {
    let mut rows = Vec::new();
    for (series, meta) in registry.iter().enumerate() {
        if !meta.display() {
            continue;
        }
        let value = tensor.value().slice(s![series, .., group]);
        if value.iter().all(|v| v.is_nan()) {
            continue;
        }
        let row = |label: String, lane: ArrayView1<'_, f64>| ExportRow {
            label,
            series: meta.name().to_string(),
            production: meta.production(),
            values: to_cells(lane),
        };
        rows.push(row(meta.label().to_string(), value));

        let min = tensor.min().slice(s![series, .., group]);
        let max = tensor.max().slice(s![series, .., group]);
        if differs(min, value) {
            rows.push(row(format!("{} MIN", meta.label()), min));
        }
        if differs(max, value) {
            rows.push(row(format!("{} MAX", meta.label()), max));
        }
    }

    ExportTable {
        group: tensor.groups().get(group).cloned().unwrap_or_default(),
        years: tensor.years().years(),
        rows,
    }
}

/// One table per plot group, in group order.
pub fn export_tables(tensor: &FluxTensor, registry: &SeriesRegistry) -> Vec<ExportTable> {
    (0..tensor.groups().len())
        .map(|g| export_group(tensor, registry, g))
        .collect()
}

/// Serialize tables to a pretty-printed JSON string.
pub fn to_json(tables: &[ExportTable]) -> Result<String, IoError> {
    serde_json::to_string_pretty(tables).map_err(|e| IoError::Serialization {
        reason: e.to_string(),
    })
}

/// Serialize tables and write them to `path`.
pub fn write_json(path: &Path, tables: &[ExportTable]) -> Result<(), IoError> {
    let json = to_json(tables)?;
    std::fs::write(path, json).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), n_tables = tables.len(), "wrote export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxrec_calendar::YearRange;
    use fluxrec_flux::{SeriesKind, SeriesMeta};

    fn setup() -> (FluxTensor, SeriesRegistry) {
        let registry = SeriesRegistry::new(vec![
            SeriesMeta::new("INV", SeriesKind::Inventory).with_display_name("Inventory"),
            SeriesMeta::new("HIDDEN", SeriesKind::Trendy).with_display(false),
            SeriesMeta::new("EMPTY", SeriesKind::Other),
            SeriesMeta::new("PT", SeriesKind::Other).with_production(false),
        ])
        .unwrap();
        let mut t = FluxTensor::new(4, YearRange::new(2000, 2001).unwrap(), vec!["FMA".into()]);
        for y in 0..2 {
            t.value_mut()[[0, y, 0]] = 1.0;
            t.min_mut()[[0, y, 0]] = 0.9;
            t.max_mut()[[0, y, 0]] = 1.1;
            t.value_mut()[[1, y, 0]] = 5.0;
            t.value_mut()[[3, y, 0]] = 2.0;
            t.min_mut()[[3, y, 0]] = 2.0;
            t.max_mut()[[3, y, 0]] = 2.0;
        }
        t.value_mut()[[3, 1, 0]] = f64::NAN;
        t.min_mut()[[3, 1, 0]] = f64::NAN;
        t.max_mut()[[3, 1, 0]] = f64::NAN;
        (t, registry)
    }

    #[test]
    fn rows_follow_display_rules() {
        let (t, reg) = setup();
        let table = export_group(&t, &reg, 0);
        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Inventory", "Inventory MIN", "Inventory MAX", "PT"]
        );
        assert_eq!(table.group, "FMA");
        assert_eq!(table.years, [2000, 2001]);
    }

    #[test]
    fn nan_becomes_null() {
        let (t, reg) = setup();
        let table = export_group(&t, &reg, 0);
        let pt = table.rows.iter().find(|r| r.series == "PT").unwrap();
        assert_eq!(pt.values, [Some(2.0), None]);
        assert!(!pt.production);
    }

    #[test]
    fn json_contains_tables() {
        let (t, reg) = setup();
        let json = to_json(&export_tables(&t, &reg)).unwrap();
        assert!(json.contains("\"group\": \"FMA\""));
        assert!(json.contains("\"label\": \"Inventory MIN\""));
        assert!(json.contains("null"));
    }
}
