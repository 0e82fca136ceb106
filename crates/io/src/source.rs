//! Raw data sources.

use std::collections::BTreeMap;

use fluxrec_calendar::TimeAxis;
use fluxrec_resample::MonthlyGrid;
use serde::{Deserialize, Serialize};

use crate::error::IoError;
use crate::validate::validate_source;

/// One variable of a source file: a unit and a time-major table of values,
/// `null` where missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceVariable {
    /// Declared physical unit.
    pub unit: String,
    /// `data[t][c]` is the value at time step `t` for code `c`.
    pub data: Vec<Vec<Option<f64>>>,
}

/// Monthly per-code data of one source, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFile {
    /// CF time units, e.g. `"days since 1900-01-01"`.
    pub time_units: String,
    /// Day offsets of each time step.
    pub time: Vec<f64>,
    /// Country/region code of each column.
    pub codes: Vec<String>,
    /// Variables by name.
    #[serde(default)]
    pub variables: BTreeMap<String, SourceVariable>,
}

/// A variable ready for resampling.
#[derive(Debug, Clone, PartialEq)]
pub struct RawVariable {
    /// Declared unit.
    pub unit: String,
    /// Monthly grid with NaN for missing entries.
    pub grid: MonthlyGrid,
}

impl SourceFile {
    /// Checks the file's internal consistency, reporting every problem.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing each violation.
    pub fn validate(&self) -> Result<(), IoError> {
        validate_source(self).finish()
    }

    /// Reads variable `name`, or `Ok(None)` if the file does not declare it.
    ///
    /// # Errors
    ///
    /// Returns an error if the time units cannot be parsed or the variable's
    /// shape disagrees with the file's axes.
    pub fn read_variable(&self, name: &str) -> Result<Option<RawVariable>, IoError> {
        let Some(var) = self.variables.get(name) else {
            return Ok(None);
        };
        let axis = TimeAxis::from_cf_units(&self.time_units)?;
        let values: Vec<f64> = var
            .data
            .iter()
            .flat_map(|row| row.iter().map(|v| v.unwrap_or(f64::NAN)))
            .collect();
        let grid = MonthlyGrid::new(axis, self.time.clone(), self.codes.len(), values)?;
        Ok(Some(RawVariable {
            unit: var.unit.clone(),
            grid,
        }))
    }
}

/// Anything that can hand out source files by identifier.
pub trait FluxSource {
    /// Loads and validates the file identified by `file`.
    fn load(&self, file: &str) -> Result<SourceFile, IoError>;
}

/// In-memory source, keyed by file identifier.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, SourceFile>,
}

impl MemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file under `id`.
    pub fn with_file(mut self, id: impl Into<String>, file: SourceFile) -> Self {
        self.files.insert(id.into(), file);
        self
    }
}

impl FluxSource for MemorySource {
    fn load(&self, file: &str) -> Result<SourceFile, IoError> {
        let found = self
            .files
            .get(file)
            .cloned()
            .ok_or_else(|| IoError::FileNotFound { path: file.into() })?;
        found.validate()?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> SourceFile {
        let mut variables = BTreeMap::new();
        variables.insert(
            "flux".to_string(),
            SourceVariable {
                unit: "Tg C yr-1".to_string(),
                data: vec![vec![Some(1.0), None]],
            },
        );
        variables.insert(
            "flux_error".to_string(),
            SourceVariable {
                unit: "%".to_string(),
                data: vec![vec![None, None]],
            },
        );
        SourceFile {
            time_units: "days since 2000-01-01".to_string(),
            time: vec![15.0],
            codes: vec!["FRA".to_string(), "AND".to_string()],
            variables,
        }
    }

    #[test]
    fn missing_variable_is_none() {
        assert!(file().read_variable("flux_min").unwrap().is_none());
    }

    #[test]
    fn all_null_variable_is_some() {
        let var = file().read_variable("flux_error").unwrap().unwrap();
        assert!(var.grid.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn nulls_become_nan() {
        let var = file().read_variable("flux").unwrap().unwrap();
        assert_eq!(var.grid.row(0)[0], 1.0);
        assert!(var.grid.row(0)[1].is_nan());
        assert_eq!(var.unit, "Tg C yr-1");
    }

    #[test]
    fn memory_source_unknown_file() {
        let src = MemorySource::new().with_file("a", file());
        assert!(src.load("a").is_ok());
        assert!(matches!(src.load("b"), Err(IoError::FileNotFound { .. })));
    }
}
