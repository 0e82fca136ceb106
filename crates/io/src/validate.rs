//! Accumulated structural validation of source files.
//!
//! Every problem in a file is collected before failing, so one run reports
//! all of them at once.

use std::collections::HashSet;

use crate::error::IoError;
use crate::source::SourceFile;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` if nothing was recorded, otherwise every message joined
    /// with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Checks codes, time offsets and every variable's row/column counts.
pub(crate) fn validate_source(file: &SourceFile) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    if file.codes.is_empty() {
        c.push("no codes declared");
    }
    let mut seen = HashSet::new();
    for code in &file.codes {
        if !seen.insert(code.as_str()) {
            c.push(format!("code '{code}' declared more than once"));
        }
    }

    for (i, t) in file.time.iter().enumerate() {
        if !t.is_finite() {
            c.push(format!("non-finite time offset at index {i}"));
        }
    }

    let n_steps = file.time.len();
    let n_codes = file.codes.len();
    for (name, var) in &file.variables {
        if var.data.len() != n_steps {
            c.push(format!(
                "variable '{name}' has {} time steps, time axis has {n_steps}",
                var.data.len()
            ));
        }
        if let Some((t, row)) = var
            .data
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_codes)
        {
            c.push(format!(
                "variable '{name}' row {t} has {} columns, expected {n_codes}",
                row.len()
            ));
        }
    }

    c
}
