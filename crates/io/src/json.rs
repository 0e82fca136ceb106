//! JSON files on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IoError;
use crate::source::{FluxSource, SourceFile};

/// Reads source files as JSON documents relative to a root directory.
#[derive(Debug, Clone)]
pub struct JsonSource {
    root: PathBuf,
}

impl JsonSource {
    /// Source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FluxSource for JsonSource {
    fn load(&self, file: &str) -> Result<SourceFile, IoError> {
        let path = self.root.join(file);
        if !path.exists() {
            return Err(IoError::FileNotFound { path });
        }
        let text = std::fs::read_to_string(&path).map_err(|e| IoError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let parsed: SourceFile = serde_json::from_str(&text).map_err(|e| IoError::Parse {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        parsed.validate()?;
        debug!(
            path = %path.display(),
            n_steps = parsed.time.len(),
            n_codes = parsed.codes.len(),
            n_variables = parsed.variables.len(),
            "loaded source file"
        );
        Ok(parsed)
    }
}
