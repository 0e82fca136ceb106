//! Configuration for the post-processing passes.

use std::collections::HashSet;

use crate::error::AdjustError;

/// Which post-processing passes run, and with what.
///
/// Both passes are off by default. Correction runs when at least one
/// removal series is named.
///
/// # Example
///
/// ```
/// use fluxrec_adjust::AdjustConfig;
///
/// let config = AdjustConfig::new()
///     .with_removals(vec!["Lakes".to_string(), "Rivers".to_string()]);
/// assert!(config.correction_enabled());
/// assert!(!config.detrend_enabled());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustConfig {
    removals: Vec<String>,
    detrend: bool,
}

impl AdjustConfig {
    /// Creates a configuration with both passes disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the removal series subtracted by the correction pass.
    pub fn with_removals(mut self, removals: Vec<String>) -> Self {
        self.removals = removals;
        self
    }

    /// Enables or disables detrending.
    pub fn with_detrend(mut self, detrend: bool) -> Self {
        self.detrend = detrend;
        self
    }

    /// Returns the removal series names.
    pub fn removals(&self) -> &[String] {
        &self.removals
    }

    /// Returns `true` if the correction pass runs.
    pub fn correction_enabled(&self) -> bool {
        !self.removals.is_empty()
    }

    /// Returns `true` if the detrend pass runs.
    pub fn detrend_enabled(&self) -> bool {
        self.detrend
    }

    /// Validates this configuration.
    ///
    /// Checks that no removal series is listed twice.
    pub fn validate(&self) -> Result<(), AdjustError> {
        let mut seen = HashSet::new();
        if let Some(dup) = self.removals.iter().find(|r| !seen.insert(r.as_str())) {
            return Err(AdjustError::InvalidConfig {
                reason: format!("removal '{dup}' listed more than once"),
            });
        }
        Ok(())
    }
}
