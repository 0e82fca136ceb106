//! # fluxrec-pipeline
//!
//! Drives every stage over one run, in a fixed order:
//!
//! ```text
//! read (resample + units + kind) ─► resolve plot groups ─► aggregate
//!   ─► reconcile ─► combine ─► correct ─► detrend
//! ```
//!
//! Each stage completes before the next starts, and any error aborts the
//! run. Required series are checked for data after reconciliation (read
//! series) and after combination (placeholders).
//!
//! [`PipelineError::class`] tells configuration problems from data integrity
//! violations and unit failures.

mod config;
mod error;
mod output;
mod run;

pub use config::{PipelineConfig, SeriesSpec};
pub use error::{ErrorClass, PipelineError};
pub use output::PipelineOutput;
pub use run::run;
