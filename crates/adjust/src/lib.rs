//! # fluxrec-adjust
//!
//! Post-processing passes, each enabled by [`AdjustConfig`]:
//!
//! - [`apply_correction`] subtracts the NaN-as-zero sum of removal series
//!   from every series flagged for correction.
//! - [`detrend`] z-normalises each series/group over its non-NaN years.
//!   Only point estimates can be detrended.

mod config;
mod correction;
mod detrend;
mod error;

pub use config::AdjustConfig;
pub use correction::apply_correction;
pub use detrend::detrend;
pub use error::AdjustError;
