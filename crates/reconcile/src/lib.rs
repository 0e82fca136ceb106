//! # fluxrec-reconcile
//!
//! Brings every tensor cell to one consistent uncertainty representation.
//!
//! ```text
//! check min/max agreement ──► check error vs. min/max exclusivity
//!        ──► zero → NaN ──► derive the missing representation
//! ```
//!
//! Both checks are fatal and report series, year and plot group. The
//! derivations are:
//!
//! - from a percentage error: `min/max = value ∓ |value| * error / 100`
//! - from bounds: `error = 0.5 * (max - min) / |value| * 100`
//!
//! The second is a symmetric approximation; it is the exact inverse of the
//! first only for symmetric bounds and grows without limit as `value`
//! approaches zero.

mod derive;
mod error;
mod reconciler;

pub use derive::{bounds_from_percent, percent_from_bounds};
pub use error::ReconcileError;
pub use reconciler::{ReconcileReport, UncertaintySource, reconcile};
