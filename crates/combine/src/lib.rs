//! # fluxrec-combine
//!
//! Overwrites placeholder series with combinations of other series.
//!
//! | Operation | Value | Uncertainty |
//! |-----------|-------|-------------|
//! | `sum` | `Σ c_i * v_i` | errors in quadrature, bounds derived |
//! | `mean` | mean of sources, NaN if any source is NaN | min/max of sources, error derived |
//!
//! Rules run in order, so a later rule may use an earlier rule's target as
//! a source. After each rule, target cells that came out exactly zero are
//! remapped to NaN.

mod combiner;
mod error;
mod rule;

pub use combiner::combine_simulations;
pub use error::CombineError;
pub use rule::{CombinationRule, CombineOp};
