//! # fluxrec-flux
//!
//! Data model shared by every reconciliation stage.
//!
//! - [`SeriesKind`] is the closed set of source categories. Its
//!   [`produce`](SeriesKind::produce) routine turns raw annual arrays into a
//!   [`RawSeries`] with exactly one uncertainty representation.
//! - [`SeriesRegistry`] maps series names to records; integer indices exist
//!   only at the tensor boundary.
//! - [`FluxTensor`] holds the `[series, year, group]` value, error, min and
//!   max arrays, all of identical shape.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `kind` | Series kinds and kind-specific production |
//! | `series` | Series metadata and the name registry |
//! | `block` | 2-D `[year, column]` value/error/min/max quadruple |
//! | `tensor` | 3-D tensor and cell coordinates |
//! | `error` | Error types |

mod block;
mod error;
mod kind;
mod series;
mod tensor;

pub use block::{RawSeries, RawUncertainty, SeriesBlock};
pub use error::FluxError;
pub use kind::{SeriesKind, UncertaintyForm};
pub use series::{SeriesMeta, SeriesRegistry};
pub use tensor::{CellRef, FluxTensor};
