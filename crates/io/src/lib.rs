//! # fluxrec-io
//!
//! Bridges external data into the reconciliation core and projects the
//! reconciled tensor back out.
//!
//! - [`FluxSource`] loads a [`SourceFile`]: monthly grids per variable over a
//!   CF time axis and a list of country/region codes. A variable the file
//!   does not declare reads as `Ok(None)`, distinct from one whose values
//!   are all missing.
//! - [`read_series`] annualises, unit-normalises and kind-dispatches one
//!   series into a [`RawSeries`](fluxrec_flux::RawSeries).
//! - [`export_tables`] flattens the tensor into one [`ExportTable`] per
//!   plot group for serialisation with [`to_json`].

mod error;
mod export;
mod json;
mod read;
mod source;
mod validate;

pub use error::IoError;
pub use export::{ExportRow, ExportTable, export_group, export_tables, to_json, write_json};
pub use json::JsonSource;
pub use read::{VariableNames, read_series};
pub use source::{FluxSource, MemorySource, RawVariable, SourceFile, SourceVariable};
