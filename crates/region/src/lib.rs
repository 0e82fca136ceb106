//! # fluxrec-region
//!
//! Maps raw per-country/region columns onto an ordered list of plot groups.
//!
//! A plot group is either a raw code or a named union of codes. Unions come
//! from a static table ([`UnionTable::builtin`]) optionally extended by the
//! caller, and every group is resolved against the known codes before any
//! data is touched ([`resolve_groups`]).
//!
//! [`group_input`] then sums values and bounds over each group's codes and
//! combines percentage errors in quadrature:
//!
//! ```text
//! err_out = sqrt(sum((err_i * value_i)^2)) / |sum(value_i)|
//! ```
//!
//! A [`LeakageTable`] forces selected series to NaN outside the groups they
//! are trusted for.

mod aggregate;
mod config;
mod error;
mod group;
mod leakage;
mod table;

pub use aggregate::group_input;
pub use config::AggregateConfig;
pub use error::RegionError;
pub use group::{PlotGroup, resolve_groups};
pub use leakage::LeakageTable;
pub use table::{BUILTIN_UNIONS, UnionTable};
