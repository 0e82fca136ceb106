//! Unit normalisation for flux series.
//!
//! A static table maps recognised unit strings onto a [`Unit`]; conversion
//! between two units is allowed only inside one family. Mass-flux units
//! differ by powers of ten (and, between carbon and CO2 mass, by the molar
//! mass ratio). Relative units (percent, fraction) pass through or scale by
//! 100.
//!
//! ```
//! use fluxrec_units::{Unit, conversion_factor};
//!
//! let from = Unit::parse("kg C yr-1").unwrap();
//! let to = Unit::parse("Tg C yr-1").unwrap();
//! let factor = conversion_factor(from, to).unwrap();
//! assert!((factor - 1e-9).abs() < 1e-21);
//! ```

mod error;
mod table;
mod unit;

pub use error::UnitError;
pub use table::recognised_units;
pub use unit::{Conversion, Species, Unit, conversion_factor, convert_in_place};
