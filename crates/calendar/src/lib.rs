//! # fluxrec-calendar
//!
//! Year grids and time-axis arithmetic shared by every stage of the
//! reconciliation pipeline.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["CF units string"] -->|"TimeAxis::from_cf_units()"| B["TimeAxis"]
//!     B -->|".year_month(offset)"| C["YearMonth"]
//!     C -->|"YearRange::index_of()"| D["year index"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use fluxrec_calendar::{TimeAxis, YearRange};
//!
//! let years = YearRange::new(2000, 2001).unwrap();
//! let axis = TimeAxis::from_cf_units("days since 2000-01-01").unwrap();
//!
//! let ym = axis.year_month(59.0).unwrap(); // 2000 is a leap year
//! assert_eq!((ym.year(), ym.month()), (2000, 2));
//! assert_eq!(years.index_of(ym.year()), Some(0));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `year_range` | Inclusive year grid shared by all series of a run |
//! | `time_axis` | Day-offset time axis with a fixed origin |
//! | `error` | Error types |

mod error;
mod time_axis;
mod year_range;

pub use error::CalendarError;
pub use time_axis::{TimeAxis, YearMonth, days_in_month};
pub use year_range::YearRange;
