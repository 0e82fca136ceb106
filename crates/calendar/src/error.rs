//! Error types for the fluxrec-calendar crate.

/// Error type for all fallible operations in the fluxrec-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a year range ends before it starts.
    #[error("invalid year range: {start}..={end}")]
    InvalidYearRange {
        /// First year of the range.
        start: i32,
        /// Last year of the range.
        end: i32,
    },

    /// Returned when a month number is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number.
        month: u8,
    },

    /// Returned when a time-units string cannot be parsed.
    #[error("invalid time units '{units}': {reason}")]
    InvalidTimeUnits {
        /// The offending units string.
        units: String,
        /// What went wrong.
        reason: String,
    },

    /// Returned when an offset cannot be placed on the calendar.
    #[error("time offset {offset} is out of range for origin {origin}")]
    OffsetOutOfRange {
        /// Offset in days from the origin.
        offset: f64,
        /// Origin date of the axis.
        origin: String,
    },
}
