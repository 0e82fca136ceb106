//! Day-offset time axis with a fixed origin.

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::error::CalendarError;

/// A calendar month with year context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Creates a new `YearMonth`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Zero-based month index (0..12), handy for array slots.
    pub fn month_index(self) -> usize {
        (self.month - 1) as usize
    }
}

/// Number of days in `month` of `year` in the proleptic Gregorian calendar.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            Ok(if leap { 29 } else { 28 })
        }
        _ => Err(CalendarError::InvalidMonth { month }),
    }
}

/// Absolute time axis: offsets are days since a fixed origin (day 0).
///
/// Offsets are placed on the Gregorian calendar, so month lengths of 28–31
/// days and leap years are honoured exactly. Fractional offsets are floored
/// to the day they fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    origin: NaiveDate,
}

impl TimeAxis {
    /// Creates an axis whose day 0 is `origin`.
    pub fn new(origin: NaiveDate) -> Self {
        Self { origin }
    }

    /// Parses CF-convention units like `"days since YYYY-MM-DD"` or
    /// `"days since YYYY-MM-DD HH:MM:SS"`.
    ///
    /// Only day offsets are supported; the time-of-day part is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTimeUnits`] if the string is not of
    /// the form `days since <date>` or the date cannot be parsed.
    pub fn from_cf_units(units: &str) -> Result<Self, CalendarError> {
        let invalid = |reason: String| CalendarError::InvalidTimeUnits {
            units: units.to_string(),
            reason,
        };

        let mut words = units.split_whitespace();
        let (Some(unit), Some("since"), Some(origin)) = (words.next(), words.next(), words.next())
        else {
            return Err(invalid("expected '<unit> since <date>'".to_string()));
        };
        if !matches!(unit, "days" | "day" | "d") {
            return Err(invalid(format!(
                "unsupported offset unit '{unit}', only days are recognised"
            )));
        }

        // ISO form "YYYY-MM-DDTHH:MM:SS" carries the time in the same word.
        let date_str = origin.split('T').next().unwrap_or(origin);

        let origin = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| invalid(format!("failed to parse origin date '{date_str}': {e}")))?;

        Ok(Self { origin })
    }

    /// Origin date of the axis.
    pub fn origin(&self) -> NaiveDate {
        self.origin
    }

    /// Calendar month containing the day at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OffsetOutOfRange`] for non-finite offsets or
    /// offsets that overflow the calendar.
    pub fn year_month(&self, offset: f64) -> Result<YearMonth, CalendarError> {
        let out_of_range = || CalendarError::OffsetOutOfRange {
            offset,
            origin: self.origin.to_string(),
        };

        if !offset.is_finite() {
            return Err(out_of_range());
        }

        let days = TimeDelta::try_days(offset.floor() as i64).ok_or_else(out_of_range)?;
        let date = self
            .origin
            .checked_add_signed(days)
            .ok_or_else(out_of_range)?;

        Ok(YearMonth {
            year: date.year(),
            month: date.month() as u8,
        })
    }

    /// Offset (in days) of the first day of `ym` relative to the origin.
    pub fn offset_of(&self, ym: YearMonth) -> Option<f64> {
        let first = NaiveDate::from_ymd_opt(ym.year, ym.month as u32, 1)?;
        Some((first - self.origin).num_days() as f64)
    }
}
