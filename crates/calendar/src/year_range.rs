//! Inclusive year grid.

use crate::error::CalendarError;

/// The ordered, inclusive sequence of years a run operates over.
///
/// Fixed for a whole run and shared by every series after resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYearRange`] if `end < start`.
    pub fn new(start: i32, end: i32) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First year of the range.
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Last year of the range (inclusive).
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of years in the range. Never zero.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Always `false`; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `year` lies inside the range.
    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Index of `year` within the range, or `None` if outside.
    pub fn index_of(&self, year: i32) -> Option<usize> {
        self.contains(year).then(|| (year - self.start) as usize)
    }

    /// Year at position `idx`, or `None` past the end.
    pub fn year_at(&self, idx: usize) -> Option<i32> {
        (idx < self.len()).then(|| self.start + idx as i32)
    }

    /// Iterates the years in order.
    pub fn iter(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Collects the years into a vector.
    pub fn years(&self) -> Vec<i32> {
        self.iter().collect()
    }

    /// Returns `true` if the two ranges share at least one year.
    pub fn overlaps(&self, other: &YearRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
