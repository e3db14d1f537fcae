//! Calendar dates and year-month counters.

use std::fmt;

use crate::calendar::Calendar;
use crate::error::CalendarError;

/// A validated date in some [`Calendar`].
///
/// The calendar itself is not stored; the date was validated against the
/// calendar passed to [`CalendarDate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Creates a date, checking it exists in `calendar`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] or [`CalendarError::InvalidDay`]
    /// for out-of-range components, and [`CalendarError::NonexistentDate`]
    /// for the days dropped by the Gregorian reform in the standard calendar.
    pub fn new(year: i32, month: u8, day: u8, calendar: Calendar) -> Result<Self, CalendarError> {
        let max_day = calendar.days_in_month(year, month)?;
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        if calendar == Calendar::Standard && year == 1582 && month == 10 && (5..=14).contains(&day)
        {
            return Err(CalendarError::NonexistentDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Builds a date from components already known to be valid.
    pub(crate) fn from_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the year and month of this date.
    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    /// Returns the following day in `calendar`.
    ///
    /// In the standard calendar 1582-10-04 is followed by 1582-10-15.
    pub fn next_day(self, calendar: Calendar) -> Self {
        if calendar == Calendar::Standard && (self.year, self.month, self.day) == (1582, 10, 4) {
            return Self::from_parts(1582, 10, 15);
        }
        let len = calendar.days_in_month(self.year, self.month).unwrap_or(31);
        if self.day < len {
            Self::from_parts(self.year, self.month, self.day + 1)
        } else if self.month < 12 {
            Self::from_parts(self.year, self.month + 1, 1)
        } else {
            Self::from_parts(self.year + 1, 1, 1)
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A (year, month) pair, ordered chronologically.
///
/// [`YearMonth::index`] maps it onto a monotonic month count so that
/// month arithmetic across year boundaries is plain integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Creates a year-month pair.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// Inverse of [`YearMonth::index`].
    pub fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u8 + 1,
        }
    }

    /// Monotonic month count, `12 * year + month - 1`.
    pub fn index(self) -> i64 {
        12 * i64::from(self.year) + i64::from(self.month) - 1
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Shifts by `months` (which may be negative).
    pub fn add_months(self, months: i64) -> Self {
        Self::from_index(self.index() + months)
    }

    /// First day of this month.
    pub fn first_day(self) -> CalendarDate {
        CalendarDate::from_parts(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
