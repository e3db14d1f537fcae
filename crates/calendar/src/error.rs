//! Error types for the koppen-calendar crate.

use crate::date::CalendarDate;

/// Error type for all fallible operations in the koppen-calendar crate.
///
/// Covers calendar name resolution, month and day validation, CF time
/// unit parsing, and time-axis construction and lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a calendar name is not one of the supported CF calendars.
    #[error("unsupported calendar '{name}'")]
    UnsupportedCalendar {
        /// The calendar name as provided.
        name: String,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month.
        max_day: u8,
    },

    /// Returned for dates dropped by the 1582 Gregorian reform in the
    /// mixed Julian/Gregorian calendar (1582-10-05 through 1582-10-14).
    #[error("date {year}-{month:02}-{day:02} does not exist in the standard calendar")]
    NonexistentDate {
        /// Year of the rejected date.
        year: i32,
        /// Month of the rejected date.
        month: u8,
        /// Day of the rejected date.
        day: u8,
    },

    /// Returned when a date cannot be represented by the day-count arithmetic.
    #[error("year {year} is outside the representable range")]
    YearOutOfRange {
        /// The offending year.
        year: i64,
    },

    /// Returned when a CF time units string cannot be parsed.
    #[error("invalid time units '{units}': {reason}")]
    InvalidTimeUnits {
        /// The units string as provided.
        units: String,
        /// Description of what failed to parse.
        reason: String,
    },

    /// Returned when a time axis has no samples.
    #[error("time axis is empty")]
    EmptyTimeAxis,

    /// Returned when a time coordinate is non-finite or does not strictly
    /// increase from its predecessor.
    #[error("time axis is not strictly increasing at index {index} (value {value})")]
    NonMonotonicTimeAxis {
        /// Index of the offending sample.
        index: usize,
        /// The offending coordinate value.
        value: f64,
    },

    /// Returned when a probe date lies outside the span of the time axis.
    #[error("date {date} is not covered by the time axis ({first} to {last})")]
    RangeNotCovered {
        /// The probe date.
        date: CalendarDate,
        /// Date of the first sample on the axis.
        first: CalendarDate,
        /// Date of the last sample on the axis.
        last: CalendarDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unsupported_calendar() {
        let err = CalendarError::UnsupportedCalendar {
            name: "lunar".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported calendar 'lunar'");
    }

    #[test]
    fn error_invalid_month() {
        let err = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_invalid_day() {
        let err = CalendarError::InvalidDay {
            day: 29,
            month: 2,
            max_day: 28,
        };
        assert_eq!(err.to_string(), "invalid day: 29 for month 2 (max 28)");
    }

    #[test]
    fn error_nonexistent_date() {
        let err = CalendarError::NonexistentDate {
            year: 1582,
            month: 10,
            day: 10,
        };
        assert_eq!(
            err.to_string(),
            "date 1582-10-10 does not exist in the standard calendar"
        );
    }

    #[test]
    fn error_range_not_covered() {
        let err = CalendarError::RangeNotCovered {
            date: CalendarDate::from_parts(1990, 1, 1),
            first: CalendarDate::from_parts(2000, 1, 16),
            last: CalendarDate::from_parts(2009, 12, 16),
        };
        assert_eq!(
            err.to_string(),
            "date 1990-01-01 is not covered by the time axis (2000-01-16 to 2009-12-16)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_partial_eq() {
        let a = CalendarError::InvalidMonth { month: 0 };
        let b = CalendarError::InvalidMonth { month: 0 };
        assert_eq!(a, b);

        let c = CalendarError::InvalidMonth { month: 13 };
        assert_ne!(a, c);
    }
}
