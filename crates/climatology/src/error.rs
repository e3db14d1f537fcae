//! Error types for the koppen-climatology crate.

use koppen_calendar::YearMonth;

/// Error type for all fallible operations in the koppen-climatology crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClimatologyError {
    /// Returned when the requested year range is reversed.
    #[error("invalid year range: {start_year}..={end_year}")]
    InvalidYearRange {
        /// First requested year.
        start_year: i32,
        /// Last requested year.
        end_year: i32,
    },

    /// Returned when a season has an invalid start month or duration.
    #[error("invalid season: start month {start_month}, duration {duration} (must be 1..=12 each)")]
    InvalidSeason {
        /// Requested first month.
        start_month: u8,
        /// Requested number of months.
        duration: u8,
    },

    /// Returned when the time axis has too few samples to infer a frequency.
    #[error("time axis has {n} samples, need at least 2")]
    TooFewSamples {
        /// Number of samples on the axis.
        n: usize,
    },

    /// Returned when the mean sample spacing is coarser than monthly.
    #[error("unsupported sampling frequency: mean spacing {spacing_days} days (data must be monthly or finer)")]
    UnsupportedFrequency {
        /// Mean spacing between samples, in days.
        spacing_days: f64,
    },

    /// Returned when the time axis does not span the requested years.
    #[error("time axis ({first} to {last}) does not cover years {start_year}..={end_year}")]
    DateRange {
        /// First requested year.
        start_year: i32,
        /// Last requested year.
        end_year: i32,
        /// Year and month of the first sample.
        first: YearMonth,
        /// Year and month of the last sample.
        last: YearMonth,
    },

    /// Returned when explicit sample weights do not match the time axis.
    #[error("sample weights: expected {expected} elements, got {got}")]
    WeightsLengthMismatch {
        /// Number of samples on the time axis.
        expected: usize,
        /// Number of weights supplied.
        got: usize,
    },

    /// Returned when an explicit sample weight is negative or non-finite.
    #[error("invalid sample weight {value} at index {index}")]
    InvalidWeight {
        /// Index of the offending weight.
        index: usize,
        /// The offending weight.
        value: f64,
    },

    /// Returned when the time-axis position is outside the field's dimensions.
    #[error("time axis position {axis} out of bounds for {ndim}-dimensional field")]
    InvalidTimeAxis {
        /// Requested time-axis position.
        axis: usize,
        /// Number of dimensions of the field.
        ndim: usize,
    },

    /// Returned when a field's time dimension does not match the time axis.
    #[error("field has {got} time steps, time axis has {expected}")]
    TimeLengthMismatch {
        /// Number of samples on the time axis.
        expected: usize,
        /// Length of the field's time dimension.
        got: usize,
    },

    /// Returned when climatology arrays disagree in shape.
    #[error("{field}: expected shape {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Name of the mismatched array.
        field: &'static str,
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] koppen_calendar::CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unsupported_frequency() {
        let e = ClimatologyError::UnsupportedFrequency { spacing_days: 91.25 };
        assert_eq!(
            e.to_string(),
            "unsupported sampling frequency: mean spacing 91.25 days (data must be monthly or finer)"
        );
    }

    #[test]
    fn display_date_range() {
        let e = ClimatologyError::DateRange {
            start_year: 1979,
            end_year: 2010,
            first: YearMonth::new(1980, 1).unwrap(),
            last: YearMonth::new(2014, 12).unwrap(),
        };
        assert_eq!(
            e.to_string(),
            "time axis (1980-01 to 2014-12) does not cover years 1979..=2010"
        );
    }

    #[test]
    fn display_shape_mismatch() {
        let e = ClimatologyError::ShapeMismatch {
            field: "monthly",
            expected: vec![12, 2, 3],
            got: vec![12, 3, 2],
        };
        assert_eq!(e.to_string(), "monthly: expected shape [12, 2, 3], got [12, 3, 2]");
    }

    #[test]
    fn from_calendar_error() {
        let inner = koppen_calendar::CalendarError::InvalidMonth { month: 0 };
        let e: ClimatologyError = inner.clone().into();
        assert_eq!(e, ClimatologyError::Calendar(inner));
        assert_eq!(e.to_string(), "invalid month: 0 (must be 1..=12)");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ClimatologyError>();
    }
}
