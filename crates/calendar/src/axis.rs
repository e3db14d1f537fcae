//! Time axis with calendar-aware date lookup.

use crate::calendar::Calendar;
use crate::date::CalendarDate;
use crate::error::CalendarError;
use crate::units::TimeUnits;

/// Which insertion point [`TimeAxis::date_to_index`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// First index whose coordinate is `>=` the probe.
    #[default]
    Left,
    /// First index whose coordinate is `>` the probe.
    Right,
}

/// Strictly increasing numeric time coordinates with their units and calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    values: Vec<f64>,
    units: TimeUnits,
}

impl TimeAxis {
    /// Creates a time axis.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::EmptyTimeAxis`] if `values` is empty and
    /// [`CalendarError::NonMonotonicTimeAxis`] if any value is non-finite or
    /// not strictly greater than its predecessor.
    pub fn new(values: Vec<f64>, units: TimeUnits) -> Result<Self, CalendarError> {
        if values.is_empty() {
            return Err(CalendarError::EmptyTimeAxis);
        }
        for (index, &value) in values.iter().enumerate() {
            let increasing = index == 0 || value > values[index - 1];
            if !value.is_finite() || !increasing {
                return Err(CalendarError::NonMonotonicTimeAxis { index, value });
            }
        }
        Ok(Self { values, units })
    }

    /// Creates a time axis from CF `units` and `calendar` attribute strings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnsupportedCalendar`] for an unknown calendar,
    /// [`CalendarError::InvalidTimeUnits`] for malformed units, and the
    /// validation errors of [`TimeAxis::new`].
    pub fn from_cf(values: Vec<f64>, units: &str, calendar: &str) -> Result<Self, CalendarError> {
        let calendar: Calendar = calendar.parse()?;
        Self::new(values, TimeUnits::parse(units, calendar)?)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; construction rejects empty axes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw coordinate values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Time units of the coordinates.
    pub fn units(&self) -> &TimeUnits {
        &self.units
    }

    /// Calendar of the coordinates.
    pub fn calendar(&self) -> Calendar {
        self.units.calendar()
    }

    /// Date of every sample.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] if a coordinate cannot be
    /// decoded.
    pub fn dates(&self) -> Result<Vec<CalendarDate>, CalendarError> {
        self.values.iter().map(|&v| self.units.decode(v)).collect()
    }

    /// Date of the first sample.
    pub fn first_date(&self) -> Result<CalendarDate, CalendarError> {
        self.units.decode(self.values[0])
    }

    /// Date of the last sample.
    pub fn last_date(&self) -> Result<CalendarDate, CalendarError> {
        self.units.decode(self.values[self.values.len() - 1])
    }

    /// Mean spacing between consecutive samples in days, or `None` for a
    /// single-sample axis.
    pub fn mean_spacing_days(&self) -> Option<f64> {
        let n = self.values.len();
        if n < 2 {
            return None;
        }
        let span = self.values[n - 1] - self.values[0];
        Some(span / (n - 1) as f64 * self.units.unit_days())
    }

    /// Half the mean sampling interval, in coordinate units.
    fn half_interval(&self) -> f64 {
        let n = self.values.len();
        if n < 2 {
            return 0.0;
        }
        (self.values[n - 1] - self.values[0]) / (n - 1) as f64 / 2.0
    }

    /// Binary-search insertion point of midnight at the start of `date`.
    ///
    /// [`Side::Left`] returns the first index with coordinate `>=` the probe,
    /// [`Side::Right`] the first index with coordinate `>` the probe.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::RangeNotCovered`] if the probe lies further
    /// than half the mean sampling interval before the first sample or after
    /// the last.
    pub fn date_to_index(&self, date: CalendarDate, side: Side) -> Result<usize, CalendarError> {
        let probe = self.units.encode(date)?;
        let tolerance = self.half_interval();
        let first = self.values[0];
        let last = self.values[self.values.len() - 1];
        if probe < first - tolerance || probe > last + tolerance {
            return Err(CalendarError::RangeNotCovered {
                date,
                first: self.first_date()?,
                last: self.last_date()?,
            });
        }
        let index = match side {
            Side::Left => self.values.partition_point(|&v| v < probe),
            Side::Right => self.values.partition_point(|&v| v <= probe),
        };
        Ok(index)
    }
}
