//! CF time units: `<unit> since <reference date>[ time]`.

use std::fmt;

use crate::calendar::Calendar;
use crate::date::CalendarDate;
use crate::error::CalendarError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Tolerance (in days) absorbing float error when flooring to a day.
const DAY_EPSILON: f64 = 1e-6;

/// Unit of a CF time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Days.
    Days,
    /// Hours.
    Hours,
    /// Minutes.
    Minutes,
    /// Seconds.
    Seconds,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Days => SECONDS_PER_DAY,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Seconds => 1.0,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "days" | "day" | "d" => Some(TimeUnit::Days),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(TimeUnit::Hours),
            "minutes" | "minute" | "mins" | "min" => Some(TimeUnit::Minutes),
            "seconds" | "second" | "secs" | "sec" | "s" => Some(TimeUnit::Seconds),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        })
    }
}

/// Parsed CF time units bound to a calendar.
///
/// Converts between numeric time coordinates and [`CalendarDate`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    unit: TimeUnit,
    reference: CalendarDate,
    reference_seconds: f64,
    reference_day: i64,
    calendar: Calendar,
}

impl TimeUnits {
    /// Parses a units string such as `"days since 1850-01-01 00:00:00"`.
    ///
    /// The reference time may be separated from the date by a space or a
    /// `T`, may omit minutes and seconds, and may carry a trailing `Z`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTimeUnits`] if the string is malformed,
    /// or a date validation error if the reference date does not exist in
    /// `calendar`.
    pub fn parse(units: &str, calendar: Calendar) -> Result<Self, CalendarError> {
        let invalid = |reason: &str| CalendarError::InvalidTimeUnits {
            units: units.to_string(),
            reason: reason.to_string(),
        };

        let lower = units.trim().to_lowercase();
        let (unit_str, reference_str) = lower
            .split_once(" since ")
            .ok_or_else(|| invalid("expected '<unit> since <date>'"))?;
        let unit = TimeUnit::parse(unit_str.trim()).ok_or_else(|| invalid("unknown time unit"))?;

        let reference_str = reference_str.trim();
        let (date_str, time_str) = match reference_str.find(|c: char| c == ' ' || c == 't') {
            Some(pos) => (&reference_str[..pos], Some(reference_str[pos + 1..].trim())),
            None => (reference_str, None),
        };

        let (year, month, day) = parse_date(date_str).ok_or_else(|| invalid("bad reference date"))?;
        let reference = CalendarDate::new(year, month, day, calendar)?;
        let reference_seconds = match time_str {
            Some(t) if !t.is_empty() => {
                parse_time(t.trim_end_matches('z')).ok_or_else(|| invalid("bad reference time"))?
            }
            _ => 0.0,
        };
        let reference_day = calendar.day_number(reference)?;

        Ok(Self {
            unit,
            reference,
            reference_seconds,
            reference_day,
            calendar,
        })
    }

    /// Returns the time unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns the reference date.
    pub fn reference(&self) -> CalendarDate {
        self.reference
    }

    /// Returns the calendar the units are interpreted in.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Length of one coordinate unit, in days.
    pub fn unit_days(&self) -> f64 {
        self.unit.seconds() / SECONDS_PER_DAY
    }

    /// Converts a numeric coordinate to the date it falls on.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] if the value lies outside
    /// the representable range.
    pub fn decode(&self, value: f64) -> Result<CalendarDate, CalendarError> {
        let days = (self.reference_seconds + value * self.unit.seconds()) / SECONDS_PER_DAY;
        let offset = (days + DAY_EPSILON).floor();
        if !offset.is_finite() || offset.abs() > 1e12 {
            return Err(CalendarError::YearOutOfRange {
                year: (offset / 365.0) as i64,
            });
        }
        self.calendar
            .date_from_day_number(self.reference_day + offset as i64)
    }

    /// Converts midnight at the start of `date` to a numeric coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::YearOutOfRange`] if the date cannot be
    /// converted to a day count.
    pub fn encode(&self, date: CalendarDate) -> Result<f64, CalendarError> {
        let day = self.calendar.day_number(date)?;
        let seconds = (day - self.reference_day) as f64 * SECONDS_PER_DAY - self.reference_seconds;
        Ok(seconds / self.unit.seconds())
    }
}

fn parse_date(s: &str) -> Option<(i32, u8, u8)> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let mut parts = body.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = match parts.next() {
        Some(d) => d.parse().ok()?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((if negative { -year } else { year }, month, day))
}

fn parse_time(s: &str) -> Option<f64> {
    let mut parts = s.split(':');
    let hours: f64 = parts.next()?.parse().ok()?;
    let minutes: f64 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 0.0,
    };
    let seconds: f64 = match parts.next() {
        Some(sec) => sec.parse().ok()?,
        None => 0.0,
    };
    if parts.next().is_some() || !(0.0..24.0).contains(&hours) {
        return None;
    }
    Some(hours * 3_600.0 + minutes * 60.0 + seconds)
}
