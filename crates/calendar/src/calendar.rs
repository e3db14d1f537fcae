//! CF calendar variants, leap-year rules and day counting.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::date::CalendarDate;
use crate::error::CalendarError;

/// Number of days in each month of a common year (index 0 unused).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Julian Day Number of 1582-10-15, the first Gregorian day of the
/// standard calendar.
const GREGORIAN_REFORM_JDN: i64 = 2_299_161;

/// Offset between chrono's days-from-CE count and the Julian Day Number.
const CE_TO_JDN: i64 = 1_721_425;

/// A CF-conventions calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calendar {
    /// 365-day calendar, no leap years.
    NoLeap,
    /// 366-day calendar, every year is a leap year.
    AllLeap,
    /// Twelve 30-day months.
    Day360,
    /// Julian calendar, leap year every fourth year.
    Julian,
    /// Gregorian rules extended to all years.
    ProlepticGregorian,
    /// Mixed calendar: Julian through 1582, Gregorian after.
    Standard,
}

impl Calendar {
    /// Every supported calendar, in declaration order.
    pub const ALL: [Calendar; 6] = [
        Calendar::NoLeap,
        Calendar::AllLeap,
        Calendar::Day360,
        Calendar::Julian,
        Calendar::ProlepticGregorian,
        Calendar::Standard,
    ];

    /// Canonical CF name of the calendar.
    pub fn name(self) -> &'static str {
        match self {
            Calendar::NoLeap => "noleap",
            Calendar::AllLeap => "all_leap",
            Calendar::Day360 => "360_day",
            Calendar::Julian => "julian",
            Calendar::ProlepticGregorian => "proleptic_gregorian",
            Calendar::Standard => "standard",
        }
    }

    /// Whether `year` is a leap year in this calendar.
    ///
    /// The 360-day calendar never has a leap year.
    pub fn is_leap_year(self, year: i32) -> bool {
        match self {
            Calendar::NoLeap | Calendar::Day360 => false,
            Calendar::AllLeap => true,
            Calendar::Julian => julian_leap(year),
            Calendar::ProlepticGregorian => gregorian_leap(year),
            Calendar::Standard => {
                if year > 1582 {
                    gregorian_leap(year)
                } else {
                    julian_leap(year)
                }
            }
        }
    }

    /// Number of days in `month` of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn days_in_month(self, year: i32, month: u8) -> Result<u8, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        if self == Calendar::Day360 {
            return Ok(30);
        }
        if month == 2 && self.is_leap_year(year) {
            return Ok(29);
        }
        Ok(DAYS_PER_MONTH[month as usize])
    }

    /// Number of days in `year`.
    pub fn days_in_year(self, year: i32) -> u16 {
        match self {
            Calendar::Day360 => 360,
            _ if self.is_leap_year(year) => 366,
            _ => 365,
        }
    }

    /// Continuous day count of a validated date.
    ///
    /// Only differences between day numbers are meaningful; the epoch is
    /// calendar specific (Julian Day Number for the real-world calendars).
    pub(crate) fn day_number(self, date: CalendarDate) -> Result<i64, CalendarError> {
        let (year, month, day) = (date.year(), date.month(), date.day());
        match self {
            Calendar::NoLeap | Calendar::AllLeap | Calendar::Day360 => {
                let per_year = i64::from(self.days_in_year(year));
                let mut n = i64::from(year) * per_year;
                for m in 1..month {
                    n += i64::from(self.days_in_month(year, m)?);
                }
                Ok(n + i64::from(day) - 1)
            }
            Calendar::Julian => Ok(julian_to_jdn(year, month, day)),
            Calendar::ProlepticGregorian => gregorian_to_jdn(year, month, day),
            Calendar::Standard => {
                if (year, month, day) >= (1582, 10, 15) {
                    gregorian_to_jdn(year, month, day)
                } else {
                    Ok(julian_to_jdn(year, month, day))
                }
            }
        }
    }

    /// Inverse of [`Calendar::day_number`].
    pub(crate) fn date_from_day_number(self, n: i64) -> Result<CalendarDate, CalendarError> {
        match self {
            Calendar::NoLeap | Calendar::AllLeap | Calendar::Day360 => {
                let per_year = i64::from(self.days_in_year(0));
                let year = i32::try_from(n.div_euclid(per_year))
                    .map_err(|_| CalendarError::YearOutOfRange { year: n / per_year })?;
                let mut rem = n.rem_euclid(per_year);
                let mut month = 1u8;
                loop {
                    let len = i64::from(self.days_in_month(year, month)?);
                    if rem < len || month == 12 {
                        break;
                    }
                    rem -= len;
                    month += 1;
                }
                Ok(CalendarDate::from_parts(year, month, rem as u8 + 1))
            }
            Calendar::Julian => jdn_to_julian(n),
            Calendar::ProlepticGregorian => jdn_to_gregorian(n),
            Calendar::Standard => {
                if n >= GREGORIAN_REFORM_JDN {
                    jdn_to_gregorian(n)
                } else {
                    jdn_to_julian(n)
                }
            }
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Calendar {
    type Err = CalendarError;

    /// Parses a CF calendar attribute. Matching ignores case and treats
    /// spaces as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "_");
        match normalized.as_str() {
            "noleap" | "no_leap" | "365day" | "365_day" => Ok(Calendar::NoLeap),
            "allleap" | "all_leap" | "366day" | "366_day" => Ok(Calendar::AllLeap),
            "360day" | "360_day" => Ok(Calendar::Day360),
            "julian" | "proleptic_julian" | "prolepticjulian" => Ok(Calendar::Julian),
            "proleptic_gregorian" | "prolepticgregorian" => Ok(Calendar::ProlepticGregorian),
            "gregorian" | "standard" => Ok(Calendar::Standard),
            _ => Err(CalendarError::UnsupportedCalendar {
                name: s.to_string(),
            }),
        }
    }
}

/// Whether `year` is a leap year in `calendar`.
pub fn is_leap_year(year: i32, calendar: Calendar) -> bool {
    calendar.is_leap_year(year)
}

/// Number of days in `month` of `year` in `calendar`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
pub fn days_in_month(year: i32, month: u8, calendar: Calendar) -> Result<u8, CalendarError> {
    calendar.days_in_month(year, month)
}

fn julian_leap(year: i32) -> bool {
    year.rem_euclid(4) == 0
}

fn gregorian_leap(year: i32) -> bool {
    (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
}

fn julian_to_jdn(year: i32, month: u8, day: u8) -> i64 {
    let a = (14 - i64::from(month)) / 12;
    let y = i64::from(year) + 4800 - a;
    let m = i64::from(month) + 12 * a - 3;
    i64::from(day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32083
}

fn jdn_to_julian(jdn: i64) -> Result<CalendarDate, CalendarError> {
    let c = jdn + 32082;
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4800 + m / 10;
    let year = i32::try_from(year).map_err(|_| CalendarError::YearOutOfRange { year })?;
    Ok(CalendarDate::from_parts(year, month as u8, day as u8))
}

fn gregorian_to_jdn(year: i32, month: u8, day: u8) -> Result<i64, CalendarError> {
    let date = NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day)).ok_or(
        CalendarError::YearOutOfRange {
            year: i64::from(year),
        },
    )?;
    Ok(i64::from(date.num_days_from_ce()) + CE_TO_JDN)
}

fn jdn_to_gregorian(jdn: i64) -> Result<CalendarDate, CalendarError> {
    let out_of_range = CalendarError::YearOutOfRange {
        year: (jdn - CE_TO_JDN) / 365,
    };
    let days = i32::try_from(jdn - CE_TO_JDN).map_err(|_| out_of_range.clone())?;
    let date = NaiveDate::from_num_days_from_ce_opt(days).ok_or(out_of_range)?;
    Ok(CalendarDate::from_parts(
        date.year(),
        date.month() as u8,
        date.day() as u8,
    ))
}
