use koppen_calendar::{Calendar, CalendarError, days_in_month, is_leap_year};

#[test]
fn months_sum_to_year_length_for_every_calendar() {
    for cal in Calendar::ALL {
        for year in [-401, -4, 0, 1, 1500, 1582, 1600, 1700, 1900, 2000, 2001, 2024] {
            let total: u16 = (1..=12)
                .map(|m| u16::from(days_in_month(year, m, cal).unwrap()))
                .sum();
            let expected = match cal {
                Calendar::Day360 => 360,
                _ if is_leap_year(year, cal) => 366,
                _ => 365,
            };
            assert_eq!(total, expected, "calendar {cal}, year {year}");
            assert_eq!(total, cal.days_in_year(year), "calendar {cal}, year {year}");
        }
    }
}

#[test]
fn february_consistent_with_leap_rule() {
    for cal in Calendar::ALL {
        if cal == Calendar::Day360 {
            continue;
        }
        for year in 1490..1720 {
            let feb = days_in_month(year, 2, cal).unwrap();
            let expected = if is_leap_year(year, cal) { 29 } else { 28 };
            assert_eq!(feb, expected, "calendar {cal}, year {year}");
        }
    }
}

#[test]
fn mixed_calendar_matches_julian_then_gregorian() {
    for year in 1000..=1582 {
        assert_eq!(
            is_leap_year(year, Calendar::Standard),
            is_leap_year(year, Calendar::Julian)
        );
    }
    for year in 1583..=2400 {
        assert_eq!(
            is_leap_year(year, Calendar::Standard),
            is_leap_year(year, Calendar::ProlepticGregorian)
        );
    }
}

#[test]
fn invalid_month_rejected_by_all_calendars() {
    for cal in Calendar::ALL {
        assert_eq!(
            days_in_month(2000, 13, cal).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }
}
