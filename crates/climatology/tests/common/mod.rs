#![allow(dead_code)]

use koppen_calendar::{Calendar, TimeAxis};

/// Mid-month day offsets in a 365-day year.
pub const MID_MONTH: [f64; 12] = [
    15.5, 45.0, 74.5, 105.0, 135.5, 166.0, 196.5, 227.5, 258.0, 288.5, 319.0, 349.5,
];

/// Monthly noleap axis, one sample per month from January 2000.
pub fn monthly_noleap(n_years: usize) -> TimeAxis {
    let values = (0..n_years * 12)
        .map(|i| (i / 12) as f64 * 365.0 + MID_MONTH[i % 12])
        .collect();
    TimeAxis::from_cf(values, "days since 2000-01-01 00:00:00", "noleap").unwrap()
}

/// Daily noleap axis stamped at noon, from 2000-01-01.
pub fn daily_noleap(n_days: usize) -> TimeAxis {
    let values = (0..n_days).map(|d| d as f64 + 0.5).collect();
    TimeAxis::from_cf(values, "days since 2000-01-01", "noleap").unwrap()
}

/// Value stored for (year, month) in the synthetic series.
pub fn synthetic(year: i32, month: u8) -> f64 {
    f64::from(year - 2000) * 100.0 + f64::from(month)
}

/// Day-weighted mean and weight sum over the listed months.
pub fn weighted(months: &[(i32, u8)]) -> (f64, f64) {
    let mut sum = 0.0;
    let mut weight = 0.0;
    for &(y, m) in months {
        let w = f64::from(Calendar::NoLeap.days_in_month(y, m).unwrap());
        sum += w * synthetic(y, m);
        weight += w;
    }
    (sum / weight, weight)
}

/// Weight-sum-weighted average of per-instance values.
pub fn combine(instances: &[(f64, f64)]) -> f64 {
    let num: f64 = instances.iter().map(|(v, w)| v * w).sum();
    let den: f64 = instances.iter().map(|(_, w)| w).sum();
    num / den
}

/// Scalar value of a zero-dimensional array.
pub fn scalar(a: &ndarray::ArrayD<f64>) -> f64 {
    *a.iter().next().unwrap()
}
