//! Unit preparation of model-native fields before averaging.

use ndarray::ArrayD;
use tracing::{info, warn};

/// Offset between Kelvin and degrees Celsius.
const KELVIN_OFFSET: f64 = 273.15;

/// Seconds per day; converts kg m-2 s-1 to mm/day.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts temperature to °C in place.
///
/// Non-finite values become NaN. Units containing `k` are taken as Kelvin:
/// negative values are masked and the offset subtracted. Anything else is
/// assumed to already be Celsius.
pub fn prepare_temperature(data: &mut ArrayD<f64>, units: &str) {
    let kelvin = units.to_lowercase().contains('k');
    if kelvin {
        info!(units, "converting temperature from Kelvin");
        data.mapv_inplace(|v| {
            if v.is_finite() && v >= 0.0 {
                v - KELVIN_OFFSET
            } else {
                f64::NAN
            }
        });
    } else {
        warn!(units, "temperature units not Kelvin, assuming degrees Celsius");
        data.mapv_inplace(|v| if v.is_finite() { v } else { f64::NAN });
    }
}

/// Converts a precipitation flux to mm/day in place, scaled by `factor`.
///
/// Non-finite and negative values become NaN.
pub fn prepare_precipitation(data: &mut ArrayD<f64>, factor: f64) {
    let scale = SECONDS_PER_DAY * factor;
    info!(scale, "converting precipitation to mm/day");
    data.mapv_inplace(|v| {
        if v.is_finite() && v >= 0.0 {
            v * scale
        } else {
            f64::NAN
        }
    });
}
