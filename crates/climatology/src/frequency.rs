//! Sampling-frequency detection and calendar sample weights.

use koppen_calendar::TimeAxis;
use tracing::debug;

use crate::error::ClimatologyError;

/// Mean spacing (days) below which data is treated as sub-monthly.
const SUB_MONTHLY_MAX_DAYS: f64 = 8.0;

/// Mean spacing (days) below which data is treated as monthly.
const MONTHLY_MAX_DAYS: f64 = 32.0;

/// Sampling regime of a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingFrequency {
    /// Daily or finer; every sample carries equal weight.
    SubMonthly,
    /// One sample per month; samples are weighted by days in the month.
    Monthly,
}

impl SamplingFrequency {
    /// Classifies a mean sample spacing given in days.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::UnsupportedFrequency`] for spacings of
    /// 32 days or more.
    pub fn from_spacing_days(spacing_days: f64) -> Result<Self, ClimatologyError> {
        if spacing_days < SUB_MONTHLY_MAX_DAYS {
            Ok(SamplingFrequency::SubMonthly)
        } else if spacing_days < MONTHLY_MAX_DAYS {
            Ok(SamplingFrequency::Monthly)
        } else {
            Err(ClimatologyError::UnsupportedFrequency { spacing_days })
        }
    }

    /// Detects the frequency of `axis` from its mean spacing.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::TooFewSamples`] for a single-sample axis
    /// and [`ClimatologyError::UnsupportedFrequency`] for coarse data.
    pub fn detect(axis: &TimeAxis) -> Result<Self, ClimatologyError> {
        let spacing = axis
            .mean_spacing_days()
            .ok_or(ClimatologyError::TooFewSamples { n: axis.len() })?;
        let frequency = Self::from_spacing_days(spacing)?;
        debug!(spacing_days = spacing, ?frequency, "detected sampling frequency");
        Ok(frequency)
    }
}

/// Per-sample weights implied by the calendar: ones for sub-monthly data,
/// days in the sample's month for monthly data.
pub(crate) fn calendar_weights(
    axis: &TimeAxis,
    frequency: SamplingFrequency,
) -> Result<Vec<f64>, ClimatologyError> {
    match frequency {
        SamplingFrequency::SubMonthly => Ok(vec![1.0; axis.len()]),
        SamplingFrequency::Monthly => {
            let calendar = axis.calendar();
            axis.dates()?
                .into_iter()
                .map(|d| -> Result<f64, ClimatologyError> {
                    Ok(f64::from(calendar.days_in_month(d.year(), d.month())?))
                })
                .collect()
        }
    }
}
