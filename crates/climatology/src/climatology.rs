//! Calendar-weighted climatology engine.

use std::ops::Range;

use koppen_calendar::{Calendar, Side, TimeAxis, YearMonth};
use ndarray::{ArrayD, Axis, IxDyn, Zip};
use tracing::{debug, warn};

use crate::config::ClimatologyConfig;
use crate::error::ClimatologyError;
use crate::field::GriddedField;
use crate::frequency::{SamplingFrequency, calendar_weights};
use crate::result::ClimatologyResult;
use crate::season::{Aggregate, EdgePolicy, Season};

/// Climatologies of fields sampled on one time axis over one inclusive
/// year range.
///
/// Construction resolves the per-sample weights and the sample range of
/// every month in the analysis period; each [`Climatology::season`] call
/// then reuses that lookup for any field on the same time axis.
#[derive(Debug, Clone)]
pub struct Climatology {
    calendar: Calendar,
    frequency: SamplingFrequency,
    weights: Vec<f64>,
    start: YearMonth,
    end: YearMonth,
    /// Index of the first sample of each month from `start` through the
    /// month after `end`.
    month_starts: Vec<usize>,
    edge_policy: EdgePolicy,
}

impl Climatology {
    /// Prepares climatologies over `config`'s year range for data on `axis`.
    ///
    /// # Errors
    ///
    /// - [`ClimatologyError::InvalidYearRange`] / [`ClimatologyError::InvalidWeight`]
    ///   if `config` is invalid.
    /// - [`ClimatologyError::UnsupportedFrequency`] if samples are coarser
    ///   than monthly.
    /// - [`ClimatologyError::WeightsLengthMismatch`] if explicit weights do
    ///   not match the axis length.
    /// - [`ClimatologyError::DateRange`] if the axis does not span January of
    ///   the first year through December of the last.
    #[tracing::instrument(
        skip(axis, config),
        fields(start_year = config.start_year(), end_year = config.end_year())
    )]
    pub fn new(axis: &TimeAxis, config: &ClimatologyConfig) -> Result<Self, ClimatologyError> {
        config.validate()?;
        let frequency = SamplingFrequency::detect(axis)?;

        let weights = match config.sample_weights() {
            Some(w) => {
                if w.len() != axis.len() {
                    return Err(ClimatologyError::WeightsLengthMismatch {
                        expected: axis.len(),
                        got: w.len(),
                    });
                }
                debug!("using explicit sample weights");
                w.to_vec()
            }
            None => calendar_weights(axis, frequency)?,
        };

        let start = YearMonth::new(config.start_year(), 1)?;
        let end = YearMonth::new(config.end_year(), 12)?;
        let first_date = axis.first_date()?;
        let last_date = axis.last_date()?;
        let first = first_date.year_month();
        let last = last_date.year_month();
        if first > start || last < end {
            return Err(ClimatologyError::DateRange {
                start_year: config.start_year(),
                end_year: config.end_year(),
                first,
                last,
            });
        }

        let n_months = end.index() - start.index() + 1;
        let month_starts = (0..=n_months)
            .map(|k| {
                let day = start.add_months(k).first_day();
                // Month starts outside the sampled span clamp to the axis ends.
                if day <= first_date {
                    Ok(0)
                } else if day > last_date {
                    Ok(axis.len())
                } else {
                    axis.date_to_index(day, Side::Left)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            calendar = %axis.calendar(),
            ?frequency,
            n_samples = axis.len(),
            first_sample = month_starts[0],
            end_sample = month_starts[month_starts.len() - 1],
            "climatology prepared"
        );

        Ok(Self {
            calendar: axis.calendar(),
            frequency,
            weights,
            start,
            end,
            month_starts,
            edge_policy: config.edge_policy(),
        })
    }

    /// Returns the calendar of the time axis.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Returns the detected sampling frequency.
    pub fn frequency(&self) -> SamplingFrequency {
        self.frequency
    }

    /// Returns the per-sample weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns the first year of the analysis period.
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    /// Returns the last year of the analysis period.
    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// Mean or total of `field` over `season`, averaged across every
    /// qualifying year.
    ///
    /// Each season instance is reduced to a weighted mean over its finite
    /// samples together with the sum of their weights. For
    /// [`Aggregate::Total`] the mean is rescaled by that weight sum. The
    /// instances are then averaged with their weight sums as weights, so a
    /// fully missing instance drops out instead of counting as zero. Cells
    /// with no finite sample in any instance are NaN.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::TimeLengthMismatch`] if `field` was not
    /// sampled on this climatology's time axis.
    #[tracing::instrument(
        skip(self, field),
        fields(start_month = season.start_month(), duration = season.duration())
    )]
    pub fn season(
        &self,
        field: &GriddedField<'_>,
        season: &Season,
        aggregate: Aggregate,
    ) -> Result<ArrayD<f64>, ClimatologyError> {
        self.check_field(field)?;
        let shape = IxDyn(&field.spatial_shape());
        let instances = self.instances(season, aggregate);
        if instances.is_empty() {
            warn!(
                start_year = self.start.year(),
                end_year = self.end.year(),
                "no season instance inside the analysis period"
            );
            return Ok(ArrayD::from_elem(shape, f64::NAN));
        }

        let mut acc = ArrayD::<f64>::zeros(shape.clone());
        let mut acc_weight = ArrayD::<f64>::zeros(shape.clone());
        for range in instances {
            let (mean, weight) = self.instance_mean(field, range, &shape);
            Zip::from(&mut acc)
                .and(&mut acc_weight)
                .and(&mean)
                .and(&weight)
                .for_each(|a, aw, &m, &w| {
                    if w > 0.0 {
                        let value = match aggregate {
                            Aggregate::Mean => m,
                            Aggregate::Total => m * w,
                        };
                        *a += value * w;
                        *aw += w;
                    }
                });
        }

        Ok(Zip::from(&acc)
            .and(&acc_weight)
            .map_collect(|&a, &w| if w > 0.0 { a / w } else { f64::NAN }))
    }

    /// Climatology of a single calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::InvalidSeason`] if `month` is not in
    /// 1..=12, plus the errors of [`Climatology::season`].
    pub fn month(
        &self,
        field: &GriddedField<'_>,
        month: u8,
        aggregate: Aggregate,
    ) -> Result<ArrayD<f64>, ClimatologyError> {
        let season = Season::month(month)?.with_edge_policy(self.edge_policy);
        self.season(field, &season, aggregate)
    }

    /// Full-year climatology.
    ///
    /// # Errors
    ///
    /// Same as [`Climatology::season`].
    pub fn annual(
        &self,
        field: &GriddedField<'_>,
        aggregate: Aggregate,
    ) -> Result<ArrayD<f64>, ClimatologyError> {
        let season = Season::annual().with_edge_policy(self.edge_policy);
        self.season(field, &season, aggregate)
    }

    /// The twelve single-month climatologies stacked on a new leading axis.
    ///
    /// # Errors
    ///
    /// Same as [`Climatology::season`].
    pub fn monthly_climatology(
        &self,
        field: &GriddedField<'_>,
        aggregate: Aggregate,
    ) -> Result<ArrayD<f64>, ClimatologyError> {
        let mut shape = vec![12];
        shape.extend(field.spatial_shape());
        let mut out = ArrayD::<f64>::zeros(IxDyn(&shape));
        for month in 1..=12u8 {
            let clim = self.month(field, month, aggregate)?;
            out.index_axis_mut(Axis(0), usize::from(month - 1))
                .assign(&clim);
        }
        Ok(out)
    }

    /// Annual, April-September, October-March and monthly climatologies
    /// of `field`, as consumed by the classifier.
    ///
    /// # Errors
    ///
    /// Same as [`Climatology::season`].
    pub fn koppen_averages(
        &self,
        field: &GriddedField<'_>,
        aggregate: Aggregate,
    ) -> Result<ClimatologyResult, ClimatologyError> {
        let apr_sep = Season::apr_sep().with_edge_policy(self.edge_policy);
        let oct_mar = Season::oct_mar().with_edge_policy(self.edge_policy);
        ClimatologyResult::new(
            self.annual(field, aggregate)?,
            self.season(field, &apr_sep, aggregate)?,
            self.season(field, &oct_mar, aggregate)?,
            self.monthly_climatology(field, aggregate)?,
        )
    }

    fn check_field(&self, field: &GriddedField<'_>) -> Result<(), ClimatologyError> {
        if field.n_times() != self.weights.len() {
            return Err(ClimatologyError::TimeLengthMismatch {
                expected: self.weights.len(),
                got: field.n_times(),
            });
        }
        Ok(())
    }

    /// Sample ranges of every season instance used for the average.
    ///
    /// Candidates start in each year from the one before the period through
    /// its last year, so a season wrapping the year end is anchored on the
    /// year its first month falls in.
    fn instances(&self, season: &Season, aggregate: Aggregate) -> Vec<Range<usize>> {
        let range_start = self.start.index();
        let range_end = self.end.index() + 1;
        let truncate =
            season.edge_policy() == EdgePolicy::Truncate && aggregate == Aggregate::Mean;

        let mut ranges = Vec::new();
        for year in self.start.year() - 1..=self.end.year() {
            let first = 12 * i64::from(year) + i64::from(season.start_month()) - 1;
            let stop = first + i64::from(season.duration());
            if stop <= range_start || first >= range_end {
                continue;
            }
            let (first, stop) = if first >= range_start && stop <= range_end {
                (first, stop)
            } else if truncate {
                (first.max(range_start), stop.min(range_end))
            } else {
                debug!(year, "skipping partial season instance");
                continue;
            };
            let lo = self.month_starts[(first - range_start) as usize];
            let hi = self.month_starts[(stop - range_start) as usize];
            ranges.push(lo..hi);
        }
        ranges
    }

    /// Weighted mean over the finite samples in `range` and the sum of
    /// their weights, per cell.
    fn instance_mean(
        &self,
        field: &GriddedField<'_>,
        range: Range<usize>,
        shape: &IxDyn,
    ) -> (ArrayD<f64>, ArrayD<f64>) {
        let mut sum = ArrayD::<f64>::zeros(shape.clone());
        let mut weight = ArrayD::<f64>::zeros(shape.clone());
        for t in range {
            let w = self.weights[t];
            Zip::from(&mut sum)
                .and(&mut weight)
                .and(&field.at(t))
                .for_each(|s, ws, &x| {
                    if x.is_finite() {
                        *s += w * x;
                        *ws += w;
                    }
                });
        }
        let mean = Zip::from(&sum)
            .and(&weight)
            .map_collect(|&s, &ws| if ws > 0.0 { s / ws } else { f64::NAN });
        (mean, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    fn scalar(a: &ArrayD<f64>) -> f64 {
        *a.iter().next().unwrap()
    }

    /// Monthly noleap axis stamped on the 15th of each month from January
    /// of `first_year`.
    fn monthly_axis(first_year: i32, n_years: usize) -> TimeAxis {
        let cal = Calendar::NoLeap;
        let units = koppen_calendar::TimeUnits::parse("days since 1900-01-01", cal).unwrap();
        let values = (0..n_years * 12)
            .map(|i| {
                let ym = YearMonth::new(first_year, 1).unwrap().add_months(i as i64);
                let date = koppen_calendar::CalendarDate::new(ym.year(), ym.month(), 15, cal).unwrap();
                units.encode(date).unwrap()
            })
            .collect();
        TimeAxis::new(values, units).unwrap()
    }

    #[test]
    fn new_rejects_uncovered_range() {
        let axis = monthly_axis(2000, 3);
        let err = Climatology::new(&axis, &ClimatologyConfig::new(1999, 2001)).unwrap_err();
        assert!(matches!(err, ClimatologyError::DateRange { .. }));
        let err = Climatology::new(&axis, &ClimatologyConfig::new(2000, 2003)).unwrap_err();
        assert!(matches!(err, ClimatologyError::DateRange { .. }));
    }

    #[test]
    fn new_detects_monthly_weights() {
        let axis = monthly_axis(2000, 2);
        let clim = Climatology::new(&axis, &ClimatologyConfig::new(2000, 2001)).unwrap();
        assert_eq!(clim.frequency(), SamplingFrequency::Monthly);
        assert_eq!(&clim.weights()[..3], &[31.0, 28.0, 31.0]);
        assert_eq!(clim.start_year(), 2000);
        assert_eq!(clim.end_year(), 2001);
        assert_eq!(clim.calendar(), Calendar::NoLeap);
    }

    #[test]
    fn explicit_weights_take_precedence() {
        let axis = monthly_axis(2000, 1);
        let config = ClimatologyConfig::new(2000, 2000).with_sample_weights(vec![1.0; 12]);
        let clim = Climatology::new(&axis, &config).unwrap();
        assert_eq!(clim.weights(), &[1.0; 12]);

        let config = ClimatologyConfig::new(2000, 2000).with_sample_weights(vec![1.0; 5]);
        assert_eq!(
            Climatology::new(&axis, &config).unwrap_err(),
            ClimatologyError::WeightsLengthMismatch {
                expected: 12,
                got: 5
            }
        );
    }

    #[test]
    fn season_rejects_wrong_length_field() {
        let axis = monthly_axis(2000, 1);
        let clim = Climatology::new(&axis, &ClimatologyConfig::new(2000, 2000)).unwrap();
        let data = Array1::<f64>::zeros(11).into_dyn();
        let field = GriddedField::new(data.view(), 0).unwrap();
        assert_eq!(
            clim.annual(&field, Aggregate::Mean).unwrap_err(),
            ClimatologyError::TimeLengthMismatch {
                expected: 12,
                got: 11
            }
        );
    }

    #[test]
    fn annual_mean_weights_by_days() {
        let axis = monthly_axis(2000, 1);
        let clim = Climatology::new(&axis, &ClimatologyConfig::new(2000, 2000)).unwrap();
        // February alone is 1, every other month 0.
        let mut values = Array1::<f64>::zeros(12);
        values[1] = 1.0;
        let data = values.into_dyn();
        let field = GriddedField::new(data.view(), 0).unwrap();
        let annual = clim.annual(&field, Aggregate::Mean).unwrap();
        assert_relative_eq!(scalar(&annual), 28.0 / 365.0);
        let total = clim.annual(&field, Aggregate::Total).unwrap();
        assert_relative_eq!(scalar(&total), 28.0);
    }

    #[test]
    fn single_year_wrapping_season_has_no_instance() {
        let axis = monthly_axis(2000, 1);
        let clim = Climatology::new(&axis, &ClimatologyConfig::new(2000, 2000)).unwrap();
        let data = Array1::<f64>::ones(12).into_dyn();
        let field = GriddedField::new(data.view(), 0).unwrap();
        let djf = Season::new(12, 3).unwrap();
        let out = clim.season(&field, &djf, Aggregate::Mean).unwrap();
        assert!(scalar(&out).is_nan());
    }
}
