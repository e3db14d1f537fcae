//! Published rule sets and the capability interface the driver dispatches
//! through.

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayD;

use crate::error::ClassifyError;
use crate::masks::{MajorMasks, SeasonalPrecipMasks, TropicalPrecipMasks, and_not, check, check2, or};
use crate::rules;
use crate::stats::ClimateStats;

/// Köppen-Geiger convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Convention {
    /// Kottek et al. (2006).
    Kottek06,
    /// Peel et al. (2007).
    Peel07,
    /// The GFDL diagnostics variant.
    Gfdl,
}

impl Convention {
    /// Every convention.
    pub const ALL: [Convention; 3] = [Convention::Kottek06, Convention::Peel07, Convention::Gfdl];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Convention::Kottek06 => "Kottek06",
            Convention::Peel07 => "Peel07",
            Convention::Gfdl => "GFDL",
        }
    }

    /// Fraction of annual precipitation a half-year must reach to count as
    /// the rainy season in the aridity threshold.
    pub fn p_thresh_cutoff(self) -> f64 {
        self.rules().p_thresh_cutoff()
    }

    pub(crate) fn rules(self) -> &'static dyn ConventionRules {
        match self {
            Convention::Kottek06 => &Kottek06Rules,
            Convention::Peel07 => &Peel07Rules,
            Convention::Gfdl => &GfdlRules,
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Convention {
    type Err = ClassifyError;

    /// Parses a convention name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Convention::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClassifyError::UnrecognizedConvention {
                name: s.to_string(),
            })
    }
}

/// The rules a convention overrides; everything else comes from
/// [`crate::rules`].
pub(crate) trait ConventionRules: Send + Sync {
    fn p_thresh_cutoff(&self) -> f64;

    /// Major-group masks. Arid is evaluated first and excluded from the
    /// others.
    fn major(&self, stats: &ClimateStats, p_thresh: &ArrayD<f64>) -> MajorMasks;

    fn tropical_precip(&self, stats: &ClimateStats) -> TropicalPrecipMasks {
        rules::tropical_precip(stats, true)
    }

    fn temperate_precip(&self, stats: &ClimateStats) -> SeasonalPrecipMasks {
        rules::seasonal_precip(stats)
    }
}

struct Kottek06Rules;

impl ConventionRules for Kottek06Rules {
    fn p_thresh_cutoff(&self) -> f64 {
        2.0 / 3.0
    }

    fn major(&self, stats: &ClimateStats, p_thresh: &ArrayD<f64>) -> MajorMasks {
        let arid = rules::arid(stats, p_thresh);
        let polar = and_not(&check(&stats.t_max, |t| t <= 10.0), &arid);
        let excluded = or(&arid, &polar);
        MajorMasks {
            tropical: and_not(&check(&stats.t_min, |t| t >= 18.0), &excluded),
            temperate: and_not(&check(&stats.t_min, |t| t > -3.0 && t < 18.0), &excluded),
            continental: and_not(&check(&stats.t_min, |t| t <= -3.0), &excluded),
            arid,
            polar,
        }
    }
}

struct Peel07Rules;

impl ConventionRules for Peel07Rules {
    fn p_thresh_cutoff(&self) -> f64 {
        0.7
    }

    fn major(&self, stats: &ClimateStats, p_thresh: &ArrayD<f64>) -> MajorMasks {
        let arid = rules::arid(stats, p_thresh);
        let t_min = &stats.t_min;
        let t_max = &stats.t_max;
        MajorMasks {
            tropical: and_not(&check(t_min, |t| t >= 18.0), &arid),
            temperate: and_not(
                &check2(t_max, t_min, |hi, lo| hi > 10.0 && lo > 0.0 && lo < 18.0),
                &arid,
            ),
            continental: and_not(&check2(t_max, t_min, |hi, lo| hi > 10.0 && lo <= 0.0), &arid),
            polar: and_not(&check(t_max, |t| t <= 10.0), &arid),
            arid,
        }
    }

    /// Savanna is never split into a dry-summer variant.
    fn tropical_precip(&self, stats: &ClimateStats) -> TropicalPrecipMasks {
        rules::tropical_precip(stats, false)
    }

    /// Dry summer needs only a dry summer month relative to the wettest
    /// winter month; dry winter is checked only where summer is not dry.
    fn temperate_precip(&self, stats: &ClimateStats) -> SeasonalPrecipMasks {
        let dry_summer = check2(&stats.p_smin, &stats.p_wmax, |smin, wmax| {
            smin < 40.0 && smin < wmax / 3.0
        });
        let dry_winter = and_not(
            &check2(&stats.p_wmin, &stats.p_smax, |wmin, smax| wmin < smax / 10.0),
            &dry_summer,
        );
        rules::finish_seasonal(dry_summer, dry_winter)
    }
}

struct GfdlRules;

impl ConventionRules for GfdlRules {
    fn p_thresh_cutoff(&self) -> f64 {
        0.7
    }

    fn major(&self, stats: &ClimateStats, p_thresh: &ArrayD<f64>) -> MajorMasks {
        let arid = rules::arid(stats, p_thresh);
        let t_min = &stats.t_min;
        let t_max = &stats.t_max;
        MajorMasks {
            tropical: and_not(&check(t_min, |t| t > 18.0), &arid),
            temperate: and_not(&check(t_min, |t| t > -3.0 && t <= 18.0), &arid),
            polar: and_not(&check2(t_max, t_min, |hi, lo| hi < 10.0 && lo <= -3.0), &arid),
            continental: and_not(
                &check2(t_max, t_min, |hi, lo| hi >= 10.0 && lo <= -3.0),
                &arid,
            ),
            arid,
        }
    }

    /// Monsoonal dry winter takes precedence over a Mediterranean dry
    /// summer.
    fn temperate_precip(&self, stats: &ClimateStats) -> SeasonalPrecipMasks {
        let dry_winter = check2(&stats.p_smax, &stats.p_wmin, |smax, wmin| smax > 10.0 * wmin);
        let mediterranean = check2(&stats.p_wmax, &stats.p_smin, |wmax, smin| {
            wmax > 3.0 * smin && smin < 30.0
        });
        let dry_summer = and_not(&mediterranean, &dry_winter);
        rules::finish_seasonal(dry_summer, dry_winter)
    }
}
