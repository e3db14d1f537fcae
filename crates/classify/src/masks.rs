//! Boolean criterion masks produced and consumed within one classification
//! pass.

use ndarray::{ArrayD, Zip};

use crate::convention::ConventionRules;
use crate::rules;
use crate::stats::ClimateStats;
use crate::taxonomy::{MajorGroup, PrecipType, TempType};

/// Per-cell boolean field with the spatial shape of the inputs.
pub type Mask = ArrayD<bool>;

/// Elementwise comparison of `values` against a predicate.
pub(crate) fn check(values: &ArrayD<f64>, f: impl Fn(f64) -> bool) -> Mask {
    values.mapv(f)
}

/// Elementwise predicate over two fields.
pub(crate) fn check2(a: &ArrayD<f64>, b: &ArrayD<f64>, f: impl Fn(f64, f64) -> bool) -> Mask {
    Zip::from(a).and(b).map_collect(|&x, &y| f(x, y))
}

pub(crate) fn and(a: &Mask, b: &Mask) -> Mask {
    Zip::from(a).and(b).map_collect(|&x, &y| x && y)
}

/// `a && !b`.
pub(crate) fn and_not(a: &Mask, b: &Mask) -> Mask {
    Zip::from(a).and(b).map_collect(|&x, &y| x && !y)
}

pub(crate) fn or(a: &Mask, b: &Mask) -> Mask {
    Zip::from(a).and(b).map_collect(|&x, &y| x || y)
}

pub(crate) fn not(a: &Mask) -> Mask {
    a.mapv(|x| !x)
}

/// One mask per major group.
#[derive(Debug, Clone)]
pub(crate) struct MajorMasks {
    pub(crate) tropical: Mask,
    pub(crate) arid: Mask,
    pub(crate) temperate: Mask,
    pub(crate) continental: Mask,
    pub(crate) polar: Mask,
}

#[derive(Debug, Clone)]
pub(crate) struct TropicalPrecipMasks {
    pub(crate) rainforest: Mask,
    pub(crate) monsoon: Mask,
    pub(crate) savanna_dry_winter: Mask,
    pub(crate) savanna_dry_summer: Mask,
}

#[derive(Debug, Clone)]
pub(crate) struct AridPrecipMasks {
    pub(crate) desert: Mask,
    pub(crate) steppe: Mask,
}

/// Shared shape of the temperate and continental precipitation subtypes.
#[derive(Debug, Clone)]
pub(crate) struct SeasonalPrecipMasks {
    pub(crate) dry_summer: Mask,
    pub(crate) dry_winter: Mask,
    pub(crate) without_dry_season: Mask,
}

#[derive(Debug, Clone)]
pub(crate) struct AridTempMasks {
    pub(crate) hot: Mask,
    pub(crate) cold: Mask,
}

#[derive(Debug, Clone)]
pub(crate) struct TemperateTempMasks {
    pub(crate) hot_summer: Mask,
    pub(crate) warm_summer: Mask,
    pub(crate) cold_summer: Mask,
}

#[derive(Debug, Clone)]
pub(crate) struct ContinentalTempMasks {
    pub(crate) hot_summer: Mask,
    pub(crate) warm_summer: Mask,
    pub(crate) cold_summer: Mask,
    pub(crate) very_cold_winter: Mask,
}

#[derive(Debug, Clone)]
pub(crate) struct PolarTempMasks {
    pub(crate) tundra: Mask,
    pub(crate) eternal_frost: Mask,
}

/// Every criterion mask of one convention, addressable by taxonomy key.
#[derive(Debug, Clone)]
pub(crate) struct ClassMasks {
    /// All-true mask for subtype slots a group does not subdivide.
    always: Mask,
    major: MajorMasks,
    tropical_precip: TropicalPrecipMasks,
    arid_precip: AridPrecipMasks,
    temperate_precip: SeasonalPrecipMasks,
    continental_precip: SeasonalPrecipMasks,
    arid_temp: AridTempMasks,
    temperate_temp: TemperateTempMasks,
    continental_temp: ContinentalTempMasks,
    polar_temp: PolarTempMasks,
}

impl ClassMasks {
    /// Evaluates every criterion of `rules` over `stats`.
    pub(crate) fn build(rules: &dyn ConventionRules, stats: &ClimateStats) -> Self {
        let p_thresh = rules::p_thresh(stats, rules.p_thresh_cutoff());
        Self {
            always: stats.p_ann.mapv(|_| true),
            major: rules.major(stats, &p_thresh),
            tropical_precip: rules.tropical_precip(stats),
            arid_precip: rules::arid_precip(stats, &p_thresh),
            temperate_precip: rules.temperate_precip(stats),
            continental_precip: rules::seasonal_precip(stats),
            arid_temp: rules::arid_temp(stats),
            temperate_temp: rules::temperate_temp(stats),
            continental_temp: rules::continental_temp(stats),
            polar_temp: rules::polar_temp(stats),
        }
    }

    pub(crate) fn major(&self, group: MajorGroup) -> &Mask {
        let m = &self.major;
        match group {
            MajorGroup::Tropical => &m.tropical,
            MajorGroup::Arid => &m.arid,
            MajorGroup::Temperate => &m.temperate,
            MajorGroup::Continental => &m.continental,
            MajorGroup::Polar => &m.polar,
        }
    }

    /// Precipitation-subtype mask, or `None` if `group` does not define
    /// `precip`.
    pub(crate) fn precip(&self, group: MajorGroup, precip: PrecipType) -> Option<&Mask> {
        match (group, precip) {
            (MajorGroup::Tropical, PrecipType::Rainforest) => Some(&self.tropical_precip.rainforest),
            (MajorGroup::Tropical, PrecipType::Monsoon) => Some(&self.tropical_precip.monsoon),
            (MajorGroup::Tropical, PrecipType::SavannaDryWinter) => {
                Some(&self.tropical_precip.savanna_dry_winter)
            }
            (MajorGroup::Tropical, PrecipType::SavannaDrySummer) => {
                Some(&self.tropical_precip.savanna_dry_summer)
            }
            (MajorGroup::Arid, PrecipType::Desert) => Some(&self.arid_precip.desert),
            (MajorGroup::Arid, PrecipType::Steppe) => Some(&self.arid_precip.steppe),
            (MajorGroup::Temperate, _) => seasonal(&self.temperate_precip, precip),
            (MajorGroup::Continental, _) => seasonal(&self.continental_precip, precip),
            (MajorGroup::Polar, PrecipType::None) => Some(&self.always),
            _ => None,
        }
    }

    /// Temperature-subtype mask, or `None` if `group` does not define `temp`.
    pub(crate) fn temp(&self, group: MajorGroup, temp: TempType) -> Option<&Mask> {
        match (group, temp) {
            (MajorGroup::Tropical, TempType::None) => Some(&self.always),
            (MajorGroup::Arid, TempType::Hot) => Some(&self.arid_temp.hot),
            (MajorGroup::Arid, TempType::Cold) => Some(&self.arid_temp.cold),
            (MajorGroup::Temperate, TempType::HotSummer) => Some(&self.temperate_temp.hot_summer),
            (MajorGroup::Temperate, TempType::WarmSummer) => Some(&self.temperate_temp.warm_summer),
            (MajorGroup::Temperate, TempType::ColdSummer) => Some(&self.temperate_temp.cold_summer),
            (MajorGroup::Continental, TempType::HotSummer) => {
                Some(&self.continental_temp.hot_summer)
            }
            (MajorGroup::Continental, TempType::WarmSummer) => {
                Some(&self.continental_temp.warm_summer)
            }
            (MajorGroup::Continental, TempType::ColdSummer) => {
                Some(&self.continental_temp.cold_summer)
            }
            (MajorGroup::Continental, TempType::VeryColdWinter) => {
                Some(&self.continental_temp.very_cold_winter)
            }
            (MajorGroup::Polar, TempType::Tundra) => Some(&self.polar_temp.tundra),
            (MajorGroup::Polar, TempType::EternalFrost) => Some(&self.polar_temp.eternal_frost),
            _ => None,
        }
    }
}

fn seasonal(masks: &SeasonalPrecipMasks, precip: PrecipType) -> Option<&Mask> {
    match precip {
        PrecipType::DrySummer => Some(&masks.dry_summer),
        PrecipType::DryWinter => Some(&masks.dry_winter),
        PrecipType::WithoutDrySeason => Some(&masks.without_dry_season),
        _ => None,
    }
}
