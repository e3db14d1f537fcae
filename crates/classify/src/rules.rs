//! Rules shared by every convention.
//!
//! Precipitation amounts are totals in mm (monthly or annual), temperatures
//! are °C.

use ndarray::{ArrayD, Zip};

use crate::masks::{
    AridPrecipMasks, AridTempMasks, ContinentalTempMasks, Mask, PolarTempMasks,
    SeasonalPrecipMasks, TemperateTempMasks, TropicalPrecipMasks, and, and_not, check, check2,
    not, or,
};
use crate::stats::ClimateStats;

/// Aridity threshold in mm/yr.
///
/// `2·T_ann + 28` when at least `cutoff` of the annual total falls in the
/// summer half-year, `2·T_ann` when at least `cutoff` falls in winter, and
/// `2·T_ann + 14` otherwise.
pub(crate) fn p_thresh(stats: &ClimateStats, cutoff: f64) -> ArrayD<f64> {
    Zip::from(&stats.t_ann)
        .and(&stats.p_ann)
        .and(&stats.p_summer)
        .and(&stats.p_winter)
        .map_collect(|&t, &p, &summer, &winter| {
            if summer >= cutoff * p {
                2.0 * t + 28.0
            } else if winter >= cutoff * p {
                2.0 * t
            } else {
                2.0 * t + 14.0
            }
        })
}

/// Arid major group: `P_ann < 10·P_thresh`.
pub(crate) fn arid(stats: &ClimateStats, p_thresh: &ArrayD<f64>) -> Mask {
    check2(&stats.p_ann, p_thresh, |p, th| p < 10.0 * th)
}

pub(crate) fn arid_precip(stats: &ClimateStats, p_thresh: &ArrayD<f64>) -> AridPrecipMasks {
    let desert = check2(&stats.p_ann, p_thresh, |p, th| p < 5.0 * th);
    AridPrecipMasks {
        steppe: not(&desert),
        desert,
    }
}

pub(crate) fn arid_temp(stats: &ClimateStats) -> AridTempMasks {
    let hot = check(&stats.t_ann, |t| t >= 18.0);
    AridTempMasks {
        cold: not(&hot),
        hot,
    }
}

/// Rainforest when the driest month has at least 60 mm, monsoon when it
/// reaches `100 − P_ann/25`, savanna otherwise.
///
/// With `split_savanna`, savanna is dry-summer where the summer minimum is
/// the lower one and dry-winter elsewhere; without it all savanna is
/// dry-winter.
pub(crate) fn tropical_precip(stats: &ClimateStats, split_savanna: bool) -> TropicalPrecipMasks {
    let rainforest = check(&stats.p_min, |p| p >= 60.0);
    let monsoon_ok = check2(&stats.p_min, &stats.p_ann, |p, ann| p >= 100.0 - ann / 25.0);
    let monsoon = and_not(&monsoon_ok, &rainforest);
    let savanna = not(&or(&rainforest, &monsoon));
    let dry_summer = if split_savanna {
        check2(&stats.p_smin, &stats.p_wmin, |s, w| s < w)
    } else {
        savanna.mapv(|_| false)
    };
    TropicalPrecipMasks {
        rainforest,
        monsoon,
        savanna_dry_summer: and(&savanna, &dry_summer),
        savanna_dry_winter: and_not(&savanna, &dry_summer),
    }
}

/// Dry-summer, dry-winter and fully-humid split shared by the temperate and
/// continental groups.
pub(crate) fn seasonal_precip(stats: &ClimateStats) -> SeasonalPrecipMasks {
    let dry_summer = Zip::from(&stats.p_smin)
        .and(&stats.p_wmin)
        .and(&stats.p_wmax)
        .map_collect(|&smin, &wmin, &wmax| smin < wmin && smin < 40.0 && smin < wmax / 3.0);
    let dry_winter = check2(&stats.p_wmin, &stats.p_smin, |w, s| w < s);
    let dry_winter = and(
        &dry_winter,
        &check2(&stats.p_wmin, &stats.p_smax, |w, smax| w < smax / 10.0),
    );
    let dry_winter = and_not(&dry_winter, &dry_summer);
    finish_seasonal(dry_summer, dry_winter)
}

/// Fills the fully-humid mask as the residual of the two dry-season masks.
pub(crate) fn finish_seasonal(dry_summer: Mask, dry_winter: Mask) -> SeasonalPrecipMasks {
    let without_dry_season = not(&or(&dry_summer, &dry_winter));
    SeasonalPrecipMasks {
        dry_summer,
        dry_winter,
        without_dry_season,
    }
}

fn hot_and_warm_summer(stats: &ClimateStats) -> (Mask, Mask) {
    let hot = check(&stats.t_max, |t| t >= 22.0);
    let warm = and_not(&check(&stats.n_warm, |n| n >= 4.0), &hot);
    (hot, warm)
}

pub(crate) fn temperate_temp(stats: &ClimateStats) -> TemperateTempMasks {
    let (hot_summer, warm_summer) = hot_and_warm_summer(stats);
    TemperateTempMasks {
        cold_summer: not(&or(&hot_summer, &warm_summer)),
        hot_summer,
        warm_summer,
    }
}

pub(crate) fn continental_temp(stats: &ClimateStats) -> ContinentalTempMasks {
    let (hot_summer, warm_summer) = hot_and_warm_summer(stats);
    let rest = not(&or(&hot_summer, &warm_summer));
    let very_cold_winter = and(&rest, &check(&stats.t_min, |t| t < -38.0));
    ContinentalTempMasks {
        cold_summer: and_not(&rest, &very_cold_winter),
        hot_summer,
        warm_summer,
        very_cold_winter,
    }
}

pub(crate) fn polar_temp(stats: &ClimateStats) -> PolarTempMasks {
    let tundra = check(&stats.t_max, |t| t >= 0.0);
    PolarTempMasks {
        eternal_frost: not(&tundra),
        tundra,
    }
}
