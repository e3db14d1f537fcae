//! Per-cell climate statistics derived once per classification run.

use koppen_climatology::ClimatologyResult;
use ndarray::{ArrayD, ArrayView1, Axis, Zip};

use crate::masks::Mask;

const MONTH_AXIS: Axis = Axis(0);

/// Whether a 0-based month index lies in April..=September.
fn is_apr_sep(month_index: usize) -> bool {
    (3..9).contains(&month_index)
}

/// Temperature (°C) and precipitation (mm) statistics, one value per cell.
///
/// Seasonal quantities are resolved per cell through the summer mask, so
/// `p_smin` is the driest summer month whether summer is April-September
/// or October-March at that cell.
#[derive(Debug, Clone)]
pub(crate) struct ClimateStats {
    pub(crate) p_ann: ArrayD<f64>,
    pub(crate) t_ann: ArrayD<f64>,
    pub(crate) t_max: ArrayD<f64>,
    pub(crate) t_min: ArrayD<f64>,
    pub(crate) n_warm: ArrayD<f64>,
    pub(crate) p_min: ArrayD<f64>,
    pub(crate) p_smin: ArrayD<f64>,
    pub(crate) p_wmin: ArrayD<f64>,
    pub(crate) p_smax: ArrayD<f64>,
    pub(crate) p_wmax: ArrayD<f64>,
    /// Summer half-year precipitation total.
    pub(crate) p_summer: ArrayD<f64>,
    /// Winter half-year precipitation total.
    pub(crate) p_winter: ArrayD<f64>,
}

impl ClimateStats {
    pub(crate) fn new(tas: &ClimatologyResult, pr: &ClimatologyResult, summer: &Mask) -> Self {
        let t_monthly = tas.monthly();
        let p_monthly = pr.monthly();

        let t_max = t_monthly.fold_axis(MONTH_AXIS, f64::NEG_INFINITY, |&a, &b| a.max(b));
        let t_min = t_monthly.fold_axis(MONTH_AXIS, f64::INFINITY, |&a, &b| a.min(b));
        let n_warm = t_monthly.map_axis(MONTH_AXIS, |lane| {
            lane.iter().filter(|&&t| t > 10.0).count() as f64
        });
        let p_min = p_monthly.fold_axis(MONTH_AXIS, f64::INFINITY, |&a, &b| a.min(b));

        let as_min = p_monthly.map_axis(MONTH_AXIS, |lane| half_year_min(lane, true));
        let om_min = p_monthly.map_axis(MONTH_AXIS, |lane| half_year_min(lane, false));
        let as_max = p_monthly.map_axis(MONTH_AXIS, |lane| half_year_max(lane, true));
        let om_max = p_monthly.map_axis(MONTH_AXIS, |lane| half_year_max(lane, false));

        Self {
            p_ann: pr.annual().clone(),
            t_ann: tas.annual().clone(),
            t_max,
            t_min,
            n_warm,
            p_min,
            p_smin: select(summer, &as_min, &om_min),
            p_wmin: select(summer, &om_min, &as_min),
            p_smax: select(summer, &as_max, &om_max),
            p_wmax: select(summer, &om_max, &as_max),
            p_summer: select(summer, pr.apr_sep(), pr.oct_mar()),
            p_winter: select(summer, pr.oct_mar(), pr.apr_sep()),
        }
    }
}

fn half_year(lane: ArrayView1<'_, f64>, apr_sep: bool) -> impl Iterator<Item = f64> + '_ {
    lane.into_iter()
        .enumerate()
        .filter(move |&(i, _)| is_apr_sep(i) == apr_sep)
        .map(|(_, &v)| v)
}

fn half_year_min(lane: ArrayView1<'_, f64>, apr_sep: bool) -> f64 {
    half_year(lane, apr_sep).fold(f64::INFINITY, f64::min)
}

fn half_year_max(lane: ArrayView1<'_, f64>, apr_sep: bool) -> f64 {
    half_year(lane, apr_sep).fold(f64::NEG_INFINITY, f64::max)
}

/// `if_true` where `mask` holds, `if_false` elsewhere.
fn select(mask: &Mask, if_true: &ArrayD<f64>, if_false: &ArrayD<f64>) -> ArrayD<f64> {
    Zip::from(mask)
        .and(if_true)
        .and(if_false)
        .map_collect(|&m, &t, &f| if m { t } else { f })
}
