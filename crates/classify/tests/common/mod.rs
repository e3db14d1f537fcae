#![allow(dead_code)]

use koppen_climatology::ClimatologyResult;
use ndarray::{Array2, ArrayD, IxDyn};

/// Builds a one-dimensional grid of climatologies from per-cell monthly
/// values. With `total`, the annual and half-year values are sums (mm);
/// otherwise they are means (°C).
pub fn grid(cells: &[[f64; 12]], total: bool) -> ClimatologyResult {
    let n = cells.len();
    let monthly = Array2::from_shape_fn((12, n), |(m, c)| cells[c][m]);
    let reduce = |months: &[usize], c: usize| -> f64 {
        let sum: f64 = months.iter().map(|&m| cells[c][m]).sum();
        if total { sum } else { sum / months.len() as f64 }
    };
    let all: Vec<usize> = (0..12).collect();
    let apr_sep: Vec<usize> = (3..9).collect();
    let oct_mar: Vec<usize> = vec![9, 10, 11, 0, 1, 2];
    let field = |months: &[usize]| {
        ArrayD::from_shape_fn(IxDyn(&[n]), |idx| reduce(months, idx[0]))
    };
    ClimatologyResult::new(
        field(&all),
        field(&apr_sep),
        field(&oct_mar),
        monthly.into_dyn(),
    )
    .unwrap()
}

/// Summer is April-September everywhere.
pub fn northern(n: usize) -> ArrayD<bool> {
    ArrayD::from_elem(IxDyn(&[n]), true)
}

pub mod temperature {
    pub const TROPICAL: [f64; 12] = [26.0; 12];
    pub const HOT_DRY: [f64; 12] = [20.0, 22.0, 25.0, 28.0, 31.0, 33.0, 34.0, 33.0, 31.0, 28.0, 24.0, 21.0];
    pub const COLD_DRY: [f64; 12] = [-4.0, -2.0, 4.0, 10.0, 16.0, 21.0, 24.0, 23.0, 18.0, 11.0, 3.0, -2.0];
    pub const TEMPERATE_HOT: [f64; 12] = [5.0, 6.0, 9.0, 13.0, 17.0, 21.0, 24.0, 23.0, 20.0, 15.0, 10.0, 6.0];
    pub const TEMPERATE_WARM: [f64; 12] = [3.0, 4.0, 6.0, 9.0, 12.0, 15.0, 17.0, 16.0, 14.0, 11.0, 7.0, 4.0];
    pub const TEMPERATE_COLD: [f64; 12] = [1.0, 1.0, 2.0, 4.0, 7.0, 10.0, 12.0, 11.0, 9.0, 6.0, 3.0, 1.0];
    pub const CONTINENTAL_HOT: [f64; 12] = [-10.0, -8.0, 0.0, 9.0, 16.0, 21.0, 24.0, 22.0, 16.0, 8.0, -1.0, -8.0];
    pub const CONTINENTAL_WARM: [f64; 12] = [-15.0, -12.0, -5.0, 3.0, 11.0, 15.0, 18.0, 16.0, 12.0, 4.0, -5.0, -12.0];
    pub const CONTINENTAL_COLD: [f64; 12] = [-30.0, -28.0, -18.0, -4.0, 5.0, 11.0, 14.0, 12.0, 5.0, -6.0, -20.0, -28.0];
    pub const VERY_COLD: [f64; 12] = [-45.0, -42.0, -30.0, -12.0, 2.0, 12.0, 15.0, 12.0, 3.0, -15.0, -35.0, -44.0];
    pub const TUNDRA: [f64; 12] = [-25.0, -24.0, -20.0, -12.0, -2.0, 4.0, 8.0, 6.0, 1.0, -8.0, -18.0, -23.0];
    pub const FROST: [f64; 12] = [-40.0, -38.0, -35.0, -30.0, -20.0, -12.0, -8.0, -10.0, -18.0, -28.0, -35.0, -38.0];
    /// Coldest month between -3 °C and 0 °C.
    pub const MILD_WINTER: [f64; 12] = [-1.0, 0.0, 4.0, 9.0, 14.0, 19.0, 23.0, 22.0, 17.0, 11.0, 5.0, 0.0];
    /// Coldest month exactly 18 °C.
    pub const TROPICAL_EDGE: [f64; 12] = [18.0, 19.0, 21.0, 23.0, 25.0, 27.0, 28.0, 27.0, 25.0, 23.0, 20.0, 18.0];
}

/// Monthly precipitation totals in mm.
pub mod precipitation {
    pub const WET: [f64; 12] = [200.0; 12];
    pub const MONSOON: [f64; 12] = [40.0, 50.0, 80.0, 200.0, 400.0, 600.0, 700.0, 600.0, 400.0, 200.0, 80.0, 50.0];
    pub const SAVANNA_DRY_WINTER: [f64; 12] = [5.0, 10.0, 20.0, 60.0, 150.0, 200.0, 220.0, 200.0, 150.0, 60.0, 20.0, 5.0];
    pub const SAVANNA_DRY_SUMMER: [f64; 12] = [200.0, 220.0, 200.0, 150.0, 60.0, 20.0, 5.0, 5.0, 20.0, 60.0, 150.0, 200.0];
    pub const DESERT: [f64; 12] = [2.0; 12];
    pub const HOT_STEPPE: [f64; 12] = [40.0; 12];
    pub const COLD_DESERT: [f64; 12] = [5.0; 12];
    pub const COLD_STEPPE: [f64; 12] = [20.0; 12];
    pub const DRY_SUMMER: [f64; 12] = [100.0, 90.0, 80.0, 50.0, 30.0, 15.0, 10.0, 15.0, 30.0, 60.0, 90.0, 100.0];
    pub const DRY_WINTER: [f64; 12] = [5.0, 5.0, 10.0, 40.0, 100.0, 200.0, 250.0, 200.0, 100.0, 40.0, 10.0, 5.0];
    /// Dry summer month below 40 mm that is not drier than the driest
    /// winter month.
    pub const WEAK_DRY_SUMMER: [f64; 12] = [20.0, 25.0, 30.0, 35.0, 30.0, 25.0, 20.0, 25.0, 30.0, 40.0, 100.0, 120.0];
}
