//! Per-cell "summer is April-September" masks.

use koppen_climatology::ClimatologyResult;
use ndarray::{ArrayD, IxDyn, Zip};

use crate::error::ClassifyError;
use crate::masks::Mask;

/// Summer is April-September wherever that half-year is at least as warm as
/// October-March.
pub fn summer_from_temperature(tas: &ClimatologyResult) -> Mask {
    Zip::from(tas.apr_sep())
        .and(tas.oct_mar())
        .map_collect(|&apr_sep, &oct_mar| apr_sep >= oct_mar)
}

/// Summer is April-September in the northern hemisphere (latitude `>= 0`).
///
/// `lat` holds one latitude per index along axis `lat_axis` of a grid with
/// spatial shape `shape`.
///
/// # Errors
///
/// Returns [`ClassifyError::ShapeMismatch`] if `lat_axis` is out of range or
/// `lat` does not match the length of that axis.
pub fn summer_from_latitude(
    lat: &[f64],
    shape: &[usize],
    lat_axis: usize,
) -> Result<Mask, ClassifyError> {
    let axis_len = shape.get(lat_axis).copied();
    if axis_len != Some(lat.len()) {
        return Err(ClassifyError::ShapeMismatch {
            field: "lat",
            expected: axis_len.into_iter().collect(),
            got: vec![lat.len()],
        });
    }
    Ok(ArrayD::from_shape_fn(IxDyn(shape), |idx| {
        lat[idx[lat_axis]] >= 0.0
    }))
}
