//! Output type bundling the climatologies the classifier consumes.

use ndarray::ArrayD;

use crate::error::ClimatologyError;

/// Annual, half-year and monthly climatologies of one variable over one
/// analysis period.
///
/// `annual`, `apr_sep` and `oct_mar` share the spatial shape; `monthly`
/// has an extra leading axis of length 12 (January first).
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatologyResult {
    annual: ArrayD<f64>,
    apr_sep: ArrayD<f64>,
    oct_mar: ArrayD<f64>,
    monthly: ArrayD<f64>,
}

impl ClimatologyResult {
    /// Bundles precomputed climatologies, checking their shapes agree.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::ShapeMismatch`] if the half-year arrays
    /// differ in shape from `annual`, or `monthly` is not `[12, ..annual]`.
    pub fn new(
        annual: ArrayD<f64>,
        apr_sep: ArrayD<f64>,
        oct_mar: ArrayD<f64>,
        monthly: ArrayD<f64>,
    ) -> Result<Self, ClimatologyError> {
        let expected = annual.shape().to_vec();
        for (field, arr) in [("apr_sep", &apr_sep), ("oct_mar", &oct_mar)] {
            if arr.shape() != expected.as_slice() {
                return Err(ClimatologyError::ShapeMismatch {
                    field,
                    expected,
                    got: arr.shape().to_vec(),
                });
            }
        }
        let mut expected_monthly = vec![12];
        expected_monthly.extend_from_slice(&expected);
        if monthly.shape() != expected_monthly.as_slice() {
            return Err(ClimatologyError::ShapeMismatch {
                field: "monthly",
                expected: expected_monthly,
                got: monthly.shape().to_vec(),
            });
        }
        Ok(Self {
            annual,
            apr_sep,
            oct_mar,
            monthly,
        })
    }

    /// Full-year mean or total.
    pub fn annual(&self) -> &ArrayD<f64> {
        &self.annual
    }

    /// April-September mean or total.
    pub fn apr_sep(&self) -> &ArrayD<f64> {
        &self.apr_sep
    }

    /// October-March mean or total.
    pub fn oct_mar(&self) -> &ArrayD<f64> {
        &self.oct_mar
    }

    /// Per-calendar-month means or totals, month on axis 0.
    pub fn monthly(&self) -> &ArrayD<f64> {
        &self.monthly
    }

    /// Spatial shape shared by all four arrays.
    pub fn spatial_shape(&self) -> &[usize] {
        self.annual.shape()
    }
}
