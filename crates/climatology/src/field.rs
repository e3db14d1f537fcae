//! Borrowed view of a gridded field with one time dimension.

use ndarray::{ArrayViewD, Axis};

use crate::error::ClimatologyError;

/// A field whose dimensions are one time axis plus any number of spatial
/// axes. Missing values are represented as NaN (or any non-finite value)
/// and are excluded from every average.
#[derive(Debug, Clone)]
pub struct GriddedField<'a> {
    data: ArrayViewD<'a, f64>,
    time_axis: usize,
}

impl<'a> GriddedField<'a> {
    /// Wraps `data`, whose time dimension is at position `time_axis`.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::InvalidTimeAxis`] if `time_axis` is not
    /// a dimension of `data`.
    pub fn new(data: ArrayViewD<'a, f64>, time_axis: usize) -> Result<Self, ClimatologyError> {
        if time_axis >= data.ndim() {
            return Err(ClimatologyError::InvalidTimeAxis {
                axis: time_axis,
                ndim: data.ndim(),
            });
        }
        Ok(Self { data, time_axis })
    }

    /// Returns the underlying array view.
    pub fn data(&self) -> &ArrayViewD<'a, f64> {
        &self.data
    }

    /// Returns the position of the time dimension.
    pub fn time_axis(&self) -> usize {
        self.time_axis
    }

    /// Length of the time dimension.
    pub fn n_times(&self) -> usize {
        self.data.len_of(Axis(self.time_axis))
    }

    /// Shape with the time dimension removed.
    pub fn spatial_shape(&self) -> Vec<usize> {
        self.data
            .shape()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != self.time_axis)
            .map(|(_, &n)| n)
            .collect()
    }

    /// Spatial slice at time step `t`.
    pub(crate) fn at(&self, t: usize) -> ArrayViewD<'_, f64> {
        self.data.index_axis(Axis(self.time_axis), t)
    }
}
