//! Configuration for climatology construction.

use crate::error::ClimatologyError;
use crate::season::EdgePolicy;

/// Analysis period and per-sample weighting for a [`Climatology`](crate::Climatology).
///
/// # Example
///
/// ```
/// use koppen_climatology::{ClimatologyConfig, EdgePolicy};
///
/// let config = ClimatologyConfig::new(1981, 2010)
///     .with_edge_policy(EdgePolicy::Truncate);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClimatologyConfig {
    start_year: i32,
    end_year: i32,
    edge_policy: EdgePolicy,
    sample_weights: Option<Vec<f64>>,
}

impl ClimatologyConfig {
    /// Creates a configuration for the inclusive year range
    /// `start_year..=end_year`.
    ///
    /// Defaults: `edge_policy = Skip`, calendar-derived sample weights.
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            edge_policy: EdgePolicy::Skip,
            sample_weights: None,
        }
    }

    /// Sets the edge policy used by the preset seasons
    /// ([`Climatology::annual`](crate::Climatology::annual),
    /// [`Climatology::koppen_averages`](crate::Climatology::koppen_averages), ...).
    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    /// Supplies explicit per-sample weights (e.g. the number of days each
    /// sample averages over). These take precedence over weights derived
    /// from the calendar.
    pub fn with_sample_weights(mut self, weights: Vec<f64>) -> Self {
        self.sample_weights = Some(weights);
        self
    }

    /// Returns the first year of the analysis period.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Returns the last year of the analysis period.
    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Returns the edge policy for preset seasons.
    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// Returns the explicit sample weights, if any.
    pub fn sample_weights(&self) -> Option<&[f64]> {
        self.sample_weights.as_deref()
    }

    /// Validates this configuration.
    ///
    /// Checks that the year range is ordered and that explicit weights are
    /// finite and non-negative.
    pub fn validate(&self) -> Result<(), ClimatologyError> {
        if self.start_year > self.end_year {
            return Err(ClimatologyError::InvalidYearRange {
                start_year: self.start_year,
                end_year: self.end_year,
            });
        }
        if let Some(weights) = &self.sample_weights {
            for (index, &value) in weights.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ClimatologyError::InvalidWeight { index, value });
                }
            }
        }
        Ok(())
    }
}
