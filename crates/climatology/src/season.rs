//! Season definitions and aggregation modes.

use crate::error::ClimatologyError;

/// How a season instance that straddles the edge of the analysis period
/// is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Drop partial instances and use only fully covered ones.
    #[default]
    Skip,
    /// Clip partial instances to the analysis period. Only applies to
    /// [`Aggregate::Mean`]; totals over a clipped season would be biased
    /// low, so partial instances are always skipped for
    /// [`Aggregate::Total`].
    Truncate,
}

/// Statistic computed for each season instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    /// Day-weighted mean.
    Mean,
    /// Day-weighted mean rescaled by the instance's weight sum.
    Total,
}

/// A contiguous run of calendar months, possibly wrapping the year end.
///
/// # Example
///
/// ```
/// use koppen_climatology::Season;
///
/// let djf = Season::new(12, 3).unwrap();
/// assert_eq!(djf.months().collect::<Vec<_>>(), vec![12, 1, 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    start_month: u8,
    duration: u8,
    edge_policy: EdgePolicy,
}

impl Season {
    /// Creates a season of `duration` months starting at `start_month`,
    /// with the default [`EdgePolicy::Skip`].
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::InvalidSeason`] unless both arguments
    /// are in 1..=12.
    pub fn new(start_month: u8, duration: u8) -> Result<Self, ClimatologyError> {
        if !(1..=12).contains(&start_month) || !(1..=12).contains(&duration) {
            return Err(ClimatologyError::InvalidSeason {
                start_month,
                duration,
            });
        }
        Ok(Self {
            start_month,
            duration,
            edge_policy: EdgePolicy::Skip,
        })
    }

    /// A single calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatologyError::InvalidSeason`] if `month` is not in 1..=12.
    pub fn month(month: u8) -> Result<Self, ClimatologyError> {
        Self::new(month, 1)
    }

    /// January through December.
    pub fn annual() -> Self {
        Self {
            start_month: 1,
            duration: 12,
            edge_policy: EdgePolicy::Skip,
        }
    }

    /// April through September.
    pub fn apr_sep() -> Self {
        Self {
            start_month: 4,
            duration: 6,
            edge_policy: EdgePolicy::Skip,
        }
    }

    /// October through March of the following year.
    pub fn oct_mar() -> Self {
        Self {
            start_month: 10,
            duration: 6,
            edge_policy: EdgePolicy::Skip,
        }
    }

    /// Sets the edge policy.
    pub fn with_edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    /// Returns the first month (1..=12).
    pub fn start_month(&self) -> u8 {
        self.start_month
    }

    /// Returns the number of months.
    pub fn duration(&self) -> u8 {
        self.duration
    }

    /// Returns the edge policy.
    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// Calendar months in the season, in order.
    pub fn months(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.duration).map(|k| (self.start_month - 1 + k) % 12 + 1)
    }
}
