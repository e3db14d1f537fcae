//! # koppen-climatology
//!
//! Calendar-weighted climatologies of gridded time series.
//!
//! Monthly samples are weighted by the number of days in their month
//! (sub-monthly samples equally, or by explicit per-sample weights when
//! the source provides them). Seasons are contiguous month runs that may
//! wrap the year end; each qualifying year contributes one season instance,
//! and instances are averaged with their weight sums so that missing data
//! (NaN) is excluded rather than counted as zero.
//!
//! ## Quick Start
//!
//! ```ignore
//! use koppen_calendar::TimeAxis;
//! use koppen_climatology::{Aggregate, Climatology, ClimatologyConfig, GriddedField, Season};
//!
//! let axis = TimeAxis::from_cf(times, "days since 1850-01-01", "noleap")?;
//! let clim = Climatology::new(&axis, &ClimatologyConfig::new(1981, 2010))?;
//! let field = GriddedField::new(pr.view(), 0)?;
//! let djf_total = clim.season(&field, &Season::new(12, 3)?, Aggregate::Total)?;
//! let averages = clim.koppen_averages(&field, Aggregate::Total)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `climatology` | The [`Climatology`] engine |
//! | `config` | Year range, edge policy and explicit weights |
//! | `field` | Borrowed gridded field with a time dimension |
//! | `frequency` | Sampling-frequency detection and calendar weights |
//! | `season` | Season definitions, edge policy and aggregate mode |
//! | `result` | Bundled annual / half-year / monthly climatologies |
//! | `error` | Error types |

mod climatology;
mod config;
mod error;
mod field;
mod frequency;
mod result;
mod season;

pub use climatology::Climatology;
pub use config::ClimatologyConfig;
pub use error::ClimatologyError;
pub use field::GriddedField;
pub use frequency::SamplingFrequency;
pub use result::ClimatologyResult;
pub use season::{Aggregate, EdgePolicy, Season};
