//! # koppen-classify
//!
//! Köppen-Geiger classification of gridded climatologies.
//!
//! ```mermaid
//! flowchart LR
//!     T[tas climatology] --> S[per-cell statistics]
//!     P[pr climatology] --> S
//!     H[summer mask] --> S
//!     S --> M[criterion masks]
//!     C[Convention] --> M
//!     M --> K[class codes]
//! ```
//!
//! Per-cell statistics (annual totals and means, monthly extremes, seasonal
//! precipitation extremes resolved through the summer mask) are computed
//! once. Each [`Convention`] supplies its own major-group rule and its
//! tropical and temperate precipitation rules; all other criteria are
//! shared. A class matches where its major-group, precipitation and
//! temperature masks all hold.
//!
//! ## Quick Start
//!
//! ```ignore
//! use koppen_classify::{Convention, classify, flag_meanings};
//!
//! let convention: Convention = "Kottek06".parse()?;
//! let result = classify(&tas_clim, &pr_clim, convention, None)?;
//! let codes = result.classes();
//! println!("{}", flag_meanings());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `taxonomy` | Major groups, subtypes and the class catalog |
//! | `table` | Integer codes, flag metadata and legend colours |
//! | `convention` | Kottek06, Peel07 and GFDL rule sets |
//! | `summer` | Summer half-year masks from temperature or latitude |
//! | `classify` | The classification driver |
//! | `error` | Error types |

mod classify;
mod convention;
mod error;
mod masks;
mod rules;
mod stats;
mod summer;
mod table;
mod taxonomy;

pub use classify::{Classification, classify};
pub use convention::Convention;
pub use error::ClassifyError;
pub use masks::Mask;
pub use summer::{summer_from_latitude, summer_from_temperature};
pub use table::{
    LegendEntry, MISSING_CODE, MISSING_LABEL, color, flag_meanings, flag_values, label_for_code,
    legend,
};
pub use taxonomy::{KoppenClass, MajorGroup, PrecipType, TempType, catalog};
