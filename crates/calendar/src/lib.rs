//! # koppen-calendar
//!
//! Calendar arithmetic for CF-conventions time coordinates.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["calendar attribute"] -->|"parse()"| B["Calendar"]
//!     C["units attribute"] -->|"TimeUnits::parse()"| D["TimeUnits"]
//!     B --> D
//!     D -->|".decode()"| E["CalendarDate"]
//!     E -->|".encode()"| D
//!     F["coordinates"] -->|"TimeAxis::new()"| G["TimeAxis"]
//!     D --> G
//!     G -->|".date_to_index()"| H["sample index"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use koppen_calendar::{Calendar, CalendarDate, Side, TimeAxis, days_in_month};
//!
//! let cal: Calendar = "noleap".parse().unwrap();
//! assert_eq!(days_in_month(2000, 2, cal).unwrap(), 28);
//!
//! let axis = TimeAxis::from_cf(vec![15.5, 45.0, 74.5], "days since 2000-01-01", "noleap").unwrap();
//! let feb = CalendarDate::new(2000, 2, 1, cal).unwrap();
//! assert_eq!(axis.date_to_index(feb, Side::Left).unwrap(), 1);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `calendar` | Calendar variants, leap rules, days per month, day counts |
//! | `date` | Validated dates and year-month counters |
//! | `units` | CF time units parsing, decoding and encoding |
//! | `axis` | Time axis validation and insertion-point lookup |
//! | `error` | Error types |

mod axis;
mod calendar;
mod date;
mod error;
mod units;

pub use axis::{Side, TimeAxis};
pub use calendar::{Calendar, days_in_month, is_leap_year};
pub use date::{CalendarDate, YearMonth};
pub use error::CalendarError;
pub use units::{TimeUnit, TimeUnits};
