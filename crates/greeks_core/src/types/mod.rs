//! Core types shared across the workspace.
//!
//! This module provides:
//! - `error`: the `GreeksError` taxonomy
//! - `time`: day-count bases, `Expiry`, date-based time to expiry
//! - `units`: `TimeDecayBasis`, `RhoConvention` and percentage-point conventions

pub mod error;
pub mod time;
pub mod units;

pub use error::GreeksError;
pub use time::{days_to_expiry, time_to_expiry, DayCountBasis, Expiry};
pub use units::{percent_to_decimal, RhoConvention, TimeDecayBasis, PERCENT_POINT};
