//! # greeks_core: Foundation for Black-Scholes-Merton Greeks
//!
//! ## Layer 1 (Foundation) Role
//!
//! greeks_core is the bottom layer of the workspace, providing:
//! - Standard normal CDF/PDF (`math::distributions`)
//! - Error taxonomy shared by every layer: `GreeksError` (`types::error`)
//! - Time conventions: `DayCountBasis`, `Expiry`, date-based expiry (`types::time`)
//! - Unit conventions: `TimeDecayBasis`, percent/decimal conversion (`types::units`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use greeks_core::math::distributions::norm_cdf;
//! use greeks_core::types::{DayCountBasis, Expiry, TimeDecayBasis};
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//!
//! let expiry = Expiry::from_tenor_days(30.0, DayCountBasis::Act365);
//! assert_eq!(expiry.year_fraction(), Some(30.0 / 365.0));
//!
//! assert_eq!(TimeDecayBasis::TradingDays.divisor(), 252.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialise/deserialise conventions by their short names

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
