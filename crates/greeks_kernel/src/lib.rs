//! # greeks_kernel (L2: Pricing Kernel)
//!
//! Closed-form Black-Scholes-Merton prices and sensitivities for European
//! calls and puts with a continuous dividend / foreign-rate yield.
//!
//! This crate provides:
//! - [`OptionParameters`]: a validated struct-of-arrays batch of model inputs
//! - [`PayoffKind`] and [`Greek`] for tagged-enum dispatch
//! - Per-unit price and Greeks (`analytical::black_scholes`)
//! - Notional-scaled "dollar" Greeks (`analytical::dollar`)
//!
//! ## Design Principles
//!
//! - **Validate once, compute freely**: a constructed batch has positive
//!   spot, strike, expiry and volatility, so no formula can divide by zero
//! - **Free functions over enums**: calls and puts share one `d1/d2` helper
//! - **Explicit conventions**: theta's per-period divisor travels in
//!   [`KernelConventions`] instead of a hidden constant
//!
//! ## Example
//!
//! ```
//! use greeks_kernel::analytical::{call_price, put_price};
//! use greeks_kernel::OptionParameters;
//!
//! let params = OptionParameters::without_yield(
//!     vec![100.0], vec![100.0], vec![1.0], vec![0.2], vec![0.05],
//! ).unwrap();
//!
//! let call = call_price(&params)[0];
//! let put = put_price(&params)[0];
//! let forward_gap = 100.0 - 100.0 * (-0.05_f64).exp();
//! assert!((call - put - forward_gap).abs() < 1e-10);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod greeks;
pub mod params;
pub mod payoff;

pub use greeks::{Greek, GreekSet, KernelConventions};
pub use params::{OptionParameters, OptionPoint};
pub use payoff::PayoffKind;
