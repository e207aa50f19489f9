//! Numerical building blocks.
//!
//! - `distributions`: standard normal CDF and PDF used by the closed-form kernel

pub mod distributions;

pub use distributions::{norm_cdf, norm_pdf};
