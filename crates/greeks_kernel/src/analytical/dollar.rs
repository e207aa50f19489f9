//! Notional-scaled ("dollar") exposures.
//!
//! A dollar Greek is the per-unit Greek multiplied by the signed notional,
//! except gamma, which is expressed per 1% spot move: `notional·Γ·S/100`.
//!
//! Notionals may hold one value per instrument or a single value broadcast
//! to the whole batch. The length is checked before any Greek is evaluated.

use greeks_core::types::{GreeksError, PERCENT_POINT};

use super::black_scholes::greek;
use crate::greeks::{Greek, KernelConventions};
use crate::params::OptionParameters;
use crate::payoff::PayoffKind;

fn check_notionals(notionals: &[f64], n: usize) -> Result<(), GreeksError> {
    if notionals.len() == n || notionals.len() == 1 {
        Ok(())
    } else {
        Err(GreeksError::shape_mismatch("notionals", n, notionals.len()))
    }
}

#[inline]
fn notional_at(notionals: &[f64], i: usize) -> f64 {
    if notionals.len() == 1 {
        notionals[0]
    } else {
        notionals[i]
    }
}

/// Multiplies per-unit values by notionals (length N or 1).
///
/// # Errors
/// `GreeksError::ShapeMismatch` if `notionals` is neither length 1 nor
/// `values.len()`.
///
/// # Examples
/// ```
/// use greeks_kernel::analytical::scale_by_notional;
///
/// let scaled = scale_by_notional(&[-50_000_000.0], &[0.4]).unwrap();
/// assert_eq!(scaled, vec![-20_000_000.0]);
/// ```
pub fn scale_by_notional(notionals: &[f64], values: &[f64]) -> Result<Vec<f64>, GreeksError> {
    check_notionals(notionals, values.len())?;
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, v)| notional_at(notionals, i) * v)
        .collect())
}

/// Evaluates a notional-scaled Greek.
///
/// # Errors
/// `GreeksError::ShapeMismatch` if `notionals` is neither length 1 nor
/// `params.len()`.
pub fn dollar_greek(
    notionals: &[f64],
    params: &OptionParameters,
    payoff: PayoffKind,
    which: Greek,
    conventions: &KernelConventions,
) -> Result<Vec<f64>, GreeksError> {
    check_notionals(notionals, params.len())?;

    let per_unit = greek(params, payoff, which, conventions);
    let exposure = match which {
        Greek::Gamma => per_unit
            .iter()
            .zip(params.spot())
            .map(|(g, s)| g * s / PERCENT_POINT)
            .collect(),
        _ => per_unit,
    };

    scale_by_notional(notionals, &exposure)
}

/// Dollar premium.
pub fn dollar_price(
    notionals: &[f64],
    params: &OptionParameters,
    payoff: PayoffKind,
) -> Result<Vec<f64>, GreeksError> {
    dollar_greek(notionals, params, payoff, Greek::Price, &KernelConventions::default())
}

/// Dollar delta: notional·Δ.
pub fn dollar_delta(
    notionals: &[f64],
    params: &OptionParameters,
    payoff: PayoffKind,
) -> Result<Vec<f64>, GreeksError> {
    dollar_greek(notionals, params, payoff, Greek::Delta, &KernelConventions::default())
}

/// Dollar gamma per 1% spot move: notional·Γ·S/100.
pub fn dollar_gamma(
    notionals: &[f64],
    params: &OptionParameters,
    payoff: PayoffKind,
) -> Result<Vec<f64>, GreeksError> {
    dollar_greek(notionals, params, payoff, Greek::Gamma, &KernelConventions::default())
}

/// Dollar theta per period of `conventions.time_decay_basis`.
pub fn dollar_theta(
    notionals: &[f64],
    params: &OptionParameters,
    payoff: PayoffKind,
    conventions: &KernelConventions,
) -> Result<Vec<f64>, GreeksError> {
    dollar_greek(notionals, params, payoff, Greek::Theta, conventions)
}

/// Dollar vega per volatility point.
pub fn dollar_vega(
    notionals: &[f64],
    params: &OptionParameters,
    payoff: PayoffKind,
) -> Result<Vec<f64>, GreeksError> {
    dollar_greek(notionals, params, payoff, Greek::Vega, &KernelConventions::default())
}

/// Dollar rho per rate point.
pub fn dollar_rho(
    notionals: &[f64],
    params: &OptionParameters,
    payoff: PayoffKind,
) -> Result<Vec<f64>, GreeksError> {
    dollar_greek(notionals, params, payoff, Greek::Rho, &KernelConventions::default())
}
