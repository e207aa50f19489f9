//! Black-Scholes-Merton prices and Greeks for European options.
//!
//! All functions evaluate a whole [`OptionParameters`] batch and return one
//! value per instrument, in batch order.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Units
//!
//! - Vega is per volatility point (∂V/∂σ / 100)
//! - Rho is per rate point, quoted as ±K·e^(-rT)·N(±d₂) / 100 unless
//!   [`RhoConvention::Derivative`] asks for the full ∂V/∂r / 100
//! - Theta is per [`TimeDecayBasis`] period (∂V/∂t / divisor)

use greeks_core::math::{norm_cdf, norm_pdf};
use greeks_core::types::{RhoConvention, TimeDecayBasis, PERCENT_POINT};

use crate::greeks::{Greek, GreekSet, KernelConventions};
use crate::params::{OptionParameters, OptionPoint};
use crate::payoff::PayoffKind;

/// Per-instrument intermediate terms shared by every formula.
#[derive(Debug, Clone, Copy)]
struct Terms {
    d1: f64,
    d2: f64,
    sqrt_t: f64,
    /// e^(-qT)
    df_q: f64,
    /// e^(-rT)
    df_r: f64,
}

impl Terms {
    #[inline]
    fn new(p: &OptionPoint) -> Self {
        let sqrt_t = p.time_to_expiry.sqrt();
        let vol_sqrt_t = p.volatility * sqrt_t;
        let drift = (p.domestic_rate - p.foreign_rate + 0.5 * p.volatility * p.volatility)
            * p.time_to_expiry;
        let d1 = ((p.spot / p.strike).ln() + drift) / vol_sqrt_t;

        Self {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            df_q: (-p.foreign_rate * p.time_to_expiry).exp(),
            df_r: (-p.domestic_rate * p.time_to_expiry).exp(),
        }
    }
}

#[inline]
fn map_terms<F>(params: &OptionParameters, f: F) -> Vec<f64>
where
    F: Fn(&OptionPoint, &Terms) -> f64,
{
    params
        .iter()
        .map(|p| {
            let terms = Terms::new(&p);
            f(&p, &terms)
        })
        .collect()
}

/// Computes d₁ and d₂ for every instrument.
///
/// # Examples
/// ```
/// use greeks_kernel::analytical::d1_d2;
/// use greeks_kernel::OptionParameters;
///
/// let params = OptionParameters::without_yield(
///     vec![100.0], vec![100.0], vec![1.0], vec![0.2], vec![0.0],
/// ).unwrap();
/// let (d1, d2) = d1_d2(&params);
/// assert!((d1[0] - 0.1).abs() < 1e-12);
/// assert!((d2[0] + 0.1).abs() < 1e-12);
/// ```
pub fn d1_d2(params: &OptionParameters) -> (Vec<f64>, Vec<f64>) {
    params
        .iter()
        .map(|p| {
            let terms = Terms::new(&p);
            (terms.d1, terms.d2)
        })
        .unzip()
}

#[inline]
fn call_price_at(p: &OptionPoint, t: &Terms) -> f64 {
    norm_cdf(t.d1) * p.spot * t.df_q - norm_cdf(t.d2) * p.strike * t.df_r
}

#[inline]
fn put_price_at(p: &OptionPoint, t: &Terms) -> f64 {
    norm_cdf(-t.d2) * p.strike * t.df_r - norm_cdf(-t.d1) * p.spot * t.df_q
}

#[inline]
fn call_delta_at(t: &Terms) -> f64 {
    t.df_q * norm_cdf(t.d1)
}

#[inline]
fn put_delta_at(t: &Terms) -> f64 {
    t.df_q * (norm_cdf(t.d1) - 1.0)
}

#[inline]
fn gamma_at(p: &OptionPoint, t: &Terms) -> f64 {
    t.df_q * norm_pdf(t.d1) / (p.spot * p.volatility * t.sqrt_t)
}

#[inline]
fn vega_at(p: &OptionPoint, t: &Terms) -> f64 {
    p.spot * t.df_q * norm_pdf(t.d1) * t.sqrt_t / PERCENT_POINT
}

/// Annual decay from the volatility term, common to calls and puts.
#[inline]
fn diffusion_decay(p: &OptionPoint, t: &Terms) -> f64 {
    -p.spot * t.df_q * norm_pdf(t.d1) * p.volatility / (2.0 * t.sqrt_t)
}

#[inline]
fn call_theta_at(p: &OptionPoint, t: &Terms, basis: TimeDecayBasis) -> f64 {
    let annual = diffusion_decay(p, t) - p.domestic_rate * p.strike * t.df_r * norm_cdf(t.d2)
        + p.foreign_rate * p.spot * t.df_q * norm_cdf(t.d1);
    annual / basis.divisor()
}

#[inline]
fn put_theta_at(p: &OptionPoint, t: &Terms, basis: TimeDecayBasis) -> f64 {
    let annual = diffusion_decay(p, t) + p.domestic_rate * p.strike * t.df_r * norm_cdf(-t.d2)
        - p.foreign_rate * p.spot * t.df_q * norm_cdf(-t.d1);
    annual / basis.divisor()
}

#[inline]
fn call_rho_at(p: &OptionPoint, t: &Terms) -> f64 {
    p.strike * t.df_r * norm_cdf(t.d2) / PERCENT_POINT
}

#[inline]
fn put_rho_at(p: &OptionPoint, t: &Terms) -> f64 {
    -p.strike * t.df_r * norm_cdf(-t.d2) / PERCENT_POINT
}

/// Forward price per instrument: S·e^((r-q)T).
///
/// # Examples
/// ```
/// use greeks_kernel::analytical::{call_price, forward, put_price};
/// use greeks_kernel::OptionParameters;
///
/// let params = OptionParameters::new(
///     vec![100.0], vec![105.0], vec![1.0], vec![0.2], vec![0.05], vec![0.02],
/// ).unwrap();
///
/// let f = forward(&params)[0];
/// let parity = (-0.05_f64).exp() * (f - 105.0);
/// assert!((call_price(&params)[0] - put_price(&params)[0] - parity).abs() < 1e-10);
/// ```
pub fn forward(params: &OptionParameters) -> Vec<f64> {
    params
        .iter()
        .map(|p| p.spot * ((p.domestic_rate - p.foreign_rate) * p.time_to_expiry).exp())
        .collect()
}

/// Spot discounted at the domestic rate: S·e^(-rT).
pub fn discounted_spot(params: &OptionParameters) -> Vec<f64> {
    params
        .iter()
        .map(|p| p.spot * (-p.domestic_rate * p.time_to_expiry).exp())
        .collect()
}

/// European call premium per unit of underlying.
pub fn call_price(params: &OptionParameters) -> Vec<f64> {
    map_terms(params, call_price_at)
}

/// European put premium per unit of underlying.
pub fn put_price(params: &OptionParameters) -> Vec<f64> {
    map_terms(params, put_price_at)
}

/// Call delta: e^(-qT)·N(d₁), in (0, e^(-qT)).
pub fn call_delta(params: &OptionParameters) -> Vec<f64> {
    map_terms(params, |_, t| call_delta_at(t))
}

/// Put delta: e^(-qT)·(N(d₁) - 1), in (-e^(-qT), 0).
pub fn put_delta(params: &OptionParameters) -> Vec<f64> {
    map_terms(params, |_, t| put_delta_at(t))
}

/// Gamma: e^(-qT)·φ(d₁) / (S·σ·√T). Identical for calls and puts.
pub fn gamma(params: &OptionParameters) -> Vec<f64> {
    map_terms(params, gamma_at)
}

/// Call gamma.
#[inline]
pub fn call_gamma(params: &OptionParameters) -> Vec<f64> {
    gamma(params)
}

/// Put gamma.
#[inline]
pub fn put_gamma(params: &OptionParameters) -> Vec<f64> {
    gamma(params)
}

/// Vega per volatility point: S·e^(-qT)·φ(d₁)·√T / 100.
pub fn vega(params: &OptionParameters) -> Vec<f64> {
    map_terms(params, vega_at)
}

/// Call vega.
#[inline]
pub fn call_vega(params: &OptionParameters) -> Vec<f64> {
    vega(params)
}

/// Put vega.
#[inline]
pub fn put_vega(params: &OptionParameters) -> Vec<f64> {
    vega(params)
}

/// Call theta per `basis` period.
///
/// [-S·e^(-qT)·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)] / basis
pub fn call_theta(params: &OptionParameters, basis: TimeDecayBasis) -> Vec<f64> {
    map_terms(params, |p, t| call_theta_at(p, t, basis))
}

/// Put theta per `basis` period.
///
/// [-S·e^(-qT)·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)] / basis
pub fn put_theta(params: &OptionParameters, basis: TimeDecayBasis) -> Vec<f64> {
    map_terms(params, |p, t| put_theta_at(p, t, basis))
}

/// Call rho per rate point: K·e^(-rT)·N(d₂) / 100.
pub fn call_rho(params: &OptionParameters) -> Vec<f64> {
    map_terms(params, call_rho_at)
}

/// Put rho per rate point: -K·e^(-rT)·N(-d₂) / 100.
pub fn put_rho(params: &OptionParameters) -> Vec<f64> {
    map_terms(params, put_rho_at)
}

/// Rho under an explicit [`RhoConvention`].
///
/// `RhoConvention::Quoted` matches [`call_rho`] / [`put_rho`];
/// `RhoConvention::Derivative` scales each value by its `T`.
pub fn rho_with(
    params: &OptionParameters,
    payoff: PayoffKind,
    convention: RhoConvention,
) -> Vec<f64> {
    map_terms(params, |p, t| rho_at(p, t, payoff, convention))
}

#[inline]
fn rho_at(p: &OptionPoint, t: &Terms, payoff: PayoffKind, convention: RhoConvention) -> f64 {
    let quoted = match payoff {
        PayoffKind::Call => call_rho_at(p, t),
        PayoffKind::Put => put_rho_at(p, t),
    };
    quoted * convention.time_factor(p.time_to_expiry)
}

/// Evaluates one Greek for one payoff kind.
///
/// # Examples
/// ```
/// use greeks_kernel::analytical::{call_delta, greek};
/// use greeks_kernel::{Greek, KernelConventions, OptionParameters, PayoffKind};
///
/// let params = OptionParameters::without_yield(
///     vec![100.0], vec![95.0], vec![0.5], vec![0.25], vec![0.03],
/// ).unwrap();
/// let conventions = KernelConventions::default();
///
/// assert_eq!(
///     greek(&params, PayoffKind::Call, Greek::Delta, &conventions),
///     call_delta(&params),
/// );
/// ```
pub fn greek(
    params: &OptionParameters,
    payoff: PayoffKind,
    greek: Greek,
    conventions: &KernelConventions,
) -> Vec<f64> {
    let basis = conventions.time_decay_basis;
    match (payoff, greek) {
        (PayoffKind::Call, Greek::Price) => call_price(params),
        (PayoffKind::Put, Greek::Price) => put_price(params),
        (PayoffKind::Call, Greek::Delta) => call_delta(params),
        (PayoffKind::Put, Greek::Delta) => put_delta(params),
        (_, Greek::Gamma) => gamma(params),
        (PayoffKind::Call, Greek::Theta) => call_theta(params, basis),
        (PayoffKind::Put, Greek::Theta) => put_theta(params, basis),
        (_, Greek::Vega) => vega(params),
        (_, Greek::Rho) => rho_with(params, payoff, conventions.rho_convention),
    }
}

/// Evaluates every Greek at once, computing d₁/d₂ a single time per instrument.
pub fn greek_set(
    params: &OptionParameters,
    payoff: PayoffKind,
    conventions: &KernelConventions,
) -> GreekSet {
    let n = params.len();
    let basis = conventions.time_decay_basis;
    let rho = conventions.rho_convention;
    let mut set = GreekSet {
        price: Vec::with_capacity(n),
        delta: Vec::with_capacity(n),
        gamma: Vec::with_capacity(n),
        theta: Vec::with_capacity(n),
        vega: Vec::with_capacity(n),
        rho: Vec::with_capacity(n),
    };

    for p in params.iter() {
        let t = Terms::new(&p);
        set.gamma.push(gamma_at(&p, &t));
        set.vega.push(vega_at(&p, &t));
        match payoff {
            PayoffKind::Call => {
                set.price.push(call_price_at(&p, &t));
                set.delta.push(call_delta_at(&t));
                set.theta.push(call_theta_at(&p, &t, basis));
                set.rho.push(rho_at(&p, &t, payoff, rho));
            }
            PayoffKind::Put => {
                set.price.push(put_price_at(&p, &t));
                set.delta.push(put_delta_at(&t));
                set.theta.push(put_theta_at(&p, &t, basis));
                set.rho.push(rho_at(&p, &t, payoff, rho));
            }
        }
    }

    set
}
