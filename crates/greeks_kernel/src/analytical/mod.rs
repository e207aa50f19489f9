//! Closed-form Black-Scholes-Merton kernel.
//!
//! - `black_scholes`: per-unit price and Greeks for calls and puts
//! - `dollar`: notional-scaled exposures

pub mod black_scholes;
pub mod dollar;

pub use black_scholes::{
    call_delta, call_gamma, call_price, call_rho, call_theta, call_vega, d1_d2, discounted_spot,
    forward, gamma, greek, greek_set, put_delta, put_gamma, put_price, put_rho, put_theta,
    put_vega, rho_with, vega,
};
pub use dollar::{
    dollar_delta, dollar_gamma, dollar_greek, dollar_price, dollar_rho, dollar_theta,
    dollar_vega, scale_by_notional,
};
