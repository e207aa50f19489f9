//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Φ, the cumulative distribution function
//! - `norm_pdf`: φ, the probability density function
//!
//! Φ is evaluated through the complementary error function from `libm`,
//! which keeps full double precision in both tails. Φ(x) + Φ(−x) = 1 holds
//! to rounding, which is what makes put-call parity exact in the kernel.

use std::f64::consts::SQRT_2;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(−x/√2)
///
/// # Examples
/// ```
/// use greeks_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// Standard normal probability density function.
///
/// φ(x) = exp(−x²/2) / √(2π)
///
/// # Examples
/// ```
/// use greeks_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0) - 0.3989422804).abs() < 1e-10);
/// assert!((norm_pdf(1.0) - 0.2419707245).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0), 0.8413447460685429, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(-1.0), 0.15865525393145707, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(2.0), 0.9772498680518208, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(-2.0), 0.022750131948179195, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(3.0), 0.9986501019683699, epsilon = 1e-14);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_tails_stay_in_open_interval() {
        // erfc keeps the lower tail strictly positive well past |x| = 8
        let lower = norm_cdf(-12.0);
        assert!(lower > 0.0 && lower < 1e-30);

        let upper = norm_cdf(8.0);
        assert!(upper < 1.0 + f64::EPSILON && upper > 0.999_999);
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for pair in values.windows(2) {
            assert!(
                norm_cdf(pair[1]) > norm_cdf(pair[0]),
                "CDF not monotonic at x = {}",
                pair[0]
            );
        }
    }

    #[test]
    fn test_norm_pdf_symmetry_and_peak() {
        let peak = norm_pdf(0.0);
        assert_relative_eq!(peak, FRAC_1_SQRT_2PI, epsilon = 1e-15);
        for x in [0.5, 1.0, 2.0, 3.0] {
            assert_relative_eq!(norm_pdf(x), norm_pdf(-x), epsilon = 1e-15);
            assert!(norm_pdf(x) < peak);
        }
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        // Central difference of Φ recovers φ
        let h = 1e-5;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical, norm_pdf(x), epsilon = 1e-8);
        }
    }
}
