//! Greek selectors and kernel conventions.

use greeks_core::types::{GreeksError, RhoConvention, TimeDecayBasis};
use std::fmt;
use std::str::FromStr;

/// Quantity produced by the closed-form kernel.
///
/// # Examples
/// ```
/// use greeks_kernel::Greek;
///
/// assert_eq!(Greek::Gamma.label(), "Gamma");
/// assert_eq!("vega".parse::<Greek>().unwrap(), Greek::Vega);
/// assert_eq!(Greek::ALL.len(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Greek {
    /// Option premium per unit of underlying
    Price,
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// Time decay per `TimeDecayBasis` period
    Theta,
    /// ∂V/∂v per volatility point
    Vega,
    /// Rate sensitivity per rate point, see `RhoConvention`
    Rho,
}

impl Greek {
    /// Every Greek, in reporting order.
    pub const ALL: [Greek; 6] = [
        Greek::Price,
        Greek::Delta,
        Greek::Gamma,
        Greek::Theta,
        Greek::Vega,
        Greek::Rho,
    ];

    /// Human-readable label used as the scenario column prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Greek::Price => "Price",
            Greek::Delta => "Delta",
            Greek::Gamma => "Gamma",
            Greek::Theta => "Theta",
            Greek::Vega => "Vega",
            Greek::Rho => "Rho",
        }
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Greek {
    type Err = GreeksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Greek::ALL
            .iter()
            .copied()
            .find(|g| g.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GreeksError::InvalidConvention(format!("unknown greek '{}'", s)))
    }
}

/// Conventions applied by the kernel when a formula needs one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelConventions {
    /// Divisor turning annual theta into per-period theta
    pub time_decay_basis: TimeDecayBasis,
    /// Whether rho is quoted or carries the ∂V/∂r time factor
    #[cfg_attr(feature = "serde", serde(default))]
    pub rho_convention: RhoConvention,
}

impl KernelConventions {
    /// Creates conventions with the given theta basis and quoted rho.
    pub fn new(time_decay_basis: TimeDecayBasis) -> Self {
        Self {
            time_decay_basis,
            rho_convention: RhoConvention::default(),
        }
    }

    /// Replaces the rho convention.
    pub fn with_rho_convention(mut self, rho_convention: RhoConvention) -> Self {
        self.rho_convention = rho_convention;
        self
    }
}

/// Every per-unit quantity for one batch and payoff kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreekSet {
    /// Premium
    pub price: Vec<f64>,
    /// Delta
    pub delta: Vec<f64>,
    /// Gamma
    pub gamma: Vec<f64>,
    /// Theta per basis period
    pub theta: Vec<f64>,
    /// Vega per volatility point
    pub vega: Vec<f64>,
    /// Rho per rate point
    pub rho: Vec<f64>,
}

impl GreekSet {
    /// Returns the values of one Greek.
    pub fn get(&self, greek: Greek) -> &[f64] {
        match greek {
            Greek::Price => &self.price,
            Greek::Delta => &self.delta,
            Greek::Gamma => &self.gamma,
            Greek::Theta => &self.theta,
            Greek::Vega => &self.vega,
            Greek::Rho => &self.rho,
        }
    }

    /// Number of instruments covered.
    pub fn len(&self) -> usize {
        self.price.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_labels_round_trip_through_parse() {
        for greek in Greek::ALL {
            assert_eq!(greek.label().parse::<Greek>().unwrap(), greek);
            assert_eq!(greek.to_string(), greek.label());
        }
        assert_eq!(" RHO ".parse::<Greek>().unwrap(), Greek::Rho);
        assert!("vanna".parse::<Greek>().is_err());
    }

    #[test]
    fn test_default_conventions_use_trading_days() {
        let conventions = KernelConventions::default();
        assert_eq!(conventions.time_decay_basis, TimeDecayBasis::TradingDays);
        assert_eq!(conventions.time_decay_basis.divisor(), 252.0);
        assert_eq!(conventions.rho_convention, RhoConvention::Quoted);
        assert_eq!(
            KernelConventions::new(TimeDecayBasis::Annual).time_decay_basis,
            TimeDecayBasis::Annual
        );
    }

    #[test]
    fn test_with_rho_convention_keeps_basis() {
        let conventions = KernelConventions::new(TimeDecayBasis::CalendarDays)
            .with_rho_convention(RhoConvention::Derivative);
        assert_eq!(conventions.time_decay_basis, TimeDecayBasis::CalendarDays);
        assert_eq!(conventions.rho_convention, RhoConvention::Derivative);
    }

    #[test]
    fn test_greek_set_get() {
        let set = GreekSet {
            price: vec![1.0],
            delta: vec![2.0],
            gamma: vec![3.0],
            theta: vec![4.0],
            vega: vec![5.0],
            rho: vec![6.0],
        };
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(Greek::Theta), &[4.0]);
        assert_eq!(set.get(Greek::Rho), &[6.0]);
    }
}
