//! Payoff kinds supported by the closed-form kernel.

use greeks_core::types::GreeksError;
use std::fmt;
use std::str::FromStr;

/// Type of European option payoff.
///
/// # Variants
/// - `Call`: max(S − K, 0) at expiry
/// - `Put`: max(K − S, 0) at expiry
///
/// # Examples
/// ```
/// use greeks_kernel::PayoffKind;
///
/// assert_eq!("call".parse::<PayoffKind>().unwrap(), PayoffKind::Call);
/// assert_eq!(PayoffKind::Put.name(), "Put");
/// assert_eq!(PayoffKind::Put.sign(), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffKind {
    /// Call option
    Call,
    /// Put option
    Put,
}

impl PayoffKind {
    /// +1 for calls, −1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            PayoffKind::Call => 1.0,
            PayoffKind::Put => -1.0,
        }
    }

    /// Name used in position identities.
    pub fn name(&self) -> &'static str {
        match self {
            PayoffKind::Call => "Call",
            PayoffKind::Put => "Put",
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffKind::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffKind::Put)
    }
}

impl fmt::Display for PayoffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PayoffKind {
    type Err = GreeksError;

    /// Parses "Call"/"Put" case-insensitively, also "C"/"P".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(PayoffKind::Call),
            "put" | "p" => Ok(PayoffKind::Put),
            _ => Err(GreeksError::InvalidConvention(format!(
                "unknown payoff kind '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payoff_kind() {
        assert_eq!("Call".parse::<PayoffKind>().unwrap(), PayoffKind::Call);
        assert_eq!(" PUT ".parse::<PayoffKind>().unwrap(), PayoffKind::Put);
        assert_eq!("p".parse::<PayoffKind>().unwrap(), PayoffKind::Put);
        assert!("straddle".parse::<PayoffKind>().is_err());
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(PayoffKind::Call.to_string(), "Call");
        assert_eq!(PayoffKind::Put.to_string(), "Put");
    }

    #[test]
    fn test_predicates_and_sign() {
        assert!(PayoffKind::Call.is_call());
        assert!(!PayoffKind::Call.is_put());
        assert_eq!(PayoffKind::Call.sign(), 1.0);
        assert!(PayoffKind::Put.is_put());
    }
}
