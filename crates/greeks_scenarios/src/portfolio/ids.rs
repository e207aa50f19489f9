//! Position identity.

use greeks_kernel::PayoffKind;
use std::fmt;

use super::position::Direction;

/// Identity of a position: `"<instrument>-<Call|Put>-<Buy|Sell>"`.
///
/// Scenario tables are keyed and sorted by this identity.
///
/// # Examples
///
/// ```
/// use greeks_kernel::PayoffKind;
/// use greeks_scenarios::portfolio::{Direction, PositionId};
///
/// let id = PositionId::compose("EURUSD", PayoffKind::Call, Direction::Sell);
/// assert_eq!(id.as_str(), "EURUSD-Call-Sell");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct PositionId(String);

impl PositionId {
    /// Creates an identity from an arbitrary string.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the canonical identity of a position.
    pub fn compose(instrument: &str, payoff: PayoffKind, direction: Direction) -> Self {
        Self(format!(
            "{}-{}-{}",
            instrument.trim(),
            payoff.name(),
            direction.name()
        ))
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PositionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PositionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_trims_instrument() {
        let id = PositionId::compose("  USDBRL ", PayoffKind::Put, Direction::Buy);
        assert_eq!(id.to_string(), "USDBRL-Put-Buy");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = PositionId::from("AUDUSD-Put-Buy");
        let b = PositionId::from("EURUSD-Call-Buy");
        let c = PositionId::from("EURUSD-Call-Sell");
        let mut ids = vec![c.clone(), a.clone(), b.clone()];
        ids.sort();
        assert_eq!(ids, vec![a, b, c]);
    }
}
