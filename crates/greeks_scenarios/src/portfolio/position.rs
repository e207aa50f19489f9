//! Single positions before batching.

use greeks_core::types::GreeksError;
use greeks_kernel::{OptionPoint, PayoffKind};
use std::fmt;
use std::str::FromStr;

use super::ids::PositionId;

/// Side of a position.
///
/// # Examples
///
/// ```
/// use greeks_scenarios::portfolio::Direction;
///
/// assert_eq!("sell".parse::<Direction>().unwrap().sign(), -1.0);
/// assert_eq!("B".parse::<Direction>().unwrap(), Direction::Buy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Long the option
    Buy,
    /// Short the option
    Sell,
}

impl Direction {
    /// +1 for Buy, −1 for Sell.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }

    /// Name used in position identities.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Buy => "Buy",
            Direction::Sell => "Sell",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Direction {
    type Err = GreeksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "b" => Ok(Direction::Buy),
            "sell" | "s" => Ok(Direction::Sell),
            _ => Err(GreeksError::InvalidConvention(format!(
                "unknown direction '{}'",
                s
            ))),
        }
    }
}

/// One option position in model units.
///
/// `inputs.time_to_expiry` is zero for a clamped expired position; such
/// positions never reach the kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Identity
    pub id: PositionId,
    /// Call or put
    pub payoff: PayoffKind,
    /// Buy or sell
    pub direction: Direction,
    /// Unsigned notional as quoted
    pub notional: f64,
    /// Model inputs (decimals, years)
    pub inputs: OptionPoint,
    /// Whether the position has no time left
    pub expired: bool,
}

impl Position {
    /// Creates a live position and derives its identity.
    pub fn new(
        instrument: &str,
        payoff: PayoffKind,
        direction: Direction,
        notional: f64,
        inputs: OptionPoint,
    ) -> Self {
        Self {
            id: PositionId::compose(instrument, payoff, direction),
            payoff,
            direction,
            notional,
            inputs,
            expired: false,
        }
    }

    /// Marks the position as expired.
    pub fn into_expired(mut self) -> Self {
        self.expired = true;
        self.inputs.time_to_expiry = 0.0;
        self
    }

    /// Notional with the direction's sign applied.
    #[inline]
    pub fn signed_notional(&self) -> f64 {
        self.notional * self.direction.sign()
    }

    /// Checks the inputs that must hold whether or not the position expired:
    /// positive finite S, K and v, finite rates, a finite non-negative notional.
    ///
    /// # Errors
    /// `GreeksError::InvalidParameter` naming the first bad field at `index`.
    pub fn check_market_inputs(&self, index: usize) -> Result<(), GreeksError> {
        let p = &self.inputs;
        let positive = [
            ("spot", p.spot),
            ("strike", p.strike),
            ("volatility", p.volatility),
        ];
        let finite = [
            ("domestic_rate", p.domestic_rate),
            ("foreign_rate", p.foreign_rate),
        ];

        let bad = positive
            .into_iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
            .or_else(|| finite.into_iter().find(|(_, v)| !v.is_finite()))
            .or_else(|| {
                let n = self.notional;
                (!(n.is_finite() && n >= 0.0)).then_some(("notional", n))
            });

        match bad {
            Some((field, value)) => Err(GreeksError::InvalidParameter { field, index, value }),
            None => Ok(()),
        }
    }

    /// Full validation at `index`: market inputs, plus a positive finite
    /// time to expiry for a live position.
    ///
    /// # Errors
    /// `GreeksError::InvalidParameter` naming the first bad field at `index`.
    pub fn validate(&self, index: usize) -> Result<(), GreeksError> {
        self.check_market_inputs(index)?;
        let t = self.inputs.time_to_expiry;
        if !self.expired && !(t.is_finite() && t > 0.0) {
            return Err(GreeksError::InvalidParameter {
                field: "time_to_expiry",
                index,
                value: t,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> OptionPoint {
        OptionPoint {
            spot: 5.0,
            strike: 5.1,
            time_to_expiry: 0.25,
            volatility: 0.15,
            domestic_rate: 0.1,
            foreign_rate: 0.05,
        }
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("Buy".parse::<Direction>().unwrap(), Direction::Buy);
        assert_eq!(" SELL".parse::<Direction>().unwrap(), Direction::Sell);
        assert_eq!("s".parse::<Direction>().unwrap(), Direction::Sell);
        assert!("hold".parse::<Direction>().is_err());
    }

    #[test]
    fn test_signed_notional() {
        let long = Position::new("USDBRL", PayoffKind::Call, Direction::Buy, 1e6, inputs());
        let short = Position::new("USDBRL", PayoffKind::Call, Direction::Sell, 5e7, inputs());
        assert_eq!(long.signed_notional(), 1e6);
        assert_eq!(short.signed_notional(), -5e7);
        assert_eq!(short.id.as_str(), "USDBRL-Call-Sell");
    }

    #[test]
    fn test_validate_names_first_bad_field() {
        let mut pos = Position::new("X", PayoffKind::Call, Direction::Buy, 1.0, inputs());
        assert!(pos.validate(0).is_ok());

        pos.inputs.strike = f64::NAN;
        pos.inputs.volatility = 0.0;
        match pos.validate(4) {
            Err(GreeksError::InvalidParameter { field, index, value }) => {
                assert_eq!(field, "strike");
                assert_eq!(index, 4);
                assert!(value.is_nan());
            }
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_notional() {
        let pos = Position::new("X", PayoffKind::Put, Direction::Sell, -2.0, inputs());
        assert_eq!(
            pos.validate(1),
            Err(GreeksError::InvalidParameter {
                field: "notional",
                index: 1,
                value: -2.0
            })
        );
    }

    #[test]
    fn test_expired_position_still_checks_market_inputs() {
        let mut pos = Position::new("X", PayoffKind::Put, Direction::Buy, 1.0, inputs()).into_expired();
        assert!(pos.validate(0).is_ok());

        pos.inputs.spot = -5.0;
        assert_eq!(
            pos.validate(0),
            Err(GreeksError::InvalidParameter {
                field: "spot",
                index: 0,
                value: -5.0
            })
        );
    }

    #[test]
    fn test_live_position_needs_time_left() {
        let mut pos = Position::new("X", PayoffKind::Call, Direction::Buy, 1.0, inputs());
        pos.inputs.time_to_expiry = 0.0;
        assert!(matches!(
            pos.validate(3),
            Err(GreeksError::InvalidParameter { field: "time_to_expiry", index: 3, .. })
        ));
    }

    #[test]
    fn test_into_expired_zeroes_time() {
        let pos = Position::new("X", PayoffKind::Put, Direction::Buy, 1.0, inputs()).into_expired();
        assert!(pos.expired);
        assert_eq!(pos.inputs.time_to_expiry, 0.0);
    }
}
