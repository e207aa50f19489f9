//! Column-oriented portfolio batches.
//!
//! Provides vectorised storage of positions for scenario evaluation.

use greeks_core::types::GreeksError;
use greeks_kernel::{OptionParameters, PayoffKind};

use super::ids::PositionId;
use super::position::Position;

/// Struct-of-arrays portfolio of live positions.
///
/// Expired positions are kept aside by identity only; they never enter
/// the kernel batch.
///
/// # Examples
///
/// ```
/// use greeks_kernel::{OptionPoint, PayoffKind};
/// use greeks_scenarios::portfolio::{Direction, Position, PositionBatch};
///
/// let inputs = OptionPoint {
///     spot: 100.0, strike: 100.0, time_to_expiry: 0.5,
///     volatility: 0.2, domestic_rate: 0.03, foreign_rate: 0.0,
/// };
/// let batch = PositionBatch::from_positions(vec![
///     Position::new("SPX", PayoffKind::Call, Direction::Buy, 10.0, inputs),
///     Position::new("SPX", PayoffKind::Put, Direction::Sell, 5.0, inputs),
/// ]).unwrap();
///
/// assert_eq!(batch.len(), 2);
/// assert_eq!(batch.puts().signed_notionals(), &[-5.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PositionBatch {
    ids: Vec<PositionId>,
    payoffs: Vec<PayoffKind>,
    signed_notionals: Vec<f64>,
    params: OptionParameters,
    expired: Vec<PositionId>,
}

/// Positions of a single payoff kind, in batch order.
#[derive(Debug, Clone)]
pub struct PayoffGroup {
    payoff: PayoffKind,
    ids: Vec<PositionId>,
    signed_notionals: Vec<f64>,
    params: OptionParameters,
}

impl PositionBatch {
    /// Builds a batch, validating every position before any is set aside.
    ///
    /// Expired positions are checked too, except for their time to expiry.
    ///
    /// # Errors
    /// `GreeksError::InvalidParameter` naming the field and the index of
    /// the position in `positions`.
    pub fn from_positions(positions: Vec<Position>) -> Result<Self, GreeksError> {
        for (i, p) in positions.iter().enumerate() {
            p.validate(i)?;
        }

        let (expired, live): (Vec<_>, Vec<_>) = positions.into_iter().partition(|p| p.expired);

        let points: Vec<_> = live.iter().map(|p| p.inputs).collect();
        let params = OptionParameters::from_points(&points)?;

        Ok(Self {
            ids: live.iter().map(|p| p.id.clone()).collect(),
            payoffs: live.iter().map(|p| p.payoff).collect(),
            signed_notionals: live.iter().map(Position::signed_notional).collect(),
            params,
            expired: expired.into_iter().map(|p| p.id).collect(),
        })
    }

    /// Number of live positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch holds no live position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identities of live positions.
    pub fn ids(&self) -> &[PositionId] {
        &self.ids
    }

    /// Payoff kinds of live positions.
    pub fn payoffs(&self) -> &[PayoffKind] {
        &self.payoffs
    }

    /// Signed notionals of live positions.
    pub fn signed_notionals(&self) -> &[f64] {
        &self.signed_notionals
    }

    /// Model inputs of live positions.
    pub fn params(&self) -> &OptionParameters {
        &self.params
    }

    /// Identities of expired positions.
    pub fn expired(&self) -> &[PositionId] {
        &self.expired
    }

    /// Call positions, in batch order.
    pub fn calls(&self) -> PayoffGroup {
        self.group(PayoffKind::Call)
    }

    /// Put positions, in batch order.
    pub fn puts(&self) -> PayoffGroup {
        self.group(PayoffKind::Put)
    }

    fn group(&self, payoff: PayoffKind) -> PayoffGroup {
        let indices: Vec<usize> = self
            .payoffs
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == payoff)
            .map(|(i, _)| i)
            .collect();

        PayoffGroup {
            payoff,
            ids: indices.iter().map(|&i| self.ids[i].clone()).collect(),
            signed_notionals: indices.iter().map(|&i| self.signed_notionals[i]).collect(),
            params: self.params.select(&indices),
        }
    }
}

impl PayoffGroup {
    /// Payoff kind shared by the group.
    pub fn payoff(&self) -> PayoffKind {
        self.payoff
    }

    /// Identities, in batch order.
    pub fn ids(&self) -> &[PositionId] {
        &self.ids
    }

    /// Signed notionals.
    pub fn signed_notionals(&self) -> &[f64] {
        &self.signed_notionals
    }

    /// Model inputs.
    pub fn params(&self) -> &OptionParameters {
        &self.params
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the group is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Direction;
    use greeks_kernel::OptionPoint;

    fn inputs(spot: f64) -> OptionPoint {
        OptionPoint {
            spot,
            strike: 100.0,
            time_to_expiry: 0.5,
            volatility: 0.2,
            domestic_rate: 0.03,
            foreign_rate: 0.01,
        }
    }

    fn mixed() -> Vec<Position> {
        vec![
            Position::new("A", PayoffKind::Put, Direction::Buy, 1.0, inputs(90.0)),
            Position::new("B", PayoffKind::Call, Direction::Sell, 2.0, inputs(95.0)),
            Position::new("C", PayoffKind::Put, Direction::Sell, 3.0, inputs(105.0)),
            Position::new("D", PayoffKind::Call, Direction::Buy, 4.0, inputs(110.0)),
        ]
    }

    #[test]
    fn test_split_preserves_order() {
        let batch = PositionBatch::from_positions(mixed()).unwrap();
        assert_eq!(batch.len(), 4);

        let calls = batch.calls();
        assert_eq!(calls.payoff(), PayoffKind::Call);
        assert_eq!(
            calls.ids(),
            &[PositionId::from("B-Call-Sell"), PositionId::from("D-Call-Buy")]
        );
        assert_eq!(calls.signed_notionals(), &[-2.0, 4.0]);
        assert_eq!(calls.params().spot(), &[95.0, 110.0]);

        let puts = batch.puts();
        assert_eq!(puts.signed_notionals(), &[1.0, -3.0]);
        assert_eq!(puts.params().spot(), &[90.0, 105.0]);
    }

    #[test]
    fn test_expired_positions_are_set_aside() {
        let mut positions = mixed();
        positions[1] = positions[1].clone().into_expired();

        let batch = PositionBatch::from_positions(positions).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.expired(), &[PositionId::from("B-Call-Sell")]);
        assert_eq!(batch.calls().len(), 1);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut positions = mixed();
        positions[2].inputs.volatility = 0.0;
        let err = PositionBatch::from_positions(positions).unwrap_err();
        assert_eq!(
            err,
            GreeksError::InvalidParameter {
                field: "volatility",
                index: 2,
                value: 0.0
            }
        );
    }

    #[test]
    fn test_error_index_counts_expired_positions() {
        let mut positions = mixed();
        positions[0] = positions[0].clone().into_expired();
        positions[2].inputs.spot = -5.0;

        let err = PositionBatch::from_positions(positions).unwrap_err();
        assert_eq!(
            err,
            GreeksError::InvalidParameter {
                field: "spot",
                index: 2,
                value: -5.0
            }
        );
    }

    #[test]
    fn test_expired_position_with_bad_inputs_rejected() {
        let mut positions = mixed();
        positions[1] = positions[1].clone().into_expired();
        positions[1].inputs.volatility = 0.0;

        assert!(matches!(
            PositionBatch::from_positions(positions),
            Err(GreeksError::InvalidParameter { field: "volatility", index: 1, .. })
        ));
    }

    #[test]
    fn test_negative_notional_rejected() {
        let mut positions = mixed();
        positions[3].notional = -4.0;

        assert_eq!(
            PositionBatch::from_positions(positions).unwrap_err(),
            GreeksError::InvalidParameter {
                field: "notional",
                index: 3,
                value: -4.0
            }
        );
    }

    #[test]
    fn test_single_payoff_batch_has_empty_other_group() {
        let positions = mixed()
            .into_iter()
            .filter(|p| p.payoff == PayoffKind::Call)
            .collect();
        let batch = PositionBatch::from_positions(positions).unwrap();
        assert!(batch.puts().is_empty());
        assert!(batch.puts().params().is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let batch = PositionBatch::from_positions(Vec::new()).unwrap();
        assert!(batch.is_empty());
        assert!(batch.calls().is_empty());
    }
}
