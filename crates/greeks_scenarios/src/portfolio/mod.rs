//! Positions and portfolio batches.
//!
//! This module provides:
//! - `PositionId`: canonical position identity
//! - `Direction`, `Position`: a single position in model units
//! - `PositionBatch`, `PayoffGroup`: struct-of-arrays portfolio split by payoff

mod batch;
mod ids;
mod position;

pub use batch::{PayoffGroup, PositionBatch};
pub use ids::PositionId;
pub use position::{Direction, Position};
