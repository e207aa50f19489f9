//! Spot-shock scenario analysis.
//!
//! This module provides:
//! - `ScenarioGrid`: ordered relative shocks and their column labels
//! - `generate_spot_interval`, `ShockMatrix`: shock × instrument spot broadcast
//! - `run_scenario`, `run_scenario_with`, `ScenarioRunner`: re-pricing across the grid
//! - `ScenarioTable`: positions × shocks results

mod engine;
mod grid;
mod spot;
mod table;

pub use engine::{run_scenario, run_scenario_with, ScenarioRunner};
pub use grid::{format_percent, ScenarioGrid, DEFAULT_SHOCKS};
pub use spot::{generate_spot_interval, ShockMatrix};
pub use table::{ScenarioRow, ScenarioTable};
