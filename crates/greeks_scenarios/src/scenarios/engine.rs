//! Scenario execution engine.
//!
//! For each payoff group of a [`PositionBatch`], every shock row of the
//! spot interval is re-priced through the kernel and the result is
//! transposed to positions × shocks. Calls and puts are evaluated
//! independently and merged by identity.

use greeks_core::types::GreeksError;
use greeks_kernel::analytical::dollar_greek;
use greeks_kernel::{Greek, KernelConventions, OptionParameters, PayoffKind};
use std::collections::BTreeMap;
use std::io::Read;

use super::grid::ScenarioGrid;
use super::spot::generate_spot_interval;
use super::table::ScenarioTable;
use crate::config::ScenarioConfig;
use crate::error::ScenarioResult;
use crate::ingest::load_batch_csv;
use crate::portfolio::{PayoffGroup, PositionBatch, PositionId};

/// Runs one dollar-scaled Greek across the grid.
///
/// # Errors
/// Propagates kernel validation failures, e.g. a shocked spot that is not
/// positive.
///
/// # Examples
///
/// ```
/// use greeks_kernel::{Greek, KernelConventions, OptionPoint, PayoffKind};
/// use greeks_scenarios::portfolio::{Direction, Position, PositionBatch};
/// use greeks_scenarios::scenarios::{run_scenario, ScenarioGrid};
///
/// let inputs = OptionPoint {
///     spot: 100.0, strike: 100.0, time_to_expiry: 0.5,
///     volatility: 0.2, domestic_rate: 0.03, foreign_rate: 0.0,
/// };
/// let batch = PositionBatch::from_positions(vec![
///     Position::new("SPX", PayoffKind::Call, Direction::Buy, 1_000.0, inputs),
/// ]).unwrap();
///
/// let grid = ScenarioGrid::new(vec![-0.05, 0.0, 0.05]).unwrap();
/// let table = run_scenario(&batch, &grid, Greek::Delta, &KernelConventions::default()).unwrap();
///
/// let row = &table.rows()[0].values;
/// assert!(row[0] < row[1] && row[1] < row[2]);
/// assert_eq!(table.columns()[2], "Delta +5%");
/// ```
pub fn run_scenario(
    batch: &PositionBatch,
    grid: &ScenarioGrid,
    greek: Greek,
    conventions: &KernelConventions,
) -> Result<ScenarioTable, GreeksError> {
    run_scenario_with(batch, grid, greek.label(), |payoff, notionals, params| {
        dollar_greek(notionals, params, payoff, greek, conventions)
    })
}

/// Runs a caller-supplied exposure function across the grid.
///
/// `f(payoff, signed_notionals, shocked_params)` must return one value per
/// instrument of `shocked_params`.
///
/// # Errors
/// - Any error returned by `f`
/// - `GreeksError::ShapeMismatch` if `f` returns the wrong number of values
/// - `GreeksError::InvalidParameter` if a shocked spot is not positive
pub fn run_scenario_with<F>(
    batch: &PositionBatch,
    grid: &ScenarioGrid,
    label: &str,
    f: F,
) -> Result<ScenarioTable, GreeksError>
where
    F: Fn(PayoffKind, &[f64], &OptionParameters) -> Result<Vec<f64>, GreeksError> + Sync,
{
    tracing::debug!(
        label,
        positions = batch.len(),
        expired = batch.expired().len(),
        shocks = grid.len(),
        "running scenario"
    );

    let mut rows: BTreeMap<PositionId, Vec<f64>> = BTreeMap::new();

    for group in [batch.calls(), batch.puts()] {
        if group.is_empty() {
            continue;
        }
        let per_shock = evaluate_group(&group, grid, &f)?;

        for (j, id) in group.ids().iter().enumerate() {
            let values: Vec<f64> = per_shock.iter().map(|row| row[j]).collect();
            merge_row(&mut rows, id, values);
        }
    }

    for id in batch.expired() {
        tracing::debug!(position = %id, label, "expired position reported as zero row");
        merge_row(&mut rows, id, vec![0.0; grid.len()]);
    }

    Ok(ScenarioTable::from_map(
        label,
        grid.labels(label),
        grid.shocks().to_vec(),
        rows,
    ))
}

fn merge_row(rows: &mut BTreeMap<PositionId, Vec<f64>>, id: &PositionId, values: Vec<f64>) {
    match rows.get_mut(id) {
        Some(existing) => {
            tracing::warn!(position = %id, "duplicate position identity; exposures summed");
            for (acc, v) in existing.iter_mut().zip(values) {
                *acc += v;
            }
        }
        None => {
            rows.insert(id.clone(), values);
        }
    }
}

/// Evaluates every shock row of one payoff group, in shock order.
fn evaluate_group<F>(
    group: &PayoffGroup,
    grid: &ScenarioGrid,
    f: &F,
) -> Result<Vec<Vec<f64>>, GreeksError>
where
    F: Fn(PayoffKind, &[f64], &OptionParameters) -> Result<Vec<f64>, GreeksError> + Sync,
{
    let matrix = generate_spot_interval(group.params().spot(), grid.shocks());
    let n = group.len();

    let eval_row = |i: usize| -> Result<Vec<f64>, GreeksError> {
        let shocked = group.params().with_spots(matrix.row(i))?;
        let values = f(group.payoff(), group.signed_notionals(), &shocked)?;
        if values.len() != n {
            return Err(GreeksError::shape_mismatch("scenario row", n, values.len()));
        }
        Ok(values)
    };

    #[cfg(feature = "parallel")]
    let rows = {
        use rayon::prelude::*;
        (0..grid.len()).into_par_iter().map(eval_row).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let rows = (0..grid.len()).map(eval_row).collect();

    rows
}

/// Produces scenario tables under one [`ScenarioConfig`].
///
/// # Examples
///
/// ```
/// use greeks_kernel::Greek;
/// use greeks_scenarios::config::ScenarioConfig;
/// use greeks_scenarios::scenarios::ScenarioRunner;
///
/// let csv = "instrument,call_put,direction,spot,strike,tenor,vol,r_d,r_f,notional\n\
///            EURUSD,Call,Buy,1.10,1.10,90,8,0.05,0.035,1000000\n";
///
/// let runner = ScenarioRunner::new(ScenarioConfig::default()).unwrap();
/// let batch = runner.load_batch(csv.as_bytes()).unwrap();
/// let tables = runner.run_all(&batch).unwrap();
///
/// assert_eq!(tables.len(), Greek::ALL.len());
/// assert_eq!(tables[1].label(), "Delta");
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ScenarioConfig,
    grid: ScenarioGrid,
}

impl ScenarioRunner {
    /// Creates a runner from a configuration.
    ///
    /// # Errors
    /// `ConfigError::Validation` if the configuration is invalid.
    pub fn new(config: ScenarioConfig) -> ScenarioResult<Self> {
        config.validate()?;
        let grid = config.grid()?;
        Ok(Self { config, grid })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// The shock grid in use.
    pub fn grid(&self) -> &ScenarioGrid {
        &self.grid
    }

    /// Reads positions from CSV under the configured ingestion conventions.
    pub fn load_batch<R: Read>(&self, reader: R) -> ScenarioResult<PositionBatch> {
        load_batch_csv(reader, &self.config.ingest_conventions())
    }

    /// Runs one Greek.
    pub fn run(&self, batch: &PositionBatch, greek: Greek) -> ScenarioResult<ScenarioTable> {
        Ok(run_scenario(
            batch,
            &self.grid,
            greek,
            &self.config.kernel_conventions(),
        )?)
    }

    /// Runs every Greek, in [`Greek::ALL`] order.
    pub fn run_all(&self, batch: &PositionBatch) -> ScenarioResult<Vec<ScenarioTable>> {
        Greek::ALL.iter().map(|g| self.run(batch, *g)).collect()
    }

    /// Runs one Greek and rounds to the configured display precision.
    pub fn run_for_display(
        &self,
        batch: &PositionBatch,
        greek: Greek,
    ) -> ScenarioResult<ScenarioTable> {
        Ok(self.run(batch, greek)?.rounded(self.config.display_precision))
    }
}
