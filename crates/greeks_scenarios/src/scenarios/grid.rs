//! Relative spot-shock grids.

use greeks_core::types::{GreeksError, PERCENT_POINT};

/// Shocks applied when no grid is configured.
pub const DEFAULT_SHOCKS: [f64; 11] = [
    -0.10, -0.07, -0.05, -0.02, -0.01, 0.0, 0.01, 0.02, 0.05, 0.07, 0.10,
];

/// Ordered relative spot shocks, as decimals.
///
/// An empty shock list is normalised to the unshocked scenario `[0.0]`.
///
/// # Examples
///
/// ```
/// use greeks_scenarios::scenarios::ScenarioGrid;
///
/// let grid = ScenarioGrid::new(vec![-0.1, 0.0, 0.025]).unwrap();
/// assert_eq!(grid.labels("Delta"), vec!["Delta -10%", "Delta 0%", "Delta +2.5%"]);
///
/// assert_eq!(ScenarioGrid::new(vec![]).unwrap().shocks(), &[0.0]);
/// assert!(ScenarioGrid::new(vec![-1.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioGrid {
    shocks: Vec<f64>,
}

impl ScenarioGrid {
    /// Creates a grid.
    ///
    /// # Errors
    /// `GreeksError::InvalidParameter` for a non-finite shock or one at or
    /// below −100%.
    pub fn new(shocks: Vec<f64>) -> Result<Self, GreeksError> {
        if let Some(index) = shocks.iter().position(|s| !(s.is_finite() && *s > -1.0)) {
            return Err(GreeksError::InvalidParameter {
                field: "shock",
                index,
                value: shocks[index],
            });
        }

        if shocks.is_empty() {
            return Ok(Self { shocks: vec![0.0] });
        }
        Ok(Self { shocks })
    }

    /// Shocks in grid order.
    pub fn shocks(&self) -> &[f64] {
        &self.shocks
    }

    /// Number of scenarios (at least one).
    pub fn len(&self) -> usize {
        self.shocks.len()
    }

    /// Always false: an empty grid is normalised to `[0.0]`.
    pub fn is_empty(&self) -> bool {
        self.shocks.is_empty()
    }

    /// Column labels `"<prefix> <signed percent>"`.
    pub fn labels(&self, prefix: &str) -> Vec<String> {
        self.shocks
            .iter()
            .map(|s| format!("{} {}", prefix, format_percent(*s)))
            .collect()
    }
}

impl Default for ScenarioGrid {
    fn default() -> Self {
        Self {
            shocks: DEFAULT_SHOCKS.to_vec(),
        }
    }
}

/// Formats a decimal shock as a signed percentage: `-10%`, `0%`, `+2.5%`.
pub fn format_percent(shock: f64) -> String {
    // Drop float noise such as 0.07 * 100 = 7.000000000000001
    let pct = (shock * PERCENT_POINT * 1e6).round() / 1e6;
    if pct == 0.0 {
        "0%".to_string()
    } else if pct > 0.0 {
        format!("+{}%", pct)
    } else {
        format!("{}%", pct)
    }
}
