//! Scenario result tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::MAX_DISPLAY_PRECISION;
use crate::portfolio::PositionId;

/// One position's exposure across every scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    /// Position identity
    pub id: PositionId,
    /// One value per scenario column
    pub values: Vec<f64>,
}

/// Instruments × shocks exposure table for one Greek.
///
/// Rows are sorted by position identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTable {
    label: String,
    columns: Vec<String>,
    shocks: Vec<f64>,
    rows: Vec<ScenarioRow>,
}

impl ScenarioTable {
    pub(crate) fn from_map(
        label: &str,
        columns: Vec<String>,
        shocks: Vec<f64>,
        rows: BTreeMap<PositionId, Vec<f64>>,
    ) -> Self {
        Self {
            label: label.to_string(),
            columns,
            shocks,
            rows: rows
                .into_iter()
                .map(|(id, values)| ScenarioRow { id, values })
                .collect(),
        }
    }

    /// Greek label, e.g. `"Delta"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column labels, e.g. `"Delta -10%"`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Shocks behind each column.
    pub fn shocks(&self) -> &[f64] {
        &self.shocks
    }

    /// Rows sorted by identity.
    pub fn rows(&self) -> &[ScenarioRow] {
        &self.rows
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one position.
    pub fn row(&self, id: &PositionId) -> Option<&[f64]> {
        self.rows
            .binary_search_by(|r| r.id.cmp(id))
            .ok()
            .map(|i| self.rows[i].values.as_slice())
    }

    /// Portfolio aggregate per scenario column.
    pub fn column_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.columns.len()];
        for row in &self.rows {
            for (total, value) in totals.iter_mut().zip(&row.values) {
                *total += value;
            }
        }
        totals
    }

    /// Copy rounded to `decimals` places for display.
    ///
    /// `decimals` is capped at [`MAX_DISPLAY_PRECISION`].
    pub fn rounded(&self, decimals: u32) -> Self {
        let decimals = decimals.min(MAX_DISPLAY_PRECISION);
        let factor = 10f64.powi(decimals as i32);
        let round = |v: f64| {
            let r = (v * factor).round() / factor;
            // Normalise -0.0
            if r == 0.0 {
                0.0
            } else {
                r
            }
        };

        Self {
            rows: self
                .rows
                .iter()
                .map(|row| ScenarioRow {
                    id: row.id.clone(),
                    values: row.values.iter().map(|v| round(*v)).collect(),
                })
                .collect(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ScenarioTable {
        let mut rows = BTreeMap::new();
        rows.insert(PositionId::from("B-Put-Buy"), vec![1.25, -0.004]);
        rows.insert(PositionId::from("A-Call-Sell"), vec![-10.5, 2.0]);
        ScenarioTable::from_map(
            "Delta",
            vec!["Delta -1%".to_string(), "Delta +1%".to_string()],
            vec![-0.01, 0.01],
            rows,
        )
    }

    #[test]
    fn test_rows_sorted_by_identity() {
        let t = table();
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[0].id.as_str(), "A-Call-Sell");
        assert_eq!(t.label(), "Delta");
    }

    #[test]
    fn test_row_lookup() {
        let t = table();
        assert_eq!(t.row(&PositionId::from("B-Put-Buy")), Some(&[1.25, -0.004][..]));
        assert_eq!(t.row(&PositionId::from("C-Put-Buy")), None);
    }

    #[test]
    fn test_column_totals() {
        assert_eq!(table().column_totals(), vec![-9.25, 1.996]);
    }

    #[test]
    fn test_rounded_keeps_labels_and_clears_negative_zero() {
        let r = table().rounded(1);
        assert_eq!(r.columns(), table().columns());
        assert_eq!(r.row(&PositionId::from("B-Put-Buy")), Some(&[1.3, 0.0][..]));
        assert!(r.rows()[1].values[1].is_sign_positive());
    }

    #[test]
    fn test_rounded_caps_precision() {
        let capped = table().rounded(400);
        assert_eq!(capped, table().rounded(MAX_DISPLAY_PRECISION));
        assert!(capped
            .rows()
            .iter()
            .flat_map(|r| r.values.iter())
            .all(|v| v.is_finite()));
    }

    #[test]
    fn test_serialises_to_json() {
        let json = serde_json::to_string(&table()).unwrap();
        assert!(json.contains("\"A-Call-Sell\""));
        let back: ScenarioTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table());
    }
}
