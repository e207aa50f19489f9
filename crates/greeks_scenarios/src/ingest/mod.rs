//! Position input contract and CSV reader.
//!
//! Every input row carries the columns in [`REQUIRED_COLUMNS`]. Quotes are
//! converted to model units on the way in: tenors in days become year
//! fractions under a [`DayCountBasis`], volatilities in percent become
//! decimals, and the unsigned notional takes its sign from the direction.
//!
//! Headers are checked before any row is parsed, so a file missing several
//! columns fails once with all of them listed.

use greeks_core::types::{percent_to_decimal, DayCountBasis, Expiry, GreeksError};
use greeks_kernel::{OptionPoint, PayoffKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::error::ScenarioResult;
use crate::portfolio::{Direction, Position, PositionBatch};

/// Columns every position input must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "instrument",
    "call_put",
    "direction",
    "spot",
    "strike",
    "tenor",
    "vol",
    "r_d",
    "r_f",
    "notional",
];

/// Handling of positions whose tenor is zero or negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiredPolicy {
    /// Keep the position as an all-zero scenario row
    #[default]
    Clamp,
    /// Fail with `GreeksError::ExpiredInstrument`
    Reject,
}

impl ExpiredPolicy {
    /// Short name used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            ExpiredPolicy::Clamp => "clamp",
            ExpiredPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for ExpiredPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExpiredPolicy {
    type Err = GreeksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clamp" => Ok(ExpiredPolicy::Clamp),
            "reject" => Ok(ExpiredPolicy::Reject),
            _ => Err(GreeksError::InvalidConvention(format!(
                "unknown expired policy '{}'",
                s
            ))),
        }
    }
}

/// Conventions applied while converting records to positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestConventions {
    /// Basis turning tenor days into years
    pub day_count: DayCountBasis,
    /// What to do with expired positions
    pub expired_policy: ExpiredPolicy,
}

/// One input row as quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Underlying / instrument name
    pub instrument: String,
    /// "Call" or "Put"
    pub call_put: String,
    /// "Buy" or "Sell"
    pub direction: String,
    /// Spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Days to expiry
    pub tenor: f64,
    /// Volatility in percent
    pub vol: f64,
    /// Domestic rate, decimal
    pub r_d: f64,
    /// Foreign rate / dividend yield, decimal
    pub r_f: f64,
    /// Unsigned notional
    pub notional: f64,
}

impl PositionRecord {
    /// Converts the record to a position in model units.
    ///
    /// # Errors
    /// - `GreeksError::InvalidConvention` for an unknown call/put or direction
    /// - `GreeksError::InvalidParameter` for a non-finite tenor, a bad spot,
    ///   strike, volatility or rate, or a negative or non-finite notional,
    ///   expired or not (index 0; [`build_batch`] reports the row)
    /// - `GreeksError::ExpiredInstrument` for tenor ≤ 0 under
    ///   [`ExpiredPolicy::Reject`]
    pub fn into_position(&self, conventions: &IngestConventions) -> Result<Position, GreeksError> {
        let payoff: PayoffKind = self.call_put.parse()?;
        let direction: Direction = self.direction.parse()?;

        if !self.tenor.is_finite() {
            return Err(GreeksError::InvalidParameter {
                field: "tenor",
                index: 0,
                value: self.tenor,
            });
        }

        let expiry = Expiry::from_tenor_days(self.tenor, conventions.day_count);
        let inputs = OptionPoint {
            spot: self.spot,
            strike: self.strike,
            time_to_expiry: expiry.year_fraction().unwrap_or(0.0),
            volatility: percent_to_decimal(self.vol),
            domestic_rate: self.r_d,
            foreign_rate: self.r_f,
        };
        let position = Position::new(&self.instrument, payoff, direction, self.notional, inputs);
        position.check_market_inputs(0)?;

        match expiry {
            Expiry::Live(_) => Ok(position),
            Expiry::Expired { days } => match conventions.expired_policy {
                ExpiredPolicy::Clamp => {
                    tracing::warn!(
                        position = %position.id,
                        days,
                        "expired position clamped to zero exposure"
                    );
                    Ok(position.into_expired())
                }
                ExpiredPolicy::Reject => Err(GreeksError::ExpiredInstrument {
                    identity: position.id.to_string(),
                    days,
                }),
            },
        }
    }
}

/// Returns the required columns absent from `headers`, in contract order.
pub fn missing_columns<'a, I>(headers: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !present.contains(required))
        .collect()
}

/// Reads position records from CSV.
///
/// # Errors
/// - `GreeksError::MissingColumn` listing every absent required column,
///   raised before any row is read
/// - `csv::Error` for a row that cannot be parsed
pub fn read_positions_csv<R: Read>(reader: R) -> ScenarioResult<Vec<PositionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let missing = missing_columns(reader.headers()?.iter());
    if !missing.is_empty() {
        return Err(GreeksError::missing_columns(missing).into());
    }

    let records = reader
        .deserialize::<PositionRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(rows = records.len(), "read position records");
    Ok(records)
}

/// Converts records into a validated batch.
///
/// Positions keep record order, so every `InvalidParameter` index is the
/// input row.
///
/// # Errors
/// Any error of [`PositionRecord::into_position`] or
/// [`PositionBatch::from_positions`].
pub fn build_batch(
    records: &[PositionRecord],
    conventions: &IngestConventions,
) -> Result<PositionBatch, GreeksError> {
    let positions = records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            record
                .into_position(conventions)
                .map_err(|e| at_row(e, row))
        })
        .collect::<Result<Vec<_>, _>>()?;

    PositionBatch::from_positions(positions)
}

/// Reads CSV and builds the batch in one step.
pub fn load_batch_csv<R: Read>(
    reader: R,
    conventions: &IngestConventions,
) -> ScenarioResult<PositionBatch> {
    let records = read_positions_csv(reader)?;
    Ok(build_batch(&records, conventions)?)
}

fn at_row(err: GreeksError, row: usize) -> GreeksError {
    match err {
        GreeksError::InvalidParameter { field, value, .. } => GreeksError::InvalidParameter {
            field,
            index: row,
            value,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScenarioError;
    use approx::assert_relative_eq;

    const HEADER: &str = "instrument,call_put,direction,spot,strike,tenor,vol,r_d,r_f,notional";

    fn record(tenor: f64) -> PositionRecord {
        PositionRecord {
            instrument: "USDBRL".to_string(),
            call_put: "Call".to_string(),
            direction: "Sell".to_string(),
            spot: 5.0,
            strike: 5.2,
            tenor,
            vol: 15.0,
            r_d: 0.1,
            r_f: 0.05,
            notional: 1_000_000.0,
        }
    }

    #[test]
    fn test_into_position_converts_units() {
        let pos = record(73.0).into_position(&IngestConventions::default()).unwrap();
        assert_eq!(pos.id.as_str(), "USDBRL-Call-Sell");
        assert_relative_eq!(pos.inputs.time_to_expiry, 0.2);
        assert_relative_eq!(pos.inputs.volatility, 0.15);
        assert_eq!(pos.signed_notional(), -1_000_000.0);
        assert!(!pos.expired);
    }

    #[test]
    fn test_into_position_honours_day_count() {
        let conventions = IngestConventions {
            day_count: DayCountBasis::Act360,
            ..IngestConventions::default()
        };
        let pos = record(90.0).into_position(&conventions).unwrap();
        assert_relative_eq!(pos.inputs.time_to_expiry, 0.25);
    }

    #[test]
    fn test_expired_clamp_and_reject() {
        let clamped = record(0.0).into_position(&IngestConventions::default()).unwrap();
        assert!(clamped.expired);

        let reject = IngestConventions {
            expired_policy: ExpiredPolicy::Reject,
            ..IngestConventions::default()
        };
        let err = record(-3.0).into_position(&reject).unwrap_err();
        assert_eq!(
            err,
            GreeksError::ExpiredInstrument {
                identity: "USDBRL-Call-Sell".to_string(),
                days: -3.0
            }
        );
    }

    #[test]
    fn test_into_position_rejects_unknown_labels() {
        let mut bad = record(30.0);
        bad.call_put = "Straddle".to_string();
        assert!(matches!(
            bad.into_position(&IngestConventions::default()),
            Err(GreeksError::InvalidConvention(_))
        ));
    }

    #[test]
    fn test_missing_columns_reports_all_in_contract_order() {
        let missing = missing_columns(["spot", "instrument", " strike ", "notional"]);
        assert_eq!(
            missing,
            vec!["call_put", "direction", "tenor", "vol", "r_d", "r_f"]
        );
    }

    #[test]
    fn test_read_positions_csv() {
        let data = format!(
            "{}\nEURUSD,Put,Buy,1.10,1.12,30,8.5,0.05,0.035,2000000\nEURUSD, Call ,Sell,1.10,1.08,60,9,0.05,0.035,1000000\n",
            HEADER
        );
        let records = read_positions_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].call_put, "Call");
        assert_eq!(records[0].vol, 8.5);
    }

    #[test]
    fn test_read_positions_csv_fails_fast_on_missing_columns() {
        let data = "instrument,call_put,spot,strike,r_d,notional\nX,Call,oops,1,0,1\n";
        match read_positions_csv(data.as_bytes()) {
            Err(ScenarioError::Greeks(GreeksError::MissingColumn { columns })) => {
                assert_eq!(columns, vec!["direction", "tenor", "vol", "r_f"]);
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_read_positions_csv_reports_bad_cell() {
        let data = format!("{}\nX,Call,Buy,abc,1,30,10,0,0,1\n", HEADER);
        assert!(matches!(
            read_positions_csv(data.as_bytes()),
            Err(ScenarioError::Csv(_))
        ));
    }

    #[test]
    fn test_build_batch_reports_row_index() {
        let mut records = vec![record(30.0), record(30.0), record(30.0)];
        records[2].notional = -1.0;
        let err = build_batch(&records, &IngestConventions::default()).unwrap_err();
        assert_eq!(
            err,
            GreeksError::InvalidParameter {
                field: "notional",
                index: 2,
                value: -1.0
            }
        );
    }

    #[test]
    fn test_expired_row_still_validates_inputs() {
        let mut bad = record(0.0);
        bad.spot = -5.0;
        bad.vol = 0.0;
        assert_eq!(
            bad.into_position(&IngestConventions::default()),
            Err(GreeksError::InvalidParameter {
                field: "spot",
                index: 0,
                value: -5.0
            })
        );

        let mut nan_strike = record(-1.0);
        nan_strike.strike = f64::NAN;
        let reject = IngestConventions {
            expired_policy: ExpiredPolicy::Reject,
            ..IngestConventions::default()
        };
        assert!(matches!(
            nan_strike.into_position(&reject),
            Err(GreeksError::InvalidParameter { field: "strike", .. })
        ));
    }

    #[test]
    fn test_bad_row_after_expired_row_keeps_its_index() {
        let data = format!(
            "{}
A,Call,Buy,100,100,0,20,0.03,0,10
B,Put,Sell,100,100,30,20,0.03,0,10
C,Call,Buy,-5,100,30,20,0.03,0,10
",
            HEADER
        );
        match load_batch_csv(data.as_bytes(), &IngestConventions::default()) {
            Err(ScenarioError::Greeks(err)) => assert_eq!(
                err,
                GreeksError::InvalidParameter {
                    field: "spot",
                    index: 2,
                    value: -5.0
                }
            ),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_load_batch_csv() {
        let data = format!(
            "{}\nA,Call,Buy,100,100,365,20,0.03,0,10\nB,Put,Sell,100,100,0,20,0.03,0,10\n",
            HEADER
        );
        let batch = load_batch_csv(data.as_bytes(), &IngestConventions::default()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.expired().len(), 1);
        assert_eq!(batch.expired()[0].as_str(), "B-Put-Sell");
    }

    #[test]
    fn test_expired_policy_parse() {
        assert_eq!("Reject".parse::<ExpiredPolicy>().unwrap(), ExpiredPolicy::Reject);
        assert_eq!(ExpiredPolicy::default().to_string(), "clamp");
        assert!("ignore".parse::<ExpiredPolicy>().is_err());
    }
}
