//! Error types for structured error handling.
//!
//! This module provides `GreeksError`, the failure taxonomy shared by the
//! pricing kernel and the scenario engine. Every variant is raised during
//! pre-flight validation, before any Greek is evaluated.

use thiserror::Error;

/// Categorised errors for pricing and scenario runs.
///
/// # Variants
/// - `InvalidParameter`: non-positive or non-finite model input
/// - `MissingColumn`: required input field(s) absent from a tabular batch
/// - `ShapeMismatch`: arrays of unequal length within one batch
/// - `ExpiredInstrument`: time to expiry ≤ 0 under the reject policy
/// - `InvalidConvention`: unknown or out-of-range convention value
///
/// # Examples
/// ```
/// use greeks_core::types::GreeksError;
///
/// let err = GreeksError::InvalidParameter { field: "spot", index: 3, value: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid parameter: spot[3] = -1");
///
/// let err = GreeksError::missing_columns(["vol", "strike"]);
/// assert_eq!(format!("{}", err), "Missing required column(s): vol, strike");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GreeksError {
    /// A model input violates its domain (S, K, T, v must be positive; all finite).
    #[error("Invalid parameter: {field}[{index}] = {value}")]
    InvalidParameter {
        /// Name of the offending field
        field: &'static str,
        /// Position of the offending element within the batch
        index: usize,
        /// The rejected value
        value: f64,
    },

    /// Required fields absent from an ingested batch.
    #[error("Missing required column(s): {}", .columns.join(", "))]
    MissingColumn {
        /// Every missing column, in the order the contract lists them
        columns: Vec<String>,
    },

    /// Arrays that must be aligned have different lengths.
    #[error("Shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// What was being aligned
        context: String,
        /// Required length
        expected: usize,
        /// Actual length
        found: usize,
    },

    /// Instrument whose time to expiry is not positive.
    #[error("Expired instrument {identity}: {days} day(s) to expiry")]
    ExpiredInstrument {
        /// Position identity
        identity: String,
        /// Remaining days (zero or negative)
        days: f64,
    },

    /// A convention value could not be parsed or is out of range.
    #[error("Invalid convention: {0}")]
    InvalidConvention(String),
}

impl GreeksError {
    /// Builds a `MissingColumn` error from any list of column names.
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GreeksError::MissingColumn {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a `ShapeMismatch` error.
    pub fn shape_mismatch(context: impl Into<String>, expected: usize, found: usize) -> Self {
        GreeksError::ShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = GreeksError::InvalidParameter {
            field: "volatility",
            index: 0,
            value: 0.0,
        };
        assert_eq!(format!("{}", err), "Invalid parameter: volatility[0] = 0");
    }

    #[test]
    fn test_missing_column_lists_every_column() {
        let err = GreeksError::missing_columns(["tenor", "r_f"]);
        assert_eq!(format!("{}", err), "Missing required column(s): tenor, r_f");
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = GreeksError::shape_mismatch("strike", 4, 3);
        assert_eq!(
            format!("{}", err),
            "Shape mismatch in strike: expected 4, found 3"
        );
    }

    #[test]
    fn test_expired_instrument_display() {
        let err = GreeksError::ExpiredInstrument {
            identity: "PETR4-Call-Buy".to_string(),
            days: -2.0,
        };
        assert_eq!(
            format!("{}", err),
            "Expired instrument PETR4-Call-Buy: -2 day(s) to expiry"
        );
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = GreeksError::InvalidConvention("basis 7".to_string());
        let boxed: Box<dyn std::error::Error> = Box::new(err.clone());
        assert!(boxed.to_string().contains("basis 7"));
        assert_eq!(err.clone(), err);
    }
}
