//! Scenario engine error types.
//!
//! This module provides structured error types for ingestion, configuration
//! and scenario runs using `thiserror` for derivation.

use greeks_core::types::GreeksError;
use thiserror::Error;

/// Errors that can occur while loading positions or running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Validation failure raised by the kernel or the input contract.
    #[error(transparent)]
    Greeks(#[from] GreeksError),

    /// Malformed CSV input (unparseable cell, ragged row, I/O failure).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Result alias for the scenario engine.
pub type ScenarioResult<T> = Result<T, ScenarioError>;
