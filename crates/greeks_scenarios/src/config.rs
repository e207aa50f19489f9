//! Scenario run configuration.
//!
//! Handles loading of run settings from TOML files with environment
//! variable override support. Every convention the engine applies flows
//! through [`ScenarioConfig`]; nothing is read from process-wide constants.

use greeks_core::types::{DayCountBasis, GreeksError, RhoConvention, TimeDecayBasis};
use greeks_kernel::KernelConventions;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::ingest::{ExpiredPolicy, IngestConventions};
use crate::scenarios::{ScenarioGrid, DEFAULT_SHOCKS};

/// Largest accepted display precision.
pub const MAX_DISPLAY_PRECISION: u32 = 12;

const ENV_TIME_DECAY_BASIS: &str = "GREEKS_TIME_DECAY_BASIS";
const ENV_DISPLAY_PRECISION: &str = "GREEKS_DISPLAY_PRECISION";
const ENV_EXPIRED_POLICY: &str = "GREEKS_EXPIRED_POLICY";
const ENV_RHO_CONVENTION: &str = "GREEKS_RHO_CONVENTION";

/// Scenario run configuration.
///
/// # Examples
///
/// ```
/// use greeks_scenarios::config::ScenarioConfig;
/// use greeks_core::types::TimeDecayBasis;
///
/// let config = ScenarioConfig::from_toml_str(r#"
///     shocks = [-0.05, 0.0, 0.05]
///     time_decay_basis = "calendar"
/// "#).unwrap();
///
/// assert_eq!(config.shocks.len(), 3);
/// assert_eq!(config.time_decay_basis, TimeDecayBasis::CalendarDays);
/// assert_eq!(config.display_precision, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Relative spot shocks as decimals
    pub shocks: Vec<f64>,

    /// Divisor applied to annual theta
    pub time_decay_basis: TimeDecayBasis,

    /// Quoted rho or the full ∂V/∂r
    pub rho_convention: RhoConvention,

    /// Day-count basis converting input tenors (days) to years
    pub tenor_day_basis: DayCountBasis,

    /// Decimal places kept by `ScenarioTable::rounded`
    pub display_precision: u32,

    /// Handling of positions with no time left
    pub expired_policy: ExpiredPolicy,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            shocks: DEFAULT_SHOCKS.to_vec(),
            time_decay_basis: TimeDecayBasis::default(),
            rho_convention: RhoConvention::default(),
            tenor_day_basis: DayCountBasis::default(),
            display_precision: 0,
            expired_policy: ExpiredPolicy::default(),
        }
    }
}

impl ScenarioConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable values leave the current setting in place.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(basis) = std::env::var(ENV_TIME_DECAY_BASIS) {
            match basis.parse() {
                Ok(parsed) => self.time_decay_basis = parsed,
                Err(e) => tracing::warn!(variable = ENV_TIME_DECAY_BASIS, error = %e, "ignoring override"),
            }
        }

        if let Ok(convention) = std::env::var(ENV_RHO_CONVENTION) {
            match convention.parse() {
                Ok(parsed) => self.rho_convention = parsed,
                Err(e) => tracing::warn!(variable = ENV_RHO_CONVENTION, error = %e, "ignoring override"),
            }
        }

        if let Ok(precision) = std::env::var(ENV_DISPLAY_PRECISION) {
            match precision.trim().parse() {
                Ok(parsed) => self.display_precision = parsed,
                Err(e) => tracing::warn!(variable = ENV_DISPLAY_PRECISION, error = %e, "ignoring override"),
            }
        }

        if let Ok(policy) = std::env::var(ENV_EXPIRED_POLICY) {
            match policy.parse() {
                Ok(parsed) => self.expired_policy = parsed,
                Err(e) => tracing::warn!(variable = ENV_EXPIRED_POLICY, error = %e, "ignoring override"),
            }
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        for (i, shock) in self.shocks.iter().enumerate() {
            if !shock.is_finite() {
                errors.push(format!("shocks[{}] = {} is not finite", i, shock));
            } else if *shock <= -1.0 {
                errors.push(format!(
                    "shocks[{}] = {} would make spots non-positive (must be > -1)",
                    i, shock
                ));
            }
        }

        if self.display_precision > MAX_DISPLAY_PRECISION {
            errors.push(format!(
                "display_precision {} exceeds maximum allowed ({})",
                self.display_precision, MAX_DISPLAY_PRECISION
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file and validate
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Kernel conventions derived from this configuration.
    pub fn kernel_conventions(&self) -> KernelConventions {
        KernelConventions::new(self.time_decay_basis).with_rho_convention(self.rho_convention)
    }

    /// Ingestion conventions derived from this configuration.
    pub fn ingest_conventions(&self) -> IngestConventions {
        IngestConventions {
            day_count: self.tenor_day_basis,
            expired_policy: self.expired_policy,
        }
    }

    /// Scenario grid built from `shocks`.
    ///
    /// # Errors
    /// `GreeksError::InvalidParameter` for a shock rejected by [`ScenarioGrid::new`].
    pub fn grid(&self) -> Result<ScenarioGrid, GreeksError> {
        ScenarioGrid::new(self.shocks.clone())
    }
}
