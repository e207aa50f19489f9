//! # greeks_scenarios (L3: Scenario Engine)
//!
//! Portfolio-level spot-shock analysis over the closed-form kernel.
//!
//! This crate provides:
//! - Positions, identities and struct-of-arrays batches (`portfolio`)
//! - The tabular input contract and a CSV reader that fails fast on
//!   missing columns (`ingest`)
//! - Shock grids, shocked-spot matrices and the scenario runner (`scenarios`)
//! - TOML configuration with environment overrides (`config`)
//!
//! ## Workflow
//!
//! ```
//! use greeks_kernel::Greek;
//! use greeks_scenarios::config::ScenarioConfig;
//! use greeks_scenarios::scenarios::ScenarioRunner;
//!
//! let csv = "\
//! instrument,call_put,direction,spot,strike,tenor,vol,r_d,r_f,notional
//! USDBRL,Call,Sell,5.00,5.20,30,15,0.10,0.05,50000000
//! USDBRL,Put,Buy,5.00,4.80,30,15,0.10,0.05,20000000
//! ";
//!
//! let runner = ScenarioRunner::new(ScenarioConfig::default()).unwrap();
//! let batch = runner.load_batch(csv.as_bytes()).unwrap();
//! let delta = runner.run(&batch, Greek::Delta).unwrap();
//!
//! assert_eq!(delta.len(), 2);
//! assert_eq!(delta.columns()[0], "Delta -10%");
//! assert_eq!(delta.rows()[0].id.as_str(), "USDBRL-Call-Sell");
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): evaluate shock rows with rayon

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod error;
pub mod ingest;
pub mod portfolio;
pub mod scenarios;

pub use error::{ConfigError, ScenarioError, ScenarioResult};
