//! cashplan - Personal-finance analysis engine
//!
//! Compares budget plans against actual spending per period: income
//! waterfall, savings coverage, category variance and moving-average trends.
//! All amounts are exact decimals in a single workspace base currency.
//!
//! # Architecture
//!
//! - `config`: workspace settings and path layout
//! - `error`: the crate error type
//! - `models`: money, periods, transactions, plans, summaries
//! - `engine`: classification, aggregation, plan resolution, metrics, trends
//! - `storage`: YAML plans, JSON ledger, conversion rates
//! - `import`: CSV statement parsing
//! - `display`: terminal formatting
//! - `cli`: command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use cashplan::config::{WorkspaceConfig, WorkspacePaths};
//!
//! let paths = WorkspacePaths::new(".");
//! let config = WorkspaceConfig::load(&paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod import;
pub mod models;
pub mod storage;

pub use error::{CashplanError, CashplanResult};
