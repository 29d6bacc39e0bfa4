//! Workspace persistence
//!
//! Plans as YAML files, the transaction ledger as JSON, conversion rates as
//! YAML. All paths come from [`crate::config::WorkspacePaths`].

pub mod plans;
pub mod rates;
pub mod transactions;

pub use plans::{load_plan_file, load_plans, save_plan};
pub use rates::RateTable;
pub use transactions::{ImportOutcome, Ledger};
