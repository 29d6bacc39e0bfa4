//! Core data models
//!
//! Immutable records and configuration consumed by the calculation engine,
//! plus the derived output models it produces.

pub mod money;
pub mod period;
pub mod plan;
pub mod summary;
pub mod transaction;

pub use money::Money;
pub use period::{Granularity, Period};
pub use plan::{BudgetPlan, CategoryBudget, Deduction, FixedExpense, SavingsBase};
pub use summary::{CategoryAnalysis, PeriodSummary};
pub use transaction::Transaction;
