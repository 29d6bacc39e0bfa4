//! Transaction classification
//!
//! Assigns every transaction to exactly one primary bucket using an explicit,
//! order-sensitive rule table. Flags are checked before the amount sign:
//!
//! 1. `is_deduction`  -> Deduction
//! 2. `is_fixed`      -> Fixed
//! 3. `is_savings`    -> Savings
//! 4. `amount > 0`    -> Income
//! 5. otherwise       -> Flexible
//!
//! `is_savings` combined with a higher-priority flag classifies by that flag;
//! the savings accounting is an overlay dimension handled by the aggregator,
//! not a sixth bucket.

use std::fmt;

use crate::error::CashplanResult;
use crate::models::Transaction;

/// Primary classification bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Pre-income deduction (tax, withholding)
    Deduction,
    /// Fixed/recurring mandatory expense
    Fixed,
    /// Savings transfer
    Savings,
    /// Inflow
    Income,
    /// Variable/discretionary expense
    Flexible,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Deduction => "deduction",
            Self::Fixed => "fixed",
            Self::Savings => "savings",
            Self::Income => "income",
            Self::Flexible => "flexible",
        };
        write!(f, "{s}")
    }
}

/// Classify a transaction into its primary bucket
///
/// Rejects transactions carrying both exclusive flags before any rule is
/// applied, so an invalid row can never reach an aggregate.
pub fn classify(tx: &Transaction) -> CashplanResult<Bucket> {
    tx.validate()?;

    let bucket = if tx.is_deduction {
        Bucket::Deduction
    } else if tx.is_fixed {
        Bucket::Fixed
    } else if tx.is_savings {
        Bucket::Savings
    } else if tx.amount.is_positive() {
        Bucket::Income
    } else {
        Bucket::Flexible
    };
    Ok(bucket)
}
