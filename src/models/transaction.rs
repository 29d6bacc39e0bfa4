//! Transaction model
//!
//! An immutable, classified financial record. Created once at import time and
//! never mutated; re-importing a row with an identical dedup key is a no-op.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::money::Money;
use crate::error::{CashplanError, CashplanResult};

/// A single financial transaction
///
/// `amount` is always in the workspace base currency; positive = inflow,
/// negative = outflow. The three flags drive classification:
///
/// - `is_deduction`: pre-income subtraction (taxes, withholding)
/// - `is_fixed`: recurring mandatory expense (rent, subscriptions)
/// - `is_savings`: savings transfer, tracked as an overlay dimension
///
/// `is_deduction` and `is_fixed` are mutually exclusive. `is_savings` may
/// combine with either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount in workspace base currency (positive = inflow)
    pub amount: Money,

    /// ISO 4217 currency code of the stored amount
    pub currency: String,

    /// User-defined category label
    pub category: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Savings transfer flag (overlay dimension)
    #[serde(default)]
    pub is_savings: bool,

    /// Pre-income deduction flag
    #[serde(default)]
    pub is_deduction: bool,

    /// Fixed/recurring expense flag
    #[serde(default)]
    pub is_fixed: bool,

    /// Source file of the import batch, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        amount: Money,
        currency: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            currency: currency.into(),
            category: category.into(),
            description: description.into(),
            is_savings: false,
            is_deduction: false,
            is_fixed: false,
            source_file: None,
            created_at: Utc::now(),
        }
    }

    /// Builder-style flag setters
    pub fn with_flags(mut self, is_savings: bool, is_deduction: bool, is_fixed: bool) -> Self {
        self.is_savings = is_savings;
        self.is_deduction = is_deduction;
        self.is_fixed = is_fixed;
        self
    }

    /// Validate the flag invariant
    ///
    /// A transaction with both `is_deduction` and `is_fixed` set is invalid
    /// and must be rejected before it can reach any aggregate.
    pub fn validate(&self) -> CashplanResult<()> {
        if self.is_deduction && self.is_fixed {
            return Err(CashplanError::conflicting_flags(
                self.date,
                &self.category,
                &self.description,
            ));
        }
        if self.category.trim().is_empty() {
            return Err(CashplanError::validation(
                "category",
                format!("transaction {} has an empty category", self.date),
            ));
        }
        Ok(())
    }

    /// Deduplication key over (date, amount, currency, category, description)
    ///
    /// Stable SHA-256 hex digest; identical source rows hash identically, so
    /// re-imports are idempotent upserts.
    pub fn dedup_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.date.format("%Y-%m-%d").to_string());
        hasher.update(b"|");
        hasher.update(self.amount.amount().to_string());
        hasher.update(b"|");
        hasher.update(&self.currency);
        hasher.update(b"|");
        hasher.update(&self.category);
        hasher.update(b"|");
        hasher.update(&self.description);
        hex::encode(hasher.finalize())
    }
}
