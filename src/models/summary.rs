//! Derived output models
//!
//! Plain structured data produced by the engine: period summaries and
//! per-category analyses. Never persisted by the engine itself; every field
//! is a decimal, integer, string, boolean or date so the records serialize
//! directly to console text, JSON or template contexts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;
use rust_decimal::Decimal;

/// Aggregated transaction data for one period
///
/// Bucket totals are positive magnitudes for the outflow buckets
/// (deductions, fixed, flexible); income is the signed inflow sum. The
/// savings total is the overlay sum: cash leaving for savings accrues
/// positively, withdrawals back to cash reduce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Canonical period key
    pub period: String,
    pub period_start: NaiveDate,
    /// Exclusive end bound
    pub period_end: NaiveDate,

    pub total_income: Money,
    pub total_deductions: Money,
    pub total_fixed: Money,
    pub total_flexible: Money,
    /// Savings overlay total across all primary buckets
    pub total_savings: Money,

    /// Flexible spending magnitude per category
    pub spent_by_category: BTreeMap<String, Money>,
    /// Fixed spending magnitude per category (tracked separately)
    pub fixed_by_category: BTreeMap<String, Money>,

    pub transaction_count: usize,
    pub last_transaction_date: Option<NaiveDate>,
}

impl PeriodSummary {
    /// Total outflow magnitude excluding savings transfers
    pub fn total_expenses(&self) -> Money {
        self.total_deductions + self.total_fixed + self.total_flexible
    }
}

/// Actual-vs-plan analysis for a single category
///
/// `progress` and `variance_pct` are `None` when no budget is planned for
/// the category (division by a zero base is reported as "not applicable").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub category: String,

    /// Actual flexible spending (positive magnitude)
    pub actual: Money,
    /// Planned budget; zero when the category is unbudgeted
    pub planned: Money,

    /// planned - actual (negative = over budget)
    pub remaining: Money,
    /// planned - actual, same sign convention as `remaining`
    pub variance: Money,

    /// actual / planned as a percentage (112.5 = 112.5%), uncapped
    pub progress: Option<Decimal>,
    /// variance / planned as a percentage
    pub variance_pct: Option<Decimal>,
}

impl CategoryAnalysis {
    /// Compare actual spending against a planned budget
    pub fn compare(category: impl Into<String>, actual: Money, planned: Money) -> Self {
        let variance = planned - actual;
        Self {
            category: category.into(),
            actual,
            planned,
            remaining: variance,
            variance,
            progress: actual.percent_of(planned),
            variance_pct: variance.percent_of(planned),
        }
    }

    /// Over budget (actual exceeds a non-zero plan, or any unplanned spend)
    pub fn is_over_budget(&self) -> bool {
        self.variance.is_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_over_budget_scenario() {
        // food: planned 400.00, spent 450.00
        let analysis = CategoryAnalysis::compare(
            "food",
            Money::new(dec!(450.00)),
            Money::new(dec!(400.00)),
        );
        assert_eq!(analysis.variance, Money::new(dec!(-50.00)));
        assert_eq!(analysis.remaining, Money::new(dec!(-50.00)));
        assert_eq!(analysis.variance_pct, Some(dec!(-12.5)));
        assert_eq!(analysis.progress, Some(dec!(112.5))); // not clamped
        assert!(analysis.is_over_budget());
    }

    #[test]
    fn test_unbudgeted_category_has_no_percentages() {
        let analysis =
            CategoryAnalysis::compare("gadgets", Money::new(dec!(99.99)), Money::zero());
        assert_eq!(analysis.progress, None);
        assert_eq!(analysis.variance_pct, None);
        assert_eq!(analysis.variance, Money::new(dec!(-99.99)));
        assert!(analysis.is_over_budget());
    }

    #[test]
    fn test_under_budget() {
        let analysis = CategoryAnalysis::compare(
            "transport",
            Money::new(dec!(80.00)),
            Money::new(dec!(100.00)),
        );
        assert_eq!(analysis.variance, Money::new(dec!(20.00)));
        assert_eq!(analysis.variance_pct, Some(dec!(20)));
        assert!(!analysis.is_over_budget());
    }
}
