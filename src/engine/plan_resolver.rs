//! Budget plan resolution
//!
//! Selects the single plan whose validity window covers a period:
//! most-recent-effective lookup over the full plan set, pure and stateless.

use crate::error::{CashplanError, CashplanResult};
use crate::models::{BudgetPlan, Period};

/// Resolve the plan in effect for a period
///
/// Candidates are plans with `valid_from <= period.start` and either no
/// `valid_to` or `period.start < valid_to`. When windows overlap, the
/// candidate with the latest `valid_from` wins. Fails with `NoPlanFound`
/// when no candidate covers the period start.
pub fn resolve_plan<'a>(period: &Period, plans: &'a [BudgetPlan]) -> CashplanResult<&'a BudgetPlan> {
    resolve_plan_for_date(period.start(), plans)
}

/// Date-keyed variant used by the cumulative-target walk
pub fn resolve_plan_for_date(
    date: chrono::NaiveDate,
    plans: &[BudgetPlan],
) -> CashplanResult<&BudgetPlan> {
    plans
        .iter()
        .filter(|p| p.covers(date))
        .max_by_key(|p| p.valid_from)
        .ok_or(CashplanError::NoPlanFound { period_start: date })
}
