//! Income-flow & variance engine
//!
//! Derives the projected waterfall from a budget plan, the cumulative
//! actual-side metrics (balance, savings, coverage), and the per-category
//! variance analysis.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use super::plan_resolver::resolve_plan_for_date;
use crate::error::CashplanResult;
use crate::models::{
    BudgetPlan, CategoryAnalysis, Deduction, FixedExpense, Money, Period, PeriodSummary,
    SavingsBase, Transaction,
};

/// Derived financial metrics for one period
///
/// The waterfall fields (`net_income`, `savings_target`,
/// `disposable_income`) are plan-declared projections; the cumulative fields
/// are actual-side, accumulated from the start of the ledger up to the end
/// of the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Canonical period key
    pub period: String,
    pub plan_id: String,

    // Projected waterfall
    pub gross_income: Money,
    pub net_income: Money,
    pub savings_target: Money,
    pub disposable_income: Money,

    // Cumulative actual side
    pub cumulative_balance: Money,
    pub cumulative_savings: Money,
    pub cumulative_savings_target: Money,
    /// cumulative_savings - cumulative_savings_target (negative = behind)
    pub savings_surplus: Money,
    /// cumulative_balance - cumulative_savings (money not parked in savings)
    pub cash_on_hand: Money,

    // Coverage
    /// max(0, cumulative target - cumulative savings)
    pub uncovered_savings: Money,
    /// cash_on_hand >= uncovered_savings
    pub can_cover: bool,
    /// cash_on_hand - uncovered_savings (negative = overspent vs. plan)
    pub true_discretionary: Money,

    /// Variance per category, union of planned and actually-spent categories
    pub categories: Vec<CategoryAnalysis>,
}

/// Total savings accumulated strictly before `cutoff`
///
/// Negated sum of `is_savings` amounts: a transfer into savings (negative
/// cash amount) accrues positively, a withdrawal reduces the total.
pub fn cumulative_savings(transactions: &[Transaction], cutoff: NaiveDate) -> Money {
    transactions
        .iter()
        .filter(|tx| tx.is_savings && tx.date < cutoff)
        .map(|tx| -tx.amount)
        .sum()
}

/// Accumulated wealth (income minus expenses) strictly before `cutoff`
///
/// Savings transfers are excluded: moving money into savings does not change
/// accumulated wealth, it only moves it out of reach of `cash_on_hand`.
pub fn cumulative_balance(transactions: &[Transaction], cutoff: NaiveDate) -> Money {
    transactions
        .iter()
        .filter(|tx| !tx.is_savings && tx.date < cutoff)
        .map(|tx| tx.amount)
        .sum()
}

/// Sum of the savings targets of every period from the one containing
/// `first_date` through `period` itself
///
/// Periods not covered by any plan contribute nothing.
pub fn cumulative_savings_target(
    period: &Period,
    first_date: Option<NaiveDate>,
    plans: &[BudgetPlan],
) -> Money {
    let first_date = first_date.unwrap_or_else(|| period.start());
    let mut total = Money::zero();
    let mut current = period.clone();
    loop {
        if let Ok(plan) = resolve_plan_for_date(current.start(), plans) {
            total += plan.savings_target();
        }
        if current.start() <= first_date {
            break;
        }
        current = current.prev();
    }
    total
}

/// Compute the full metric set for a period
///
/// `summary` is the aggregate of the period's transactions; `transactions`
/// is the whole ledger (needed for the cumulative actual side); `plans` is
/// the full plan set (needed for the cumulative target walk). Pure function:
/// no input is mutated.
pub fn compute_metrics(
    period: &Period,
    plan: &BudgetPlan,
    plans: &[BudgetPlan],
    summary: &PeriodSummary,
    transactions: &[Transaction],
) -> CashplanResult<Metrics> {
    let cutoff = period.end();
    let first_date = transactions.iter().map(|tx| tx.date).min();

    let cum_savings = cumulative_savings(transactions, cutoff);
    let cum_balance = cumulative_balance(transactions, cutoff);
    let cum_target = cumulative_savings_target(period, first_date, plans);

    let cash_on_hand = cum_balance - cum_savings;
    let uncovered = (cum_target - cum_savings).max(Money::zero());
    let can_cover = cash_on_hand >= uncovered;
    let true_discretionary = cash_on_hand - uncovered;

    // Union of planned flexible budgets and actual flexible spend: an
    // unbudgeted category must still surface (with planned = 0), and an
    // untouched budget must still surface (with actual = 0).
    let mut names: BTreeSet<&str> = summary.spent_by_category.keys().map(String::as_str).collect();
    for cb in plan.category_budgets.iter().filter(|cb| !cb.is_fixed) {
        names.insert(cb.category.as_str());
    }
    let categories = names
        .into_iter()
        .map(|name| {
            let actual = summary
                .spent_by_category
                .get(name)
                .copied()
                .unwrap_or(Money::zero());
            let planned = plan.flexible_budget_for(name).unwrap_or(Money::zero());
            CategoryAnalysis::compare(name, actual, planned)
        })
        .collect();

    debug!(period = %period, plan = %plan.id, %cash_on_hand, %uncovered, "computed metrics");

    Ok(Metrics {
        period: period.key(),
        plan_id: plan.id.clone(),
        gross_income: plan.gross_income,
        net_income: plan.net_income(),
        savings_target: plan.savings_target(),
        disposable_income: plan.disposable_income(),
        cumulative_balance: cum_balance,
        cumulative_savings: cum_savings,
        cumulative_savings_target: cum_target,
        savings_surplus: cum_savings - cum_target,
        cash_on_hand,
        uncovered_savings: uncovered,
        can_cover,
        true_discretionary,
        categories,
    })
}

/// Planned share of one category budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBudgetShare {
    pub category: String,
    pub amount: Money,
    pub is_fixed: bool,
    /// Share of disposable income as a percentage; `None` when disposable
    /// income is not positive
    pub share_of_budget: Option<Decimal>,
}

/// Complete budget projection for a period, without any historical data
///
/// Pure plan arithmetic: what the period is supposed to look like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetProjection {
    pub period: String,
    pub plan_id: String,

    pub gross_income: Money,
    pub total_deductions: Money,
    pub deductions: Vec<Deduction>,
    pub net_income: Money,

    pub total_fixed_expenses: Money,
    pub fixed_expenses: Vec<FixedExpense>,

    pub savings_base: SavingsBase,
    pub savings_rate: Decimal,
    pub savings_target: Money,

    pub disposable_income: Money,

    pub fixed_budgets: Vec<CategoryBudgetShare>,
    pub flexible_budgets: Vec<CategoryBudgetShare>,

    /// Sum of flexible category budgets
    pub total_allocated_flexible: Money,
    /// Disposable income not allocated to any category budget
    pub unallocated_flexible: Money,
}

/// Project the expected budget for a period from the plan alone
pub fn project_budget(period: &Period, plan: &BudgetPlan) -> BudgetProjection {
    let disposable = plan.disposable_income();

    let mut fixed_budgets = Vec::new();
    let mut flexible_budgets = Vec::new();
    let mut total_flexible = Money::zero();

    for cb in &plan.category_budgets {
        let share = if disposable.is_positive() {
            cb.amount.percent_of(disposable)
        } else {
            None
        };
        let entry = CategoryBudgetShare {
            category: cb.category.clone(),
            amount: cb.amount,
            is_fixed: cb.is_fixed,
            share_of_budget: share,
        };
        if cb.is_fixed {
            fixed_budgets.push(entry);
        } else {
            total_flexible += cb.amount;
            flexible_budgets.push(entry);
        }
    }

    BudgetProjection {
        period: period.key(),
        plan_id: plan.id.clone(),
        gross_income: plan.gross_income,
        total_deductions: plan.total_deductions(),
        deductions: plan.deductions.clone(),
        net_income: plan.net_income(),
        total_fixed_expenses: plan.total_fixed_expenses(),
        fixed_expenses: plan.fixed_expenses.clone(),
        savings_base: plan.savings_base,
        savings_rate: plan.savings_rate,
        savings_target: plan.savings_target(),
        disposable_income: disposable,
        fixed_budgets,
        flexible_budgets,
        total_allocated_flexible: total_flexible,
        unallocated_flexible: disposable - total_flexible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::aggregate;
    use crate::models::CategoryBudget;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn money(v: Decimal) -> Money {
        Money::new(v)
    }

    fn sample_plan() -> BudgetPlan {
        BudgetPlan {
            id: "2024-default".into(),
            valid_from: d(2024, 1, 1),
            valid_to: None,
            gross_income: money(dec!(5000.00)),
            deductions: vec![
                Deduction { name: "tax".into(), amount: money(dec!(1000.00)) },
                Deduction { name: "social".into(), amount: money(dec!(200.00)) },
            ],
            fixed_expenses: vec![
                FixedExpense { name: "rent".into(), amount: money(dec!(800.00)), category: Some("housing".into()) },
                FixedExpense { name: "insurance".into(), amount: money(dec!(150.00)), category: None },
            ],
            savings_rate: dec!(0.20),
            savings_base: SavingsBase::NetIncome,
            savings_amount: None,
            category_budgets: vec![
                CategoryBudget { category: "food".into(), amount: money(dec!(400.00)), is_fixed: false },
                CategoryBudget { category: "housing".into(), amount: money(dec!(800.00)), is_fixed: true },
            ],
        }
    }

    fn tx(date: NaiveDate, amount: &str, category: &str) -> Transaction {
        Transaction::new(date, Money::parse(amount).unwrap(), "EUR", category, "")
    }

    fn january_ledger() -> Vec<Transaction> {
        vec![
            tx(d(2024, 1, 2), "3800.00", "salary"),
            tx(d(2024, 1, 5), "-800.00", "housing").with_flags(false, false, true),
            tx(d(2024, 1, 10), "-500.00", "savings").with_flags(true, false, false),
            tx(d(2024, 1, 15), "-450.00", "food"),
        ]
    }

    fn metrics_for_january(plan: &BudgetPlan, ledger: &[Transaction]) -> Metrics {
        let period = Period::Month { year: 2024, month: 1 };
        let summary = aggregate(&period, ledger).unwrap();
        let plans = vec![plan.clone()];
        compute_metrics(&period, plan, &plans, &summary, ledger).unwrap()
    }

    #[test]
    fn test_projected_waterfall() {
        let m = metrics_for_january(&sample_plan(), &january_ledger());
        assert_eq!(m.net_income, money(dec!(3800.00)));
        assert_eq!(m.savings_target, money(dec!(760.00)));
        assert_eq!(m.disposable_income, money(dec!(2090.00)));
    }

    #[test]
    fn test_cumulative_actual_side() {
        let m = metrics_for_january(&sample_plan(), &january_ledger());
        // wealth: 3800 - 800 - 450 (savings transfer excluded)
        assert_eq!(m.cumulative_balance, money(dec!(2550.00)));
        assert_eq!(m.cumulative_savings, money(dec!(500.00)));
        assert_eq!(m.cash_on_hand, money(dec!(2050.00)));
        // one period, target 760, saved 500
        assert_eq!(m.cumulative_savings_target, money(dec!(760.00)));
        assert_eq!(m.savings_surplus, money(dec!(-260.00)));
        assert_eq!(m.uncovered_savings, money(dec!(260.00)));
        assert!(m.can_cover);
        assert_eq!(m.true_discretionary, money(dec!(1790.00)));
    }

    #[test]
    fn test_coverage_boundary_equal_is_covered() {
        let cash = money(dec!(260.00));
        let uncovered = money(dec!(260.00));
        assert!(cash >= uncovered);

        // end-to-end: shrink income so cash_on_hand == uncovered_savings
        let plan = sample_plan();
        let ledger = vec![
            tx(d(2024, 1, 2), "760.00", "salary"),
            tx(d(2024, 1, 10), "-500.00", "savings").with_flags(true, false, false),
        ];
        let m = metrics_for_january(&plan, &ledger);
        assert_eq!(m.cash_on_hand, money(dec!(260.00)));
        assert_eq!(m.uncovered_savings, money(dec!(260.00)));
        assert!(m.can_cover);
        assert_eq!(m.true_discretionary, Money::zero());
    }

    #[test]
    fn test_negative_true_discretionary_signals_overspend() {
        let plan = sample_plan();
        let ledger = vec![
            tx(d(2024, 1, 2), "100.00", "salary"),
            tx(d(2024, 1, 15), "-90.00", "food"),
        ];
        let m = metrics_for_january(&plan, &ledger);
        assert_eq!(m.cash_on_hand, money(dec!(10.00)));
        assert_eq!(m.uncovered_savings, money(dec!(760.00)));
        assert!(!m.can_cover);
        assert_eq!(m.true_discretionary, money(dec!(-750.00)));
    }

    #[test]
    fn test_overfunded_savings_has_zero_uncovered() {
        let plan = sample_plan();
        let ledger = vec![
            tx(d(2024, 1, 2), "3800.00", "salary"),
            tx(d(2024, 1, 10), "-1000.00", "savings").with_flags(true, false, false),
        ];
        let m = metrics_for_january(&plan, &ledger);
        assert_eq!(m.uncovered_savings, Money::zero());
        assert_eq!(m.savings_surplus, money(dec!(240.00)));
        assert_eq!(m.true_discretionary, m.cash_on_hand);
    }

    #[test]
    fn test_cumulative_target_walks_all_periods() {
        let plan = sample_plan();
        let plans = vec![plan.clone()];
        let march = Period::Month { year: 2024, month: 3 };
        // first transaction in January -> Jan, Feb, Mar targets
        let total = cumulative_savings_target(&march, Some(d(2024, 1, 15)), &plans);
        assert_eq!(total, money(dec!(2280.00)));
    }

    #[test]
    fn test_cumulative_target_skips_uncovered_periods() {
        let mut plan = sample_plan();
        plan.valid_from = d(2024, 2, 1);
        let plans = vec![plan];
        let march = Period::Month { year: 2024, month: 3 };
        // January has no plan and contributes nothing
        let total = cumulative_savings_target(&march, Some(d(2024, 1, 15)), &plans);
        assert_eq!(total, money(dec!(1520.00)));
    }

    #[test]
    fn test_category_union_includes_unbudgeted_and_unspent() {
        let mut ledger = january_ledger();
        ledger.push(tx(d(2024, 1, 20), "-35.00", "gadgets"));
        let mut plan = sample_plan();
        plan.category_budgets.push(CategoryBudget {
            category: "transport".into(),
            amount: money(dec!(120.00)),
            is_fixed: false,
        });
        let m = metrics_for_january(&plan, &ledger);

        let names: Vec<&str> = m.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["food", "gadgets", "transport"]);

        let gadgets = &m.categories[1];
        assert_eq!(gadgets.planned, Money::zero());
        assert_eq!(gadgets.progress, None);

        let transport = &m.categories[2];
        assert_eq!(transport.actual, Money::zero());
        assert_eq!(transport.variance, money(dec!(120.00)));
    }

    #[test]
    fn test_fixed_category_budget_excluded_from_variance() {
        let m = metrics_for_january(&sample_plan(), &january_ledger());
        assert!(m.categories.iter().all(|c| c.category != "housing"));
    }

    #[test]
    fn test_projection_split_and_unallocated() {
        let period = Period::Month { year: 2024, month: 1 };
        let p = project_budget(&period, &sample_plan());
        assert_eq!(p.flexible_budgets.len(), 1);
        assert_eq!(p.fixed_budgets.len(), 1);
        assert_eq!(p.total_allocated_flexible, money(dec!(400.00)));
        assert_eq!(p.unallocated_flexible, money(dec!(1690.00)));
        // 400 / 2090
        let share = p.flexible_budgets[0].share_of_budget.unwrap();
        assert!(share > dec!(19.1) && share < dec!(19.2));
    }

    #[test]
    fn test_projection_share_undefined_without_disposable_income() {
        let mut plan = sample_plan();
        plan.gross_income = Money::zero();
        let period = Period::Month { year: 2024, month: 1 };
        let p = project_budget(&period, &plan);
        assert!(p.flexible_budgets[0].share_of_budget.is_none());
    }
}
