//! Budget plan model
//!
//! A versioned financial configuration: income, deductions, fixed expenses,
//! savings settings and category budgets, valid over a date window.
//!
//! Income flow:
//!
//! ```text
//! Gross Income
//!   - Deductions (taxes, before the money arrives)
//!   = Net Income
//!   - Fixed Expenses (rent, subscriptions)
//!   - Savings Target
//!   = Disposable Income (free spending budget)
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{CashplanError, CashplanResult};

/// Base for calculating the savings target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SavingsBase {
    /// Savings as a share of net income (before fixed expenses)
    #[default]
    NetIncome,
    /// Savings as a share of disposable income (after fixed expenses)
    Disposable,
}

impl std::fmt::Display for SavingsBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NetIncome => "net income",
            Self::Disposable => "disposable income",
        };
        write!(f, "{s}")
    }
}

/// A deduction from gross income (taxes, social security)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deduction {
    pub name: String,
    pub amount: Money,
}

/// A fixed expense paid from net income (rent, subscriptions, loans)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedExpense {
    pub name: String,
    pub amount: Money,
    /// Optional link to a transaction category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Planned budget for a single category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: String,
    pub amount: Money,
    /// Fixed-expense category; excluded from flexible variance analysis
    #[serde(default)]
    pub is_fixed: bool,
}

fn default_savings_rate() -> Decimal {
    Decimal::new(20, 2) // 0.20
}

/// Financial configuration valid over `[valid_from, valid_to)`
///
/// `valid_to` absent means open-ended (valid until a later plan starts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub id: String,

    /// First date this plan covers (inclusive)
    pub valid_from: NaiveDate,

    /// First date this plan no longer covers (exclusive); open-ended if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDate>,

    /// Planned gross income per period
    pub gross_income: Money,

    #[serde(default)]
    pub deductions: Vec<Deduction>,

    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,

    /// Savings rate as a fraction of the savings base
    #[serde(default = "default_savings_rate")]
    pub savings_rate: Decimal,

    #[serde(default)]
    pub savings_base: SavingsBase,

    /// Fixed savings amount; takes priority over the rate when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_amount: Option<Money>,

    #[serde(default)]
    pub category_budgets: Vec<CategoryBudget>,
}

impl BudgetPlan {
    /// Sum of all deductions from gross income
    pub fn total_deductions(&self) -> Money {
        self.deductions.iter().map(|d| d.amount).sum()
    }

    /// Income after deductions (what actually arrives)
    pub fn net_income(&self) -> Money {
        self.gross_income - self.total_deductions()
    }

    /// Sum of all fixed/recurring expenses
    pub fn total_fixed_expenses(&self) -> Money {
        self.fixed_expenses.iter().map(|f| f.amount).sum()
    }

    /// Target savings amount for one period
    ///
    /// A fixed `savings_amount` wins over the rate. With
    /// `savings_base = disposable` the definition is circular (disposable
    /// already subtracts the target), so it is solved algebraically:
    /// `target = rate * (net - fixed) / (1 + rate)`.
    pub fn savings_target(&self) -> Money {
        if let Some(amount) = self.savings_amount {
            return amount;
        }
        match self.savings_base {
            SavingsBase::NetIncome => self.net_income().scale(self.savings_rate),
            SavingsBase::Disposable => {
                let before_savings = self.net_income() - self.total_fixed_expenses();
                let target =
                    before_savings.amount() * self.savings_rate / (Decimal::ONE + self.savings_rate);
                Money::new(target)
            }
        }
    }

    /// Free money after fixed expenses and the savings target
    pub fn disposable_income(&self) -> Money {
        self.net_income() - self.total_fixed_expenses() - self.savings_target()
    }

    /// Planned budget for a flexible category, if any
    pub fn flexible_budget_for(&self, category: &str) -> Option<Money> {
        self.category_budgets
            .iter()
            .find(|cb| !cb.is_fixed && cb.category == category)
            .map(|cb| cb.amount)
    }

    /// Check whether this plan's validity window covers a date
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && self.valid_to.map_or(true, |to| date < to)
    }

    /// Validate the plan
    ///
    /// Hard errors (negative amounts, inverted validity window, empty id)
    /// fail; a `savings_rate` outside `[0, 1]` is accepted but flagged as a
    /// warning and interpreted literally.
    pub fn validate(&self) -> CashplanResult<Vec<String>> {
        if self.id.trim().is_empty() {
            return Err(CashplanError::Configuration(
                "budget plan is missing an id".into(),
            ));
        }
        if let Some(to) = self.valid_to {
            if to <= self.valid_from {
                return Err(CashplanError::Configuration(format!(
                    "plan '{}': valid_to {} must be after valid_from {}",
                    self.id, to, self.valid_from
                )));
            }
        }
        if self.gross_income.is_negative() {
            return Err(CashplanError::validation(
                "gross_income",
                format!("plan '{}': gross_income must be >= 0", self.id),
            ));
        }
        for d in &self.deductions {
            if d.amount.is_negative() {
                return Err(CashplanError::validation(
                    "deductions",
                    format!("plan '{}': deduction '{}' has a negative amount", self.id, d.name),
                ));
            }
        }
        for fx in &self.fixed_expenses {
            if fx.amount.is_negative() {
                return Err(CashplanError::validation(
                    "fixed_expenses",
                    format!(
                        "plan '{}': fixed expense '{}' has a negative amount",
                        self.id, fx.name
                    ),
                ));
            }
        }
        for cb in &self.category_budgets {
            if cb.amount.is_negative() {
                return Err(CashplanError::validation(
                    "category_budgets",
                    format!(
                        "plan '{}': budget for '{}' has a negative amount",
                        self.id, cb.category
                    ),
                ));
            }
        }
        if let Some(amount) = self.savings_amount {
            if amount.is_negative() {
                return Err(CashplanError::validation(
                    "savings_amount",
                    format!("plan '{}': savings_amount must be >= 0", self.id),
                ));
            }
        }

        let mut warnings = Vec::new();
        if self.savings_rate < Decimal::ZERO || self.savings_rate > Decimal::ONE {
            warnings.push(format!(
                "plan '{}': savings_rate {} is outside [0, 1] and will be applied literally",
                self.id, self.savings_rate
            ));
        }
        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn money(v: Decimal) -> Money {
        Money::new(v)
    }

    /// Plan from the reference scenario: 5000 gross, 1200 deductions,
    /// 950 fixed, 20% of net income saved.
    fn sample_plan() -> BudgetPlan {
        BudgetPlan {
            id: "2024-default".into(),
            valid_from: d(2024, 1, 1),
            valid_to: None,
            gross_income: money(dec!(5000.00)),
            deductions: vec![
                Deduction { name: "income tax".into(), amount: money(dec!(1000.00)) },
                Deduction { name: "social security".into(), amount: money(dec!(200.00)) },
            ],
            fixed_expenses: vec![
                FixedExpense { name: "rent".into(), amount: money(dec!(800.00)), category: Some("housing".into()) },
                FixedExpense { name: "insurance".into(), amount: money(dec!(150.00)), category: None },
            ],
            savings_rate: dec!(0.20),
            savings_base: SavingsBase::NetIncome,
            savings_amount: None,
            category_budgets: vec![CategoryBudget {
                category: "food".into(),
                amount: money(dec!(400.00)),
                is_fixed: false,
            }],
        }
    }

    #[test]
    fn test_waterfall_scenario() {
        let plan = sample_plan();
        assert_eq!(plan.net_income(), money(dec!(3800.00)));
        assert_eq!(plan.savings_target(), money(dec!(760.00)));
        assert_eq!(plan.disposable_income(), money(dec!(2090.00)));
    }

    #[test]
    fn test_waterfall_identities() {
        let plan = sample_plan();
        assert_eq!(plan.net_income() + plan.total_deductions(), plan.gross_income);
        assert_eq!(
            plan.disposable_income() + plan.total_fixed_expenses() + plan.savings_target(),
            plan.net_income()
        );
    }

    #[test]
    fn test_fixed_savings_amount_wins_over_rate() {
        let mut plan = sample_plan();
        plan.savings_amount = Some(money(dec!(500.00)));
        assert_eq!(plan.savings_target(), money(dec!(500.00)));
    }

    #[test]
    fn test_disposable_base_is_solved_algebraically() {
        let mut plan = sample_plan();
        plan.savings_base = SavingsBase::Disposable;
        // target = 0.20 * (3800 - 950) / 1.20 = 475
        assert_eq!(plan.savings_target(), money(dec!(475)));
        // identity still holds by construction
        assert_eq!(
            plan.disposable_income() + plan.total_fixed_expenses() + plan.savings_target(),
            plan.net_income()
        );
    }

    #[test]
    fn test_zero_gross_income_is_valid() {
        let mut plan = sample_plan();
        plan.gross_income = Money::zero();
        assert!(plan.validate().is_ok());
        assert!(plan.net_income().is_negative());
    }

    #[test]
    fn test_negative_budget_amount_rejected() {
        let mut plan = sample_plan();
        plan.category_budgets[0].amount = money(dec!(-1));
        assert!(plan.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_out_of_range_rate_is_a_warning_not_an_error() {
        let mut plan = sample_plan();
        plan.savings_rate = dec!(1.5);
        let warnings = plan.validate().unwrap();
        assert_eq!(warnings.len(), 1);
        // interpreted literally
        assert_eq!(plan.savings_target(), money(dec!(5700.00)));
    }

    #[test]
    fn test_covers_window() {
        let mut plan = sample_plan();
        plan.valid_to = Some(d(2024, 7, 1));
        assert!(plan.covers(d(2024, 1, 1)));
        assert!(plan.covers(d(2024, 6, 30)));
        assert!(!plan.covers(d(2024, 7, 1))); // exclusive
        assert!(!plan.covers(d(2023, 12, 31)));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut plan = sample_plan();
        plan.valid_to = Some(d(2023, 1, 1));
        assert!(matches!(
            plan.validate().unwrap_err(),
            CashplanError::Configuration(_)
        ));
    }
}
