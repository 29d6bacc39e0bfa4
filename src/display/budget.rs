//! Budget projection formatting

use crate::engine::calculator::CategoryBudgetShare;
use crate::engine::BudgetProjection;

use super::{format_opt_pct, separator};

/// Format the projected budget waterfall and category allocations
pub fn format_budget(projection: &BudgetProjection) -> String {
    let mut out = String::new();

    out.push_str(&format!("Budget for {}\n", projection.period));
    out.push_str(&format!("Plan: {}\n\n", projection.plan_id));

    out.push_str(&format!("  Gross income    {:>12}\n", projection.gross_income.to_string()));
    for d in &projection.deductions {
        out.push_str(&format!("    - {:<12} {:>12}\n", d.name, (-d.amount).to_string()));
    }
    out.push_str(&format!("  Net income      {:>12}\n", projection.net_income.to_string()));
    for f in &projection.fixed_expenses {
        out.push_str(&format!("    - {:<12} {:>12}\n", f.name, (-f.amount).to_string()));
    }
    out.push_str(&format!(
        "  Savings target  {:>12}  ({} of {})\n",
        projection.savings_target.to_string(),
        format_opt_pct(Some(projection.savings_rate * rust_decimal::Decimal::ONE_HUNDRED)),
        projection.savings_base,
    ));
    out.push_str(&format!("  Disposable      {:>12}\n", projection.disposable_income.to_string()));

    if !projection.fixed_budgets.is_empty() {
        out.push_str("\nFixed category budgets\n");
        out.push_str(&format_share_table(&projection.fixed_budgets));
    }
    if !projection.flexible_budgets.is_empty() {
        out.push_str("\nFlexible category budgets\n");
        out.push_str(&format_share_table(&projection.flexible_budgets));
        out.push_str(&format!(
            "  Allocated       {:>12}\n  Unallocated     {:>12}\n",
            projection.total_allocated_flexible.to_string(),
            projection.unallocated_flexible.to_string(),
        ));
    }

    out
}

fn format_share_table(shares: &[CategoryBudgetShare]) -> String {
    let name_width = shares
        .iter()
        .map(|s| s.category.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<name_width$}  {:>12}  {:>9}\n",
        "Category", "Amount", "Share",
    ));
    out.push_str("  ");
    out.push_str(&separator(name_width + 2 + 12 + 2 + 9));
    out.push('\n');
    for s in shares {
        out.push_str(&format!(
            "  {:<name_width$}  {:>12}  {:>9}\n",
            s.category,
            s.amount.to_string(),
            format_opt_pct(s.share_of_budget),
        ));
    }
    out
}
