//! Status report formatting
//!
//! Renders the period summary, the plan waterfall, the cumulative position
//! and the per-category variance table.

use crate::engine::Metrics;
use crate::models::PeriodSummary;

use super::{format_opt_pct, separator};

/// Format the full status report for one period
pub fn format_status(summary: &PeriodSummary, metrics: &Metrics) -> String {
    let mut out = String::new();

    out.push_str(&format!("Status for {}\n", metrics.period));
    out.push_str(&format!("Plan: {}\n\n", metrics.plan_id));

    out.push_str("This period\n");
    out.push_str(&format!("  Income          {:>12}\n", summary.total_income.to_string()));
    out.push_str(&format!("  Deductions      {:>12}\n", summary.total_deductions.to_string()));
    out.push_str(&format!("  Fixed           {:>12}\n", summary.total_fixed.to_string()));
    out.push_str(&format!("  Flexible        {:>12}\n", summary.total_flexible.to_string()));
    out.push_str(&format!("  Saved           {:>12}\n", summary.total_savings.to_string()));
    out.push_str(&format!("  Transactions    {:>12}\n\n", summary.transaction_count));

    out.push_str("Plan waterfall\n");
    out.push_str(&format!("  Gross income    {:>12}\n", metrics.gross_income.to_string()));
    out.push_str(&format!("  Net income      {:>12}\n", metrics.net_income.to_string()));
    out.push_str(&format!("  Savings target  {:>12}\n", metrics.savings_target.to_string()));
    out.push_str(&format!("  Disposable      {:>12}\n\n", metrics.disposable_income.to_string()));

    out.push_str("Cumulative position\n");
    out.push_str(&format!("  Balance         {:>12}\n", metrics.cumulative_balance.to_string()));
    out.push_str(&format!("  Saved           {:>12}\n", metrics.cumulative_savings.to_string()));
    out.push_str(&format!("  Savings target  {:>12}\n", metrics.cumulative_savings_target.to_string()));
    out.push_str(&format!("  Surplus         {:>12}\n", metrics.savings_surplus.to_string()));
    out.push_str(&format!("  Cash on hand    {:>12}\n", metrics.cash_on_hand.to_string()));
    out.push_str(&format!("  Uncovered       {:>12}\n", metrics.uncovered_savings.to_string()));
    let coverage = if metrics.can_cover { "yes" } else { "NO" };
    out.push_str(&format!("  Can cover       {:>12}\n", coverage));
    out.push_str(&format!("  Discretionary   {:>12}\n", metrics.true_discretionary.to_string()));

    if !metrics.categories.is_empty() {
        out.push('\n');
        out.push_str(&format_category_table(metrics));
    }

    out
}

fn format_category_table(metrics: &Metrics) -> String {
    let name_width = metrics
        .categories
        .iter()
        .map(|c| c.category.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>9}\n",
        "Category", "Actual", "Planned", "Variance", "Progress",
    ));
    out.push_str(&separator(name_width + 2 + 12 + 2 + 12 + 2 + 12 + 2 + 9));
    out.push('\n');

    for c in &metrics.categories {
        let marker = if c.is_over_budget() { " !" } else { "" };
        out.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>9}{marker}\n",
            c.category,
            c.actual.to_string(),
            c.planned.to_string(),
            c.variance.to_string(),
            format_opt_pct(c.progress),
        ));
    }
    out
}
