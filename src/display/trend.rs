//! Trend report formatting

use crate::engine::{TrendLine, TrendReport};

use super::{format_opt_money, format_opt_pct, separator};

/// Format the trend report: buckets first, then categories
pub fn format_trends(report: &TrendReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Trends for {} (moving average over {} prior period{})\n\n",
        report.period,
        report.periods_used,
        if report.periods_used == 1 { "" } else { "s" },
    ));

    if report.periods_used == 0 {
        out.push_str("No prior periods; import more history to see trends.\n");
        return out;
    }

    out.push_str("Buckets\n");
    out.push_str(&format_line_table(&report.buckets));

    if !report.categories.is_empty() {
        out.push_str("\nCategories\n");
        out.push_str(&format_line_table(&report.categories));
    }

    out
}

fn format_line_table(lines: &[TrendLine]) -> String {
    let name_width = lines
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<name_width$}  {:>12}  {:>12}  {:>12}  {:>9}  {}\n",
        "Name", "Current", "Average", "Variance", "Var %", "Trend",
    ));
    out.push_str("  ");
    out.push_str(&separator(name_width + 2 + 12 + 2 + 12 + 2 + 12 + 2 + 9 + 2 + 10));
    out.push('\n');
    for line in lines {
        out.push_str(&format!(
            "  {:<name_width$}  {:>12}  {:>12}  {:>12}  {:>9}  {}\n",
            line.name,
            line.current.to_string(),
            format_opt_money(line.moving_average),
            format_opt_money(line.variance),
            format_opt_pct(line.variance_pct),
            line.trend,
        ));
    }
    out
}
