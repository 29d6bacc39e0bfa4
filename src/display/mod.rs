//! Terminal output formatting
//!
//! Plain-text tables and summaries for the CLI commands. All money is
//! rendered through [`crate::models::Money`]'s Display; undefined values
//! (zero-base percentages, missing averages) render as `n/a`.

pub mod budget;
pub mod status;
pub mod trend;

pub use budget::format_budget;
pub use status::format_status;
pub use trend::format_trends;

use rust_decimal::Decimal;

use crate::models::Money;

/// Render an optional money value, `n/a` when undefined
pub fn format_opt_money(value: Option<Money>) -> String {
    match value {
        Some(m) => m.to_string(),
        None => "n/a".to_string(),
    }
}

/// Render an optional percentage with two decimals, `n/a` when undefined
pub fn format_opt_pct(value: Option<Decimal>) -> String {
    match value {
        Some(pct) => format!("{:.2}%", pct.round_dp(2)),
        None => "n/a".to_string(),
    }
}

/// Separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}
