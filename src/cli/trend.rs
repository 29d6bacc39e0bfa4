//! `trend` command

use crate::config::{WorkspaceConfig, WorkspacePaths};
use crate::display::format_trends;
use crate::engine::{aggregate, analyze, AnalysisContext};
use crate::error::CashplanResult;
use crate::models::{Period, PeriodSummary, Transaction};
use crate::storage::Ledger;

use super::PeriodArgs;

/// Show moving-average trends up to the selected period
pub fn handle_trend(
    paths: &WorkspacePaths,
    args: &PeriodArgs,
    window: Option<usize>,
) -> CashplanResult<()> {
    let config = WorkspaceConfig::load(paths)?;
    let period = args.resolve(&config)?;
    let ctx = AnalysisContext::new(
        &config.base_currency,
        args.interval.unwrap_or(config.interval),
        window.unwrap_or(config.analysis_window),
    );

    let ledger = Ledger::load(paths)?;
    let history = build_history(&period, &ledger.transactions)?;
    let report = analyze(&history, ctx.window);

    print!("{}", format_trends(&report));
    Ok(())
}

/// Aggregate every period from the first ledger entry through `current`,
/// oldest first
pub fn build_history(
    current: &Period,
    transactions: &[Transaction],
) -> CashplanResult<Vec<PeriodSummary>> {
    let first_date = transactions.iter().map(|tx| tx.date).min();
    let mut periods = vec![current.clone()];
    if let Some(first) = first_date {
        let mut cursor = current.clone();
        while cursor.start() > first {
            cursor = cursor.prev();
            periods.push(cursor.clone());
        }
    }
    periods.reverse();

    periods
        .iter()
        .map(|p| aggregate(p, transactions))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(y: i32, m: u32, d: u32, amount: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Money::parse(amount).unwrap(),
            "EUR",
            "food",
            "",
        )
    }

    #[test]
    fn test_history_spans_ledger_to_current() {
        let txs = vec![tx(2024, 1, 10, "-100"), tx(2024, 3, 5, "-200")];
        let current = Period::Month { year: 2024, month: 4 };
        let history = build_history(&current, &txs).unwrap();
        let keys: Vec<&str> = history.iter().map(|s| s.period.as_str()).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
        // gap month aggregates to zero
        assert!(history[1].total_flexible.is_zero());
        assert_eq!(history[2].total_flexible, Money::new(dec!(200)));
    }

    #[test]
    fn test_empty_ledger_yields_only_current() {
        let current = Period::Month { year: 2024, month: 4 };
        let history = build_history(&current, &[]).unwrap();
        assert_eq!(history.len(), 1);
    }
}
