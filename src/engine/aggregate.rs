//! Period aggregation
//!
//! Folds a transaction set into per-bucket and per-category totals for one
//! period. Pure function of its inputs: aggregating the same set twice
//! yields an identical summary.

use std::collections::BTreeMap;

use tracing::debug;

use super::classify::{classify, Bucket};
use crate::error::CashplanResult;
use crate::models::{Money, Period, PeriodSummary, Transaction};

/// Aggregate the transactions of one period into a summary
///
/// Transactions outside `[period.start, period.end)` are ignored, so callers
/// may pass a pre-filtered slice or the whole ledger. Outflow bucket totals
/// (deductions, fixed, flexible) are positive magnitudes; income is the
/// signed inflow sum.
///
/// Savings overlay: every `is_savings` row contributes the negation of its
/// amount to `total_savings`, regardless of its primary bucket — a `-500.00`
/// transfer into savings accrues `+500.00`, a withdrawal back to cash
/// reduces the total.
pub fn aggregate(period: &Period, transactions: &[Transaction]) -> CashplanResult<PeriodSummary> {
    let mut total_income = Money::zero();
    let mut total_deductions = Money::zero();
    let mut total_fixed = Money::zero();
    let mut total_flexible = Money::zero();
    let mut total_savings = Money::zero();

    let mut spent_by_category: BTreeMap<String, Money> = BTreeMap::new();
    let mut fixed_by_category: BTreeMap<String, Money> = BTreeMap::new();

    let mut count = 0usize;
    let mut last_date = None;

    for tx in transactions {
        if !period.contains(tx.date) {
            continue;
        }
        let bucket = classify(tx)?;

        count += 1;
        if last_date.map_or(true, |d| tx.date > d) {
            last_date = Some(tx.date);
        }

        // Overlay dimension, independent of the primary bucket
        if tx.is_savings {
            total_savings += -tx.amount;
        }

        match bucket {
            Bucket::Income => total_income += tx.amount,
            Bucket::Deduction => total_deductions += tx.amount.abs(),
            Bucket::Fixed => {
                let magnitude = tx.amount.abs();
                total_fixed += magnitude;
                *fixed_by_category
                    .entry(tx.category.clone())
                    .or_insert(Money::zero()) += magnitude;
            }
            Bucket::Flexible => {
                let magnitude = tx.amount.abs();
                total_flexible += magnitude;
                *spent_by_category
                    .entry(tx.category.clone())
                    .or_insert(Money::zero()) += magnitude;
            }
            Bucket::Savings => {}
        }
    }

    debug!(
        period = %period,
        transactions = count,
        %total_income,
        %total_flexible,
        "aggregated period"
    );

    Ok(PeriodSummary {
        period: period.key(),
        period_start: period.start(),
        period_end: period.end(),
        total_income,
        total_deductions,
        total_fixed,
        total_flexible,
        total_savings,
        spent_by_category,
        fixed_by_category,
        transaction_count: count,
        last_transaction_date: last_date,
    })
}
