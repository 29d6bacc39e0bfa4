//! Historical trend analysis
//!
//! Compares the current period against the moving average of the periods
//! preceding it, per category and per top-level bucket.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{Money, PeriodSummary};

/// Variance above this percentage classifies as Increasing
pub const INCREASE_THRESHOLD_PCT: i64 = 20;
/// Variance below the negation of this percentage classifies as Decreasing
pub const DECREASE_THRESHOLD_PCT: i64 = 20;

/// Trend classification for one series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    /// No prior periods exist to average over
    InsufficientHistory,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Increasing => "Increasing",
            Self::Decreasing => "Decreasing",
            Self::Stable => "Stable",
            Self::InsufficientHistory => "insufficient history",
        };
        write!(f, "{s}")
    }
}

/// One analyzed series: a category or a top-level bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendLine {
    pub name: String,
    /// Value in the current (most recent) period
    pub current: Money,
    /// Average of up to `window` periods strictly preceding the current one;
    /// `None` when no prior period exists
    pub moving_average: Option<Money>,
    /// current - moving_average
    pub variance: Option<Money>,
    /// variance / moving_average as a percentage; `None` when the average is
    /// zero or undefined
    pub variance_pct: Option<Decimal>,
    pub trend: Trend,
}

/// Trend report across buckets and categories for the most recent period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Canonical key of the period being compared against history
    pub period: String,
    /// Requested window size
    pub window: usize,
    /// Prior periods actually used (min(window, available))
    pub periods_used: usize,
    pub buckets: Vec<TrendLine>,
    pub categories: Vec<TrendLine>,
}

/// Analyze a history of period summaries, ordered oldest to newest
///
/// The last element is the current period; the moving average uses up to
/// `window` periods strictly preceding it (the current period never blends
/// into its own baseline). With zero prior periods every series reports
/// `InsufficientHistory`; this is never an error.
pub fn analyze(history: &[PeriodSummary], window: usize) -> TrendReport {
    let window = window.max(1);
    let Some((current, prior_all)) = history.split_last() else {
        return TrendReport {
            period: String::new(),
            window,
            periods_used: 0,
            buckets: Vec::new(),
            categories: Vec::new(),
        };
    };
    let start = prior_all.len().saturating_sub(window);
    let prior = &prior_all[start..];

    let buckets = [
        ("income", income_of as fn(&PeriodSummary) -> Money),
        ("deductions", |s: &PeriodSummary| s.total_deductions),
        ("fixed", |s: &PeriodSummary| s.total_fixed),
        ("flexible", |s: &PeriodSummary| s.total_flexible),
        ("savings", |s: &PeriodSummary| s.total_savings),
    ]
    .into_iter()
    .map(|(name, value)| trend_line(name, value(current), prior.iter().map(value)))
    .collect();

    let mut names: BTreeSet<&str> = current.spent_by_category.keys().map(String::as_str).collect();
    for summary in prior {
        names.extend(summary.spent_by_category.keys().map(String::as_str));
    }
    let categories = names
        .into_iter()
        .map(|name| {
            let value = |s: &PeriodSummary| {
                s.spent_by_category
                    .get(name)
                    .copied()
                    .unwrap_or(Money::zero())
            };
            trend_line(name, value(current), prior.iter().map(value))
        })
        .collect();

    TrendReport {
        period: current.period.clone(),
        window,
        periods_used: prior.len(),
        buckets,
        categories,
    }
}

fn income_of(s: &PeriodSummary) -> Money {
    s.total_income
}

fn trend_line(name: &str, current: Money, prior: impl Iterator<Item = Money>) -> TrendLine {
    let values: Vec<Money> = prior.collect();
    if values.is_empty() {
        return TrendLine {
            name: name.to_string(),
            current,
            moving_average: None,
            variance: None,
            variance_pct: None,
            trend: Trend::InsufficientHistory,
        };
    }

    let sum: Money = values.iter().copied().sum();
    let average = Money::new(sum.amount() / Decimal::from(values.len()));
    let variance = current - average;
    let variance_pct = variance.percent_of(average);
    let trend = classify_trend(variance, variance_pct);

    TrendLine {
        name: name.to_string(),
        current,
        moving_average: Some(average),
        variance: Some(variance),
        variance_pct,
        trend,
    }
}

/// Classify a variance against the fixed thresholds
///
/// With a zero average the percentage is undefined; the classification then
/// falls back to the sign of the absolute variance so it stays total.
fn classify_trend(variance: Money, variance_pct: Option<Decimal>) -> Trend {
    match variance_pct {
        Some(pct) if pct > Decimal::from(INCREASE_THRESHOLD_PCT) => Trend::Increasing,
        Some(pct) if pct < -Decimal::from(DECREASE_THRESHOLD_PCT) => Trend::Decreasing,
        Some(_) => Trend::Stable,
        None => {
            if variance.is_positive() {
                Trend::Increasing
            } else if variance.is_negative() {
                Trend::Decreasing
            } else {
                Trend::Stable
            }
        }
    }
}
