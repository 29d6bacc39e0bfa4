//! Analysis engine
//!
//! Pure computation over transactions and plans: classification,
//! aggregation, plan resolution, cumulative metrics and trend analysis.
//! Nothing in here touches the filesystem; the storage layer feeds it and
//! the CLI renders its output.

pub mod aggregate;
pub mod calculator;
pub mod classify;
pub mod plan_resolver;
pub mod trends;

pub use aggregate::aggregate;
pub use calculator::{compute_metrics, project_budget, BudgetProjection, Metrics};
pub use classify::{classify, Bucket};
pub use plan_resolver::{resolve_plan, resolve_plan_for_date};
pub use trends::{analyze, Trend, TrendLine, TrendReport};

use crate::models::Granularity;

/// Parameters an analysis run is evaluated under
///
/// Passed explicitly to every entry point instead of being read from
/// process-wide state, so two runs with different settings can never bleed
/// into each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisContext {
    /// Currency all stored amounts are denominated in
    pub base_currency: String,
    /// Period granularity the run slices time by
    pub granularity: Granularity,
    /// Moving-average window for trend analysis, in periods
    pub window: usize,
}

impl AnalysisContext {
    pub fn new(base_currency: impl Into<String>, granularity: Granularity, window: usize) -> Self {
        Self {
            base_currency: base_currency.into(),
            granularity,
            window: window.max(1),
        }
    }
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::new("EUR", Granularity::Month, 3)
    }
}
