//! CLI command handlers
//!
//! Bridges clap argument parsing with the storage and engine layers. Each
//! command loads what it needs from the workspace, runs the engine, and
//! prints through the display layer.

pub mod budget;
pub mod import;
pub mod init;
pub mod status;
pub mod trend;

pub use budget::handle_budget;
pub use import::handle_import;
pub use init::handle_init;
pub use status::handle_status;
pub use trend::handle_trend;

use chrono::NaiveDate;
use clap::Args;

use crate::config::WorkspaceConfig;
use crate::error::{CashplanError, CashplanResult};
use crate::models::{Granularity, Period};

/// Period selection shared by the analysis commands
#[derive(Debug, Clone, Args)]
pub struct PeriodArgs {
    /// Period label, e.g. 2024-01, 2024-W03, 2024-Q1 or 2024 (overrides the
    /// other period options)
    #[arg(long)]
    pub period: Option<String>,

    /// Anchor date the period is resolved around (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Period granularity: day, week, month, quarter or year
    #[arg(long)]
    pub interval: Option<Granularity>,

    /// Start of a custom period (inclusive), requires --to
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// End of a custom period (exclusive), requires --from
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
}

impl PeriodArgs {
    /// Resolve the period these arguments describe
    ///
    /// Priority: explicit label, then custom range, then anchor date plus
    /// granularity (falling back to the workspace default interval).
    pub fn resolve(&self, config: &WorkspaceConfig) -> CashplanResult<Period> {
        if let Some(label) = &self.period {
            return Period::parse(label);
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            return Period::resolve(from, Granularity::Custom, Some((from, to)));
        }
        if self.interval == Some(Granularity::Custom) {
            return Err(CashplanError::Configuration(
                "custom interval requires --from and --to".into(),
            ));
        }
        let anchor = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let granularity = self.interval.unwrap_or(config.interval);
        Period::resolve(anchor, granularity, None)
    }
}
