//! `status` command

use crate::config::{WorkspaceConfig, WorkspacePaths};
use crate::display::format_status;
use crate::engine::{aggregate, compute_metrics, resolve_plan};
use crate::error::CashplanResult;
use crate::storage::{load_plans, Ledger};

use super::PeriodArgs;

/// Show aggregates, cumulative metrics and category variance for a period
pub fn handle_status(paths: &WorkspacePaths, args: &PeriodArgs) -> CashplanResult<()> {
    let config = WorkspaceConfig::load(paths)?;
    let period = args.resolve(&config)?;

    let plans = load_plans(paths)?;
    let plan = resolve_plan(&period, &plans)?;
    let ledger = Ledger::load(paths)?;

    let summary = aggregate(&period, &ledger.transactions)?;
    let metrics = compute_metrics(&period, plan, &plans, &summary, &ledger.transactions)?;

    print!("{}", format_status(&summary, &metrics));
    Ok(())
}
