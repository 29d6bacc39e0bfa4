//! `budget` command

use crate::config::{WorkspaceConfig, WorkspacePaths};
use crate::display::format_budget;
use crate::engine::{project_budget, resolve_plan};
use crate::error::CashplanResult;
use crate::storage::load_plans;

use super::PeriodArgs;

/// Show the projected budget for a period, from the plan alone
pub fn handle_budget(paths: &WorkspacePaths, args: &PeriodArgs) -> CashplanResult<()> {
    let config = WorkspaceConfig::load(paths)?;
    let period = args.resolve(&config)?;

    let plans = load_plans(paths)?;
    let plan = resolve_plan(&period, &plans)?;

    let projection = project_budget(&period, plan);
    print!("{}", format_budget(&projection));
    Ok(())
}
