//! Budget plan storage
//!
//! Plans live as one YAML file each under `plans/`. Loading validates every
//! plan and returns the set sorted by `valid_from`, oldest first.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::WorkspacePaths;
use crate::error::{CashplanError, CashplanResult};
use crate::models::BudgetPlan;

/// Load and validate every plan in the workspace
pub fn load_plans(paths: &WorkspacePaths) -> CashplanResult<Vec<BudgetPlan>> {
    let dir = paths.plans_dir();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut plans = Vec::new();
    let mut entries: Vec<_> = std::fs::read_dir(&dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| is_yaml(p))
        .collect();
    entries.sort();

    for path in entries {
        let plan = load_plan_file(&path)?;
        debug!(plan = %plan.id, file = %path.display(), "loaded plan");
        plans.push(plan);
    }

    plans.sort_by_key(|p| p.valid_from);
    Ok(plans)
}

/// Load and validate a single plan file
pub fn load_plan_file(path: &Path) -> CashplanResult<BudgetPlan> {
    let contents = std::fs::read_to_string(path)?;
    let plan: BudgetPlan = serde_yaml::from_str(&contents).map_err(|e| {
        CashplanError::Configuration(format!("invalid plan file {}: {e}", path.display()))
    })?;
    for warning in plan.validate()? {
        warn!(plan = %plan.id, file = %path.display(), "{warning}");
    }
    Ok(plan)
}

/// Write a plan into the workspace as `plans/<id>.yaml`
pub fn save_plan(paths: &WorkspacePaths, plan: &BudgetPlan) -> CashplanResult<()> {
    plan.validate()?;
    paths.ensure_directories()?;
    let contents = serde_yaml::to_string(plan)?;
    std::fs::write(paths.plans_dir().join(format!("{}.yaml", plan.id)), contents)?;
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, SavingsBase};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn plan(id: &str, from: NaiveDate) -> BudgetPlan {
        BudgetPlan {
            id: id.into(),
            valid_from: from,
            valid_to: None,
            gross_income: Money::new(dec!(5000)),
            deductions: vec![],
            fixed_expenses: vec![],
            savings_rate: dec!(0.20),
            savings_base: SavingsBase::NetIncome,
            savings_amount: None,
            category_budgets: vec![],
        }
    }

    #[test]
    fn test_save_then_load_sorted_by_valid_from() {
        let temp = TempDir::new().unwrap();
        let paths = WorkspacePaths::new(temp.path());

        save_plan(&paths, &plan("later", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())).unwrap();
        save_plan(&paths, &plan("earlier", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())).unwrap();

        let plans = load_plans(&paths).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].id, "earlier");
        assert_eq!(plans[1].id, "later");
    }

    #[test]
    fn test_empty_workspace_yields_no_plans() {
        let temp = TempDir::new().unwrap();
        let paths = WorkspacePaths::new(temp.path());
        assert!(load_plans(&paths).unwrap().is_empty());
    }

    #[test]
    fn test_non_yaml_files_ignored() {
        let temp = TempDir::new().unwrap();
        let paths = WorkspacePaths::new(temp.path());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.plans_dir().join("notes.txt"), "not a plan").unwrap();
        assert!(load_plans(&paths).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_plan_is_a_configuration_error() {
        let temp = TempDir::new().unwrap();
        let paths = WorkspacePaths::new(temp.path());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.plans_dir().join("bad.yaml"), "gross_income: [oops").unwrap();
        let err = load_plans(&paths).unwrap_err();
        assert!(matches!(err, CashplanError::Configuration(_)));
    }

    #[test]
    fn test_invalid_plan_rejected_at_save() {
        let temp = TempDir::new().unwrap();
        let paths = WorkspacePaths::new(temp.path());
        let mut bad = plan("bad", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        bad.gross_income = Money::new(dec!(-1));
        assert!(save_plan(&paths, &bad).is_err());
    }
}
