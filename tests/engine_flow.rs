//! End-to-end flow through the library: initialize a workspace, store a
//! plan, import a statement, and check the derived metrics.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use cashplan::config::WorkspacePaths;
use cashplan::engine::{aggregate, analyze, compute_metrics, resolve_plan};
use cashplan::import::read_statement;
use cashplan::models::{
    BudgetPlan, CategoryBudget, Deduction, FixedExpense, Money, Period, SavingsBase,
};
use cashplan::storage::{load_plans, save_plan, Ledger, RateTable};

const STATEMENT: &str = "\
date,amount,currency,category,description,is_savings,is_deduction,is_fixed
2024-01-02,5000.00,EUR,salary,January payroll,false,false,false
2024-01-03,-1000.00,EUR,tax,withholding,false,true,false
2024-01-05,-800.00,EUR,housing,rent,false,false,true
2024-01-10,-500.00,EUR,savings,monthly transfer,true,false,false
2024-01-15,-450.00,EUR,food,groceries,false,false,false
";

fn reference_plan() -> BudgetPlan {
    BudgetPlan {
        id: "2024".into(),
        valid_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        valid_to: None,
        gross_income: Money::new(dec!(5000.00)),
        deductions: vec![
            Deduction { name: "income tax".into(), amount: Money::new(dec!(1000.00)) },
            Deduction { name: "social security".into(), amount: Money::new(dec!(200.00)) },
        ],
        fixed_expenses: vec![FixedExpense {
            name: "rent".into(),
            amount: Money::new(dec!(950.00)),
            category: Some("housing".into()),
        }],
        savings_rate: dec!(0.20),
        savings_base: SavingsBase::NetIncome,
        savings_amount: None,
        category_budgets: vec![CategoryBudget {
            category: "food".into(),
            amount: Money::new(dec!(400.00)),
            is_fixed: false,
        }],
    }
}

#[test]
fn full_flow_from_statement_to_metrics() {
    let temp = TempDir::new().unwrap();
    let paths = WorkspacePaths::new(temp.path());
    paths.ensure_directories().unwrap();

    save_plan(&paths, &reference_plan()).unwrap();

    let csv_path = temp.path().join("jan.csv");
    std::fs::write(&csv_path, STATEMENT).unwrap();
    let rates = RateTable::load(&paths, "EUR").unwrap();
    let batch = read_statement(&csv_path, &rates).unwrap();

    let mut ledger = Ledger::load(&paths).unwrap();
    let outcome = ledger.import_batch(batch.transactions, &batch.content_hash);
    assert_eq!(outcome.added, 5);
    ledger.save(&paths).unwrap();

    let period = Period::Month { year: 2024, month: 1 };
    let plans = load_plans(&paths).unwrap();
    let plan = resolve_plan(&period, &plans).unwrap();

    let summary = aggregate(&period, &ledger.transactions).unwrap();
    assert_eq!(summary.total_income, Money::new(dec!(5000.00)));
    assert_eq!(summary.total_deductions, Money::new(dec!(1000.00)));
    assert_eq!(summary.total_fixed, Money::new(dec!(800.00)));
    assert_eq!(summary.total_flexible, Money::new(dec!(450.00)));
    assert_eq!(summary.total_savings, Money::new(dec!(500.00)));

    let metrics =
        compute_metrics(&period, plan, &plans, &summary, &ledger.transactions).unwrap();

    // plan waterfall
    assert_eq!(metrics.net_income, Money::new(dec!(3800.00)));
    assert_eq!(metrics.savings_target, Money::new(dec!(760.00)));
    assert_eq!(metrics.disposable_income, Money::new(dec!(2090.00)));

    // cumulative side: balance excludes the savings transfer
    assert_eq!(metrics.cumulative_balance, Money::new(dec!(2750.00)));
    assert_eq!(metrics.cumulative_savings, Money::new(dec!(500.00)));
    assert_eq!(metrics.cash_on_hand, Money::new(dec!(2250.00)));
    assert_eq!(metrics.uncovered_savings, Money::new(dec!(260.00)));
    assert!(metrics.can_cover);
    assert_eq!(metrics.true_discretionary, Money::new(dec!(1990.00)));

    // category variance: food 450 actual vs 400 planned
    let food = metrics.categories.iter().find(|c| c.category == "food").unwrap();
    assert_eq!(food.variance, Money::new(dec!(-50.00)));
    assert_eq!(food.progress, Some(dec!(112.5)));
    assert!(food.is_over_budget());
}

#[test]
fn reimport_is_idempotent_and_metrics_are_stable() {
    let temp = TempDir::new().unwrap();
    let paths = WorkspacePaths::new(temp.path());
    paths.ensure_directories().unwrap();
    save_plan(&paths, &reference_plan()).unwrap();

    let csv_path = temp.path().join("jan.csv");
    std::fs::write(&csv_path, STATEMENT).unwrap();
    let rates = RateTable::load(&paths, "EUR").unwrap();

    let mut ledger = Ledger::load(&paths).unwrap();
    for _ in 0..3 {
        let batch = read_statement(&csv_path, &rates).unwrap();
        ledger.import_batch(batch.transactions, &batch.content_hash);
    }
    assert_eq!(ledger.transactions.len(), 5);
    assert_eq!(ledger.imported_batches.len(), 1);
}

#[test]
fn trend_history_across_months() {
    let temp = TempDir::new().unwrap();
    let paths = WorkspacePaths::new(temp.path());
    paths.ensure_directories().unwrap();

    let mut statements = String::from(
        "date,amount,currency,category,description,is_savings,is_deduction,is_fixed\n",
    );
    for (month, amount) in [(1, "-100.00"), (2, "-100.00"), (3, "-100.00"), (4, "-300.00")] {
        statements.push_str(&format!("2024-{month:02}-10,{amount},EUR,food,,false,false,false\n"));
    }
    let csv_path = temp.path().join("all.csv");
    std::fs::write(&csv_path, &statements).unwrap();

    let rates = RateTable::load(&paths, "EUR").unwrap();
    let batch = read_statement(&csv_path, &rates).unwrap();
    let mut ledger = Ledger::load(&paths).unwrap();
    ledger.import_batch(batch.transactions, &batch.content_hash);

    let current = Period::Month { year: 2024, month: 4 };
    let history = cashplan::cli::trend::build_history(&current, &ledger.transactions).unwrap();
    assert_eq!(history.len(), 4);

    let report = analyze(&history, 3);
    let food = report.categories.iter().find(|l| l.name == "food").unwrap();
    assert_eq!(food.moving_average, Some(Money::new(dec!(100.00))));
    assert_eq!(food.variance_pct, Some(dec!(200.00)));
    assert_eq!(food.trend, cashplan::engine::Trend::Increasing);
}
