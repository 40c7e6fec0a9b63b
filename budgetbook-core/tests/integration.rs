//! Integration tests for the budgetbook stores and reports
//!
//! Each test works against a fresh SQLite file in a temporary directory,
//! going through the public API the way a front end would.

use budgetbook_core::validate::{parse_amount, parse_date};
use budgetbook_core::{Aggregator, BudgetStore, Database, Error, ExpenseStore, SortOrder};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tempfile::TempDir;

struct TestEnv {
    _temp_dir: TempDir,
    db: Database,
}

impl TestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db = Database::open(&temp_dir.path().join("budgetbook.db"))
            .expect("failed to open database");
        db.migrate().expect("failed to migrate");
        Self {
            _temp_dir: temp_dir,
            db,
        }
    }

    fn budgets(&self) -> BudgetStore {
        BudgetStore::new(self.db.clone())
    }

    fn expenses(&self) -> ExpenseStore {
        ExpenseStore::new(self.db.clone())
    }
}

fn amount(s: &str) -> Decimal {
    parse_amount(s).unwrap()
}

// ============================================
// Budgets
// ============================================

#[test]
fn test_budget_lifecycle() {
    let env = TestEnv::new();
    let budgets = env.budgets();

    let food = budgets.set("Food", amount("100")).unwrap();
    let rent = budgets.set("Rent", amount("900")).unwrap();
    assert_ne!(food, rent);

    let err = budgets.set("Food", amount("1")).unwrap_err();
    assert!(matches!(err, Error::DuplicateCategory(_)));
    assert_eq!(budgets.get(food).unwrap().unwrap().amount, amount("100"));

    budgets.update(food, "Food", amount("150")).unwrap();
    assert_eq!(budgets.as_mapping().unwrap()["Food"], amount("150"));

    budgets.delete(rent).unwrap();
    let remaining: Vec<_> = budgets
        .list()
        .unwrap()
        .into_iter()
        .map(|b| b.category)
        .collect();
    assert_eq!(remaining, vec!["Food"]);

    assert!(matches!(
        budgets.update(rent, "Rent", amount("1")),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_stores_share_one_file_without_interfering() {
    let env = TestEnv::new();

    env.budgets().set("Food", amount("100")).unwrap();
    env.expenses()
        .add(parse_date("2024-01-01").unwrap(), "Food", amount("10"))
        .unwrap();

    // Deleting a budget does not touch expenses in that category.
    let id = env.budgets().list().unwrap()[0].id;
    env.budgets().delete(id).unwrap();
    assert_eq!(env.expenses().list(SortOrder::Ascending).unwrap().len(), 1);
}

#[test]
fn test_reopen_keeps_data() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("budgetbook.db");

    {
        let db = Database::open(&path).unwrap();
        db.migrate().unwrap();
        BudgetStore::new(db).set("Food", amount("42.42")).unwrap();
    }

    let db = Database::open(&path).unwrap();
    db.migrate().unwrap();
    let budgets = BudgetStore::new(db).list().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].amount, amount("42.42"));
}

// ============================================
// Expenses
// ============================================

#[test]
fn test_expense_round_trip() {
    let env = TestEnv::new();
    let expenses = env.expenses();
    let date = parse_date("2024-02-29").unwrap();

    let id = expenses.add(date, "Groceries", amount("57.3")).unwrap();

    let listed = expenses.list(SortOrder::Descending).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].date, date);
    assert_eq!(listed[0].category, "Groceries");
    assert_eq!(listed[0].amount, amount("57.30"));
}

#[test]
fn test_expense_list_orders_are_mirrors() {
    let env = TestEnv::new();
    let expenses = env.expenses();
    for (date, category, value) in [
        ("2024-01-03", "Rent", "20"),
        ("2024-01-01", "Food", "10"),
        ("2024-01-02", "Food", "5"),
        ("2024-01-02", "Fuel", "30"),
    ] {
        expenses
            .add(parse_date(date).unwrap(), category, amount(value))
            .unwrap();
    }

    let ascending = expenses.list(SortOrder::Ascending).unwrap();
    let mut descending = expenses.list(SortOrder::Descending).unwrap();

    assert_eq!(ascending.first().unwrap().category, "Food");
    assert_eq!(descending.first().unwrap().category, "Rent");
    descending.reverse();
    assert_eq!(ascending, descending);
}

// ============================================
// Reports
// ============================================

#[test]
fn test_budget_vs_actual_excludes_unbudgeted_categories() {
    let env = TestEnv::new();
    env.budgets().set("Food", amount("100")).unwrap();
    let expenses = env.expenses();
    expenses
        .add(parse_date("2024-01-01").unwrap(), "Food", amount("10"))
        .unwrap();
    expenses
        .add(parse_date("2024-01-02").unwrap(), "Food", amount("5"))
        .unwrap();
    expenses
        .add(parse_date("2024-01-03").unwrap(), "Rent", amount("20"))
        .unwrap();

    let rows = Aggregator::for_database(&env.db).budget_vs_actual().unwrap();

    let triples: Vec<_> = rows
        .iter()
        .map(|r| (r.category.as_str(), r.budget, r.actual))
        .collect();
    assert_eq!(triples, vec![("Food", amount("100"), amount("15"))]);
}

#[test]
fn test_distribution_matches_by_category() {
    let env = TestEnv::new();
    let expenses = env.expenses();
    expenses
        .add(parse_date("2024-01-03").unwrap(), "Rent", amount("20"))
        .unwrap();
    expenses
        .add(parse_date("2024-01-01").unwrap(), "Food", amount("10"))
        .unwrap();
    expenses
        .add(parse_date("2024-01-02").unwrap(), "Food", amount("5"))
        .unwrap();

    let dist = Aggregator::for_database(&env.db).distribution().unwrap();
    let totals: BTreeMap<_, _> = dist
        .slices
        .iter()
        .map(|s| (s.category.clone(), s.total))
        .collect();

    let snapshot = expenses.list(SortOrder::Descending).unwrap();
    assert_eq!(totals, budgetbook_core::analytics::by_category(&snapshot));
    assert_eq!(dist.total, amount("35"));
}

#[test]
fn test_validation_leaves_tables_untouched() {
    let env = TestEnv::new();

    assert!(env.budgets().set("", amount("1")).unwrap_err().is_validation());
    assert!(parse_amount("abc").unwrap_err().is_validation());
    assert!(parse_date("").unwrap_err().is_validation());
    assert!(env
        .expenses()
        .add(parse_date("2024-01-01").unwrap(), "", amount("1"))
        .unwrap_err()
        .is_validation());

    assert!(env.budgets().list().unwrap().is_empty());
    assert!(env.expenses().list(SortOrder::Ascending).unwrap().is_empty());
}

#[test]
fn test_domain_types_serialize() {
    let env = TestEnv::new();
    env.expenses()
        .add(parse_date("2024-05-01").unwrap(), "Books", amount("12"))
        .unwrap();

    let expense = &env.expenses().list(SortOrder::Ascending).unwrap()[0];
    let json = serde_json::to_value(expense).unwrap();
    assert_eq!(json["date"], "2024-05-01");
    assert_eq!(json["category"], "Books");
    assert_eq!(json["amount"], "12.00");
}
