//! Reports pulled straight from the stores.

use super::report::{self, BudgetComparison, Distribution};
use crate::db::{BudgetStore, Database, ExpenseStore};
use crate::error::Result;
use crate::types::SortOrder;

/// Builds chart reports from fresh store snapshots.
///
/// Nothing is cached; each call reads both tables again.
#[derive(Debug, Clone)]
pub struct Aggregator {
    budgets: BudgetStore,
    expenses: ExpenseStore,
}

impl Aggregator {
    pub fn new(budgets: BudgetStore, expenses: ExpenseStore) -> Self {
        Self { budgets, expenses }
    }

    /// Aggregator over both tables of one database.
    pub fn for_database(db: &Database) -> Self {
        Self::new(BudgetStore::new(db.clone()), ExpenseStore::new(db.clone()))
    }

    /// Pie-chart data over every recorded expense.
    pub fn distribution(&self) -> Result<Distribution> {
        let expenses = self.expenses.list(SortOrder::Ascending)?;
        let dist = report::distribution(&expenses);
        tracing::debug!(
            categories = dist.slices.len(),
            total = %dist.total,
            "Built expense distribution"
        );
        Ok(dist)
    }

    /// Budget vs. actual rows, one per budgeted category.
    pub fn budget_vs_actual(&self) -> Result<Vec<BudgetComparison>> {
        let expenses = self.expenses.list(SortOrder::Ascending)?;
        let budgets = self.budgets.as_mapping()?;
        let rows = report::budget_vs_actual(&expenses, &budgets);
        tracing::debug!(categories = rows.len(), "Built budget comparison");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{parse_amount, parse_date};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("test.db")).unwrap();
        db.migrate().unwrap();
        (dir, db)
    }

    #[test]
    fn test_reports_see_latest_writes() {
        let (_dir, db) = setup();
        let aggregator = Aggregator::for_database(&db);
        let expenses = ExpenseStore::new(db.clone());
        let budgets = BudgetStore::new(db.clone());

        assert!(aggregator.distribution().unwrap().is_empty());
        assert!(aggregator.budget_vs_actual().unwrap().is_empty());

        budgets.set("Food", parse_amount("100").unwrap()).unwrap();
        expenses
            .add(
                parse_date("2024-01-01").unwrap(),
                "Food",
                parse_amount("15").unwrap(),
            )
            .unwrap();
        expenses
            .add(
                parse_date("2024-01-03").unwrap(),
                "Rent",
                parse_amount("20").unwrap(),
            )
            .unwrap();

        let rows = aggregator.budget_vs_actual().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Food");
        assert_eq!(rows[0].budget, parse_amount("100").unwrap());
        assert_eq!(rows[0].actual, parse_amount("15").unwrap());

        let dist = aggregator.distribution().unwrap();
        assert_eq!(dist.slices.len(), 2);
        assert_eq!(dist.total, parse_amount("35").unwrap());
    }
}
