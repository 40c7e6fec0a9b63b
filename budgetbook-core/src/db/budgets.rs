//! Budget records: one planned amount per category.

use super::database::{classify_category_conflict, decimal_column, Database};
use crate::error::{Error, Result};
use crate::types::Budget;
use crate::validate;
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// CRUD over the `budgets` table.
#[derive(Debug, Clone)]
pub struct BudgetStore {
    db: Database,
}

impl BudgetStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a budget for a category that has none yet.
    ///
    /// Returns the new budget's id.
    pub fn set(&self, category: &str, amount: Decimal) -> Result<i64> {
        let category = validate::category(category)?;
        let amount = validate::amount_checked(amount)?;

        let id = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO budgets (category, amount) VALUES (?1, ?2)",
                params![category, amount.to_string()],
            )
            .map_err(|e| classify_category_conflict(e, &category))?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::debug!(id, category = %category, amount = %amount, "Budget set");
        Ok(id)
    }

    /// Overwrite the category and amount of an existing budget.
    pub fn update(&self, id: i64, category: &str, amount: Decimal) -> Result<()> {
        let category = validate::category(category)?;
        let amount = validate::amount_checked(amount)?;

        let changed = self.db.with_connection(|conn| {
            conn.execute(
                "UPDATE budgets SET category = ?1, amount = ?2 WHERE id = ?3",
                params![category, amount.to_string(), id],
            )
            .map_err(|e| classify_category_conflict(e, &category))
        })?;

        if changed == 0 {
            return Err(Error::NotFound {
                entity: "budget",
                id,
            });
        }

        tracing::debug!(id, category = %category, amount = %amount, "Budget updated");
        Ok(())
    }

    /// Permanently remove a budget.
    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self.db.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM budgets WHERE id = ?1", [id])?)
        })?;

        if changed == 0 {
            return Err(Error::NotFound {
                entity: "budget",
                id,
            });
        }

        tracing::debug!(id, "Budget deleted");
        Ok(())
    }

    /// Get a single budget by id
    pub fn get(&self, id: i64) -> Result<Option<Budget>> {
        self.db.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, category, amount FROM budgets WHERE id = ?1",
                    [id],
                    Self::row_to_budget,
                )
                .optional()?)
        })
    }

    /// All budgets, ordered by category.
    pub fn list(&self) -> Result<Vec<Budget>> {
        self.db.with_connection(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, category, amount FROM budgets ORDER BY category ASC")?;
            let budgets = stmt
                .query_map([], Self::row_to_budget)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(budgets)
        })
    }

    /// Budgets as a category -> amount map, for report building.
    pub fn as_mapping(&self) -> Result<BTreeMap<String, Decimal>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|b| (b.category, b.amount))
            .collect())
    }

    fn row_to_budget(row: &Row) -> rusqlite::Result<Budget> {
        Ok(Budget {
            id: row.get(0)?,
            category: row.get(1)?,
            amount: decimal_column(row, 2)?,
        })
    }
}
