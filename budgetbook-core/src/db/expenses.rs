//! Expense records.

use super::database::{date_column, decimal_column, Database};
use crate::error::{Error, Result};
use crate::types::{Expense, SortOrder};
use crate::validate;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::Decimal;

/// CRUD over the `expenses` table.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    db: Database,
}

impl ExpenseStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record an expense, returning its id.
    pub fn add(&self, date: NaiveDate, category: &str, amount: Decimal) -> Result<i64> {
        let date = validate::date_checked(date)?;
        let category = validate::category(category)?;
        let amount = validate::amount_checked(amount)?;

        let id = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO expenses (date, category, amount) VALUES (?1, ?2, ?3)",
                params![validate::date_text(date), category, amount.to_string()],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::debug!(id, %date, category = %category, amount = %amount, "Expense added");
        Ok(id)
    }

    /// Overwrite every field of an existing expense.
    pub fn update(&self, id: i64, date: NaiveDate, category: &str, amount: Decimal) -> Result<()> {
        let date = validate::date_checked(date)?;
        let category = validate::category(category)?;
        let amount = validate::amount_checked(amount)?;

        let changed = self.db.with_connection(|conn| {
            Ok(conn.execute(
                "UPDATE expenses SET date = ?1, category = ?2, amount = ?3 WHERE id = ?4",
                params![validate::date_text(date), category, amount.to_string(), id],
            )?)
        })?;

        if changed == 0 {
            return Err(Error::NotFound {
                entity: "expense",
                id,
            });
        }

        tracing::debug!(id, %date, category = %category, amount = %amount, "Expense updated");
        Ok(())
    }

    /// Permanently remove an expense.
    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self.db.with_connection(|conn| {
            Ok(conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?)
        })?;

        if changed == 0 {
            return Err(Error::NotFound {
                entity: "expense",
                id,
            });
        }

        tracing::debug!(id, "Expense deleted");
        Ok(())
    }

    /// Get a single expense by id
    pub fn get(&self, id: i64) -> Result<Option<Expense>> {
        self.db.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, date, category, amount FROM expenses WHERE id = ?1",
                    [id],
                    Self::row_to_expense,
                )
                .optional()?)
        })
    }

    /// All expenses ordered by date; ties are broken by id in the same direction.
    pub fn list(&self, order: SortOrder) -> Result<Vec<Expense>> {
        let sql = format!(
            "SELECT id, date, category, amount FROM expenses ORDER BY date {dir}, id {dir}",
            dir = order.as_sql()
        );

        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let expenses = stmt
                .query_map([], Self::row_to_expense)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(expenses)
        })
    }

    fn row_to_expense(row: &Row) -> rusqlite::Result<Expense> {
        Ok(Expense {
            id: row.get(0)?,
            date: date_column(row, 1)?,
            category: row.get(2)?,
            amount: decimal_column(row, 3)?,
        })
    }
}
