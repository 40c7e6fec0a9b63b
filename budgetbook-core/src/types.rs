//! Core domain types for budgetbook
//!
//! | Term | Definition |
//! |------|------------|
//! | **Category** | Free-text label shared by budgets and expenses (no foreign key) |
//! | **Budget** | Planned amount for one category; at most one per category |
//! | **Expense** | A dated amount spent in some category |

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Planned spending for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    /// Unique across all budgets
    pub category: String,
    pub amount: Decimal,
}

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    /// Need not match any budget category
    pub category: String,
    pub amount: Decimal,
}

/// Ordering for expense listings.
///
/// Display wants the newest expenses first; report building reads them
/// oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// SQL keyword for ORDER BY clauses
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}
