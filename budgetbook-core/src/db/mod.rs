//! Database layer for budgetbook
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - A per-call connection handle
//! - One store per table

pub mod budgets;
pub mod database;
pub mod expenses;
pub mod schema;

pub use budgets::BudgetStore;
pub use database::Database;
pub use expenses::ExpenseStore;
