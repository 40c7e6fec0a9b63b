//! # budgetbook-core
//!
//! Core library for budgetbook - personal budgets and expense tracking.
//!
//! This library provides:
//! - Domain types for budgets and expenses
//! - SQLite storage with one store per table
//! - Category totals and chart reports
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use budgetbook_core::{Aggregator, BudgetStore, Config, Database};
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::from_config(&config).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let budgets = BudgetStore::new(db.clone());
//! budgets.set("Food", "250".parse().unwrap()).expect("failed to set budget");
//!
//! let report = Aggregator::for_database(&db).budget_vs_actual().unwrap();
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{Aggregator, BudgetComparison, Distribution, DistributionSlice};
pub use config::Config;
pub use db::{BudgetStore, Database, ExpenseStore};
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;
pub mod validate;
