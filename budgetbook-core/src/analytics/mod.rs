//! Analytics module for budgetbook
//!
//! Turns budget and expense snapshots into the data behind the two charts:
//! - Expense distribution by category (pie chart)
//! - Budget vs. actual spending by category (grouped bar chart)

pub mod aggregator;
pub mod report;

pub use aggregator::Aggregator;
pub use report::{
    budget_vs_actual, by_category, distribution, BudgetComparison, Distribution,
    DistributionSlice,
};
