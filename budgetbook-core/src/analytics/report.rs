//! Category totals and the two chart reports built from them.
//!
//! Everything here is a pure function of the expense and budget snapshots
//! passed in. Sums use `Decimal`, so totals do not depend on input order.

use crate::types::Expense;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sum expense amounts per category.
pub fn by_category(expenses: &[Expense]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_default() += expense.amount;
    }
    totals
}

/// One budget category with its planned and actual spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetComparison {
    pub category: String,
    pub budget: Decimal,
    pub actual: Decimal,
}

impl BudgetComparison {
    /// Budget left over; negative once spending passes the budget.
    pub fn remaining(&self) -> Decimal {
        self.budget - self.actual
    }

    pub fn is_over_budget(&self) -> bool {
        self.actual > self.budget
    }
}

/// Pair each budget with what was actually spent in its category.
///
/// Only budgeted categories appear. A budgeted category with no expenses
/// reports an actual of zero. Rows follow the budgets' category order.
pub fn budget_vs_actual(
    expenses: &[Expense],
    budgets: &BTreeMap<String, Decimal>,
) -> Vec<BudgetComparison> {
    let totals = by_category(expenses);
    budgets
        .iter()
        .map(|(category, budget)| BudgetComparison {
            category: category.clone(),
            budget: *budget,
            actual: totals.get(category).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// A single pie slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub category: String,
    pub total: Decimal,
    /// Percentage of the grand total, 0-100
    pub share: f64,
}

/// Per-category share of all expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub total: Decimal,
    pub slices: Vec<DistributionSlice>,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Build the expense distribution, one slice per category in category order.
pub fn distribution(expenses: &[Expense]) -> Distribution {
    let totals = by_category(expenses);
    let total: Decimal = totals.values().copied().sum();
    let hundred = Decimal::ONE_HUNDRED;

    let slices = totals
        .into_iter()
        .map(|(category, amount)| {
            let share = if total.is_zero() {
                0.0
            } else {
                (amount * hundred / total).to_f64().unwrap_or(0.0)
            };
            DistributionSlice {
                category,
                total: amount,
                share,
            }
        })
        .collect();

    Distribution { total, slices }
}
