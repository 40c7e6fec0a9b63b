//! Plain-text tables and charts for terminal output.

use budgetbook_core::format::{format_amount, format_share};
use budgetbook_core::{Budget, BudgetComparison, Distribution, Expense};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt::Write;

/// Width of the longest bar in a chart, in characters.
const BAR_WIDTH: usize = 40;

/// Bar for `value` scaled so that `max` fills [`BAR_WIDTH`].
fn bar(value: Decimal, max: Decimal, fill: char) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let ratio = (value / max).to_f64().unwrap_or(0.0).clamp(0.0, 1.0);
    let len = (ratio * BAR_WIDTH as f64).round() as usize;
    // Non-zero values stay visible.
    std::iter::repeat(fill).take(len.max(1)).collect()
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(str::len).chain([header.len()]).max().unwrap_or(0)
}

pub fn render_budgets(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let amounts: Vec<String> = budgets.iter().map(|b| format_amount(b.amount)).collect();
    let cat_w = column_width("Category", budgets.iter().map(|b| b.category.as_str()));
    let amt_w = column_width("Budget Amount", amounts.iter().map(String::as_str));

    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<cat_w$}  {:>amt_w$}", "ID", "Category", "Budget Amount");
    for (budget, amount) in budgets.iter().zip(&amounts) {
        let _ = writeln!(
            out,
            "{:>4}  {:<cat_w$}  {:>amt_w$}",
            budget.id, budget.category, amount
        );
    }
    out
}

pub fn render_expenses(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let amounts: Vec<String> = expenses.iter().map(|e| format_amount(e.amount)).collect();
    let cat_w = column_width("Category", expenses.iter().map(|e| e.category.as_str()));
    let amt_w = column_width("Amount", amounts.iter().map(String::as_str));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<10}  {:<cat_w$}  {:>amt_w$}",
        "ID", "Date", "Category", "Amount"
    );
    for (expense, amount) in expenses.iter().zip(&amounts) {
        let _ = writeln!(
            out,
            "{:>4}  {:<10}  {:<cat_w$}  {:>amt_w$}",
            expense.id,
            expense.date.to_string(),
            expense.category,
            amount
        );
    }
    out
}

/// Pie-chart data drawn as one proportional bar per category.
pub fn render_distribution(dist: &Distribution) -> String {
    let mut out = String::from("Expense Distribution by Category\n\n");
    if dist.is_empty() {
        out.push_str("No expenses recorded.\n");
        return out;
    }

    let totals: Vec<String> = dist.slices.iter().map(|s| format_amount(s.total)).collect();
    let grand_total = format_amount(dist.total);
    let cat_w = column_width("Total", dist.slices.iter().map(|s| s.category.as_str()));
    let amt_w = column_width(&grand_total, totals.iter().map(String::as_str));

    for (slice, total) in dist.slices.iter().zip(&totals) {
        let _ = writeln!(
            out,
            "{:<cat_w$}  {:>amt_w$}  {:>6}  {}",
            slice.category,
            total,
            format_share(slice.share),
            bar(slice.total, dist.total, '#')
        );
    }
    let _ = writeln!(out, "{:<cat_w$}  {:>amt_w$}", "Total", grand_total);
    out
}

/// Budget and actual bars side by side for each budgeted category.
pub fn render_comparison(rows: &[BudgetComparison]) -> String {
    let mut out = String::from("Budget vs Actual Expenses by Category\n\n");
    if rows.is_empty() {
        out.push_str("No budgets set.\n");
        return out;
    }

    let max = rows
        .iter()
        .flat_map(|r| [r.budget, r.actual])
        .max()
        .unwrap_or(Decimal::ZERO);
    let amt_w = rows
        .iter()
        .flat_map(|r| [format_amount(r.budget).len(), format_amount(r.actual).len()])
        .max()
        .unwrap_or(0);

    for row in rows {
        let _ = write!(out, "{}", row.category);
        if row.is_over_budget() {
            let _ = write!(
                out,
                "  (over budget by {})",
                format_amount(-row.remaining())
            );
        }
        out.push('\n');
        let _ = writeln!(
            out,
            "  budget  {:>amt_w$}  {}",
            format_amount(row.budget),
            bar(row.budget, max, '#')
        );
        let _ = writeln!(
            out,
            "  actual  {:>amt_w$}  {}",
            format_amount(row.actual),
            bar(row.actual, max, '=')
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use budgetbook_core::analytics::{budget_vs_actual, distribution};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn expense(id: i64, category: &str, amount: &str) -> Expense {
        Expense {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, id as u32).unwrap(),
            category: category.to_string(),
            amount: dec(amount),
        }
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(dec("10"), dec("10"), '#').len(), BAR_WIDTH);
        assert_eq!(bar(dec("5"), dec("10"), '#').len(), BAR_WIDTH / 2);
        assert_eq!(bar(dec("0.0001"), dec("10"), '#').len(), 1);
        assert!(bar(Decimal::ZERO, dec("10"), '#').is_empty());
        assert!(bar(dec("5"), Decimal::ZERO, '#').is_empty());
    }

    #[test]
    fn test_render_budgets() {
        let budgets = vec![Budget {
            id: 3,
            category: "Food".to_string(),
            amount: dec("1250"),
        }];

        let out = render_budgets(&budgets);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Category"));
        assert!(lines[1].contains("Food"));
        assert!(lines[1].contains("1,250.00"));
        assert_eq!(render_budgets(&[]), "No budgets set.\n");
    }

    #[test]
    fn test_render_expenses() {
        let out = render_expenses(&[expense(2, "Rent", "20")]);
        assert!(out.contains("2024-01-02"));
        assert!(out.contains("Rent"));
        assert!(out.contains("20.00"));
    }

    #[test]
    fn test_render_distribution() {
        let dist = distribution(&[
            expense(1, "Food", "10"),
            expense(2, "Food", "5"),
            expense(3, "Rent", "20"),
        ]);

        let out = render_distribution(&dist);
        assert!(out.contains("42.9%"));
        assert!(out.contains("57.1%"));
        assert!(out.contains("35.00"));

        let empty = render_distribution(&distribution(&[]));
        assert!(empty.contains("No expenses recorded."));
    }

    #[test]
    fn test_render_comparison_flags_overspend() {
        let budgets = BTreeMap::from([
            ("Food".to_string(), dec("100")),
            ("Rent".to_string(), dec("15")),
        ]);
        let rows = budget_vs_actual(
            &[expense(1, "Food", "15"), expense(2, "Rent", "20")],
            &budgets,
        );

        let out = render_comparison(&rows);
        assert!(out.contains("Rent  (over budget by 5.00)"));
        assert!(!out.contains("Food  (over budget"));
        assert_eq!(out.matches("  budget  ").count(), 2);
        assert_eq!(out.matches("  actual  ").count(), 2);
    }
}
