//! Expense aggregation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Expense, ExpenseCategory};

/// Totals over a list of expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseTotals {
    /// Number of expenses summed.
    pub count: usize,
    /// Sum of all amounts.
    pub total: Decimal,
    /// Sum of approved amounts.
    pub approved: Decimal,
    /// Sum of amounts awaiting approval.
    pub pending: Decimal,
    /// Number of expenses awaiting approval.
    pub pending_count: usize,
    /// Sum per category. Categories with no expenses are absent.
    pub by_category: BTreeMap<ExpenseCategory, Decimal>,
}

/// Sums expenses by approval state and category. Sums saturate at
/// `Decimal::MAX`.
pub fn summarize_expenses(expenses: &[Expense]) -> ExpenseTotals {
    let mut totals = ExpenseTotals {
        count: expenses.len(),
        total: Decimal::ZERO,
        approved: Decimal::ZERO,
        pending: Decimal::ZERO,
        pending_count: 0,
        by_category: BTreeMap::new(),
    };

    for expense in expenses {
        totals.total = totals.total.saturating_add(expense.amount);
        if expense.approved {
            totals.approved = totals.approved.saturating_add(expense.amount);
        } else {
            totals.pending = totals.pending.saturating_add(expense.amount);
            totals.pending_count += 1;
        }
        let by_category = totals
            .by_category
            .entry(expense.category)
            .or_insert(Decimal::ZERO);
        *by_category = by_category.saturating_add(expense.amount);
    }

    totals
}
