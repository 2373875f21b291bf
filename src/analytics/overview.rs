//! Dashboard overview assembly.
//!
//! Combines the individual aggregates into the payload behind the stats
//! cards, the stock alerts banner and the recent expenses list.

use serde::Serialize;

use crate::models::{Expense, Material, Site, Vehicle};

use super::{
    BudgetTotals, ExpenseTotals, FleetSummary, MaterialAlerts, collect_material_alerts,
    summarize_budget, summarize_expenses, summarize_fleet,
};

/// Default number of expenses shown in the recent expenses list.
pub const DEFAULT_RECENT_EXPENSE_LIMIT: usize = 5;

/// Everything the overview tab displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    /// Site budget totals.
    pub budget: BudgetTotals,
    /// Expense totals.
    pub expenses: ExpenseTotals,
    /// Fleet counts.
    pub fleet: FleetSummary,
    /// Number of tracked materials.
    pub material_count: usize,
    /// Materials needing attention.
    pub material_alerts: MaterialAlerts,
    /// Site progress cards, in list order.
    pub sites: Vec<Site>,
    /// Most recent expenses, newest first.
    pub recent_expenses: Vec<Expense>,
}

/// Builds the overview for one tenant's records.
pub fn build_overview(
    sites: &[Site],
    materials: &[Material],
    expenses: &[Expense],
    vehicles: &[Vehicle],
    recent_limit: usize,
) -> DashboardOverview {
    DashboardOverview {
        budget: summarize_budget(sites),
        expenses: summarize_expenses(expenses),
        fleet: summarize_fleet(vehicles),
        material_count: materials.len(),
        material_alerts: collect_material_alerts(materials),
        sites: sites.to_vec(),
        recent_expenses: recent_expenses(expenses, recent_limit),
    }
}

/// Returns up to `limit` expenses ordered by date, newest first.
///
/// Expenses on the same date keep their list order.
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(limit).cloned().collect()
}
