//! Derived figures for the site dashboard.
//!
//! This module contains the material balance and stock status rule, the
//! budget, expense and fleet aggregates, material alerts, free-text search
//! and the assembly of the overview payload.

mod alerts;
mod budget;
mod expense_totals;
mod fleet;
mod material_status;
mod overview;
mod search;

pub use alerts::{MaterialAlerts, collect_material_alerts};
pub use budget::{BudgetTotals, summarize_budget};
pub use expense_totals::{ExpenseTotals, summarize_expenses};
pub use fleet::{FleetSummary, summarize_fleet};
pub use material_status::{DEFAULT_WARNING_RATIO, classify_material, compute_balance};
pub use overview::{
    DEFAULT_RECENT_EXPENSE_LIMIT, DashboardOverview, build_overview, recent_expenses,
};
pub use search::{Searchable, filter_by_search};
