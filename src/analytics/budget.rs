//! Budget aggregation across sites.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{Site, SiteStatus};

/// Budget totals over a list of sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTotals {
    /// Number of sites summed.
    pub site_count: usize,
    /// Number of sites with status `active`.
    pub active_sites: usize,
    /// Sum of site budgets.
    pub total_budget: Decimal,
    /// Sum of amounts spent.
    pub total_spent: Decimal,
    /// `total_budget - total_spent`.
    pub remaining: Decimal,
    /// Spent as a percentage of budget, one decimal place. `None` when the
    /// total budget is zero.
    pub utilization_percent: Option<Decimal>,
}

/// Sums budgets and spending over `sites` in a single pass.
///
/// Sums saturate at `Decimal::MAX` instead of overflowing, and utilization is
/// `None` when it cannot be represented.
///
/// # Example
///
/// ```
/// use site_dashboard::analytics::summarize_budget;
/// use rust_decimal::Decimal;
///
/// let totals = summarize_budget(&[]);
/// assert_eq!(totals.total_budget, Decimal::ZERO);
/// assert_eq!(totals.utilization_percent, None);
/// ```
pub fn summarize_budget(sites: &[Site]) -> BudgetTotals {
    let mut total_budget = Decimal::ZERO;
    let mut total_spent = Decimal::ZERO;
    let mut active_sites = 0;

    for site in sites {
        total_budget = total_budget.saturating_add(site.budget);
        total_spent = total_spent.saturating_add(site.spent);
        if site.status == SiteStatus::Active {
            active_sites += 1;
        }
    }

    let utilization_percent = total_spent
        .checked_div(total_budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero));

    BudgetTotals {
        site_count: sites.len(),
        active_sites,
        total_budget,
        total_spent,
        remaining: total_budget.saturating_sub(total_spent),
        utilization_percent,
    }
}
