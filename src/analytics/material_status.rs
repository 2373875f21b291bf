//! Material balance and stock status classification.
//!
//! A material's balance is the quantity purchased minus the quantity
//! consumed. The balance is then classified against the purchased quantity
//! to drive the low-stock and critical-stock warnings on the dashboard.

use rust_decimal::Decimal;

use crate::models::MaterialStatus;

/// Default fraction of the purchased quantity at or below which a material
/// is flagged as low stock (10%).
pub const DEFAULT_WARNING_RATIO: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Computes the balance of a material.
///
/// The result is negative when more has been consumed than purchased.
///
/// # Example
///
/// ```
/// use site_dashboard::analytics::compute_balance;
/// use rust_decimal::Decimal;
///
/// assert_eq!(compute_balance(Decimal::from(400), Decimal::from(420)), Decimal::from(-20));
/// ```
pub fn compute_balance(purchased: Decimal, consumed: Decimal) -> Decimal {
    purchased - consumed
}

/// Classifies a balance into a stock status.
///
/// - A negative balance is [`MaterialStatus::Critical`].
/// - A balance at or below `purchased * warning_ratio` is [`MaterialStatus::Warning`].
/// - Anything else is [`MaterialStatus::Good`].
///
/// A material with nothing purchased and nothing left is low stock.
///
/// # Examples
///
/// ```
/// use site_dashboard::analytics::{classify_material, DEFAULT_WARNING_RATIO};
/// use site_dashboard::models::MaterialStatus;
/// use rust_decimal::Decimal;
///
/// // 20 cubic metres of sand left out of 500 purchased
/// let status = classify_material(Decimal::from(20), Decimal::from(500), DEFAULT_WARNING_RATIO);
/// assert_eq!(status, MaterialStatus::Warning);
///
/// // 400 bags of cement left out of 2500 purchased
/// let status = classify_material(Decimal::from(400), Decimal::from(2500), DEFAULT_WARNING_RATIO);
/// assert_eq!(status, MaterialStatus::Good);
/// ```
pub fn classify_material(
    balance: Decimal,
    purchased: Decimal,
    warning_ratio: Decimal,
) -> MaterialStatus {
    if balance < Decimal::ZERO {
        MaterialStatus::Critical
    } else if balance <= purchased * warning_ratio {
        MaterialStatus::Warning
    } else {
        MaterialStatus::Good
    }
}
