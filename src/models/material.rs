//! Material model and stock status.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{classify_material, compute_balance};
use crate::error::DashboardResult;
use crate::validation::ValidationErrors;

/// Stock classification derived from a material's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialStatus {
    /// Comfortable stock.
    Good,
    /// Low stock, reorder soon.
    Warning,
    /// More consumed than purchased.
    Critical,
}

/// A tracked construction material.
///
/// `balance` and `status` are derived from `purchased` and `consumed`; use
/// [`Material::new`] or [`Material::recompute`] rather than setting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier for the material.
    pub id: String,
    /// Display name (e.g., "Cement").
    pub name: String,
    /// Unit of measure (e.g., "Bags").
    pub unit: String,
    /// Total quantity purchased.
    pub purchased: Decimal,
    /// Total quantity consumed.
    pub consumed: Decimal,
    /// `purchased - consumed`.
    pub balance: Decimal,
    /// Stock classification of `balance`.
    pub status: MaterialStatus,
    /// Date of the last purchase or consumption entry.
    pub last_updated: NaiveDate,
}

/// A validated material ready to be stored, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaterial {
    /// Display name.
    pub name: String,
    /// Unit of measure.
    pub unit: String,
    /// Opening purchased quantity.
    pub purchased: Decimal,
    /// Opening consumed quantity.
    pub consumed: Decimal,
}

impl NewMaterial {
    /// Builds the stored material, deriving balance and status.
    pub fn into_material(self, id: String, today: NaiveDate, warning_ratio: Decimal) -> Material {
        Material::new(
            id,
            self.name,
            self.unit,
            self.purchased,
            self.consumed,
            today,
            warning_ratio,
        )
    }
}

impl Material {
    /// Creates a material with balance and status derived from the quantities.
    pub fn new(
        id: String,
        name: String,
        unit: String,
        purchased: Decimal,
        consumed: Decimal,
        last_updated: NaiveDate,
        warning_ratio: Decimal,
    ) -> Self {
        let mut material = Material {
            id,
            name,
            unit,
            purchased,
            consumed,
            balance: Decimal::ZERO,
            status: MaterialStatus::Good,
            last_updated,
        };
        material.recompute(warning_ratio);
        material
    }

    /// Re-derives `balance` and `status` from the current quantities.
    pub fn recompute(&mut self, warning_ratio: Decimal) {
        self.balance = compute_balance(self.purchased, self.consumed);
        self.status = classify_material(self.balance, self.purchased, warning_ratio);
    }

    /// Records a purchase of `quantity` units on `date`.
    ///
    /// Fails with a `quantity` field error, leaving the material unchanged,
    /// if the new total cannot be represented.
    pub fn record_purchase(
        &mut self,
        quantity: Decimal,
        date: NaiveDate,
        warning_ratio: Decimal,
    ) -> DashboardResult<()> {
        self.purchased = add_quantity(self.purchased, quantity)?;
        self.last_updated = date;
        self.recompute(warning_ratio);
        Ok(())
    }

    /// Records consumption of `quantity` units on `date`. Fails like
    /// [`Material::record_purchase`].
    pub fn record_consumption(
        &mut self,
        quantity: Decimal,
        date: NaiveDate,
        warning_ratio: Decimal,
    ) -> DashboardResult<()> {
        self.consumed = add_quantity(self.consumed, quantity)?;
        self.last_updated = date;
        self.recompute(warning_ratio);
        Ok(())
    }
}

fn add_quantity(total: Decimal, quantity: Decimal) -> DashboardResult<Decimal> {
    total.checked_add(quantity).ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add("quantity", "Quantity is too large");
        errors.into()
    })
}
