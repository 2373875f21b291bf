//! Forms for materials, expenses and vehicles, and update payloads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    ExpenseCategory, NewExpense, NewMaterial, NewVehicle, SiteStatus, VehicleStatus,
};

use super::ValidationErrors;

/// Largest amount, quantity or fuel figure any form accepts.
///
/// Keeps tenant-wide sums far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

fn required_text(
    value: &Option<String>,
    field: &str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            errors.add(field, message);
            None
        }
    }
}

fn non_negative(
    value: Option<Decimal>,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<Decimal> {
    match value {
        Some(v) if v < Decimal::ZERO => {
            errors.add(field, format!("{} cannot be negative", label));
            None
        }
        Some(v) => within_limit(v, field, label, errors),
        None => None,
    }
}

pub(super) fn within_limit(
    value: Decimal,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<Decimal> {
    if value > MAX_AMOUNT {
        errors.add(field, format!("{} is too large", label));
        None
    } else {
        Some(value)
    }
}

/// Input for a new material.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialForm {
    /// Display name.
    pub name: Option<String>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Opening purchased quantity. Defaults to zero.
    pub purchased: Option<Decimal>,
    /// Opening consumed quantity. Defaults to zero.
    pub consumed: Option<Decimal>,
}

impl MaterialForm {
    /// Validates the form. Quantities may be omitted but not negative.
    pub fn validate(&self) -> Result<NewMaterial, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_text(&self.name, "name", "Material name is required", &mut errors);
        let unit = required_text(&self.unit, "unit", "Unit is required", &mut errors);
        let purchased = non_negative(self.purchased, "purchased", "Purchased quantity", &mut errors);
        let consumed = non_negative(self.consumed, "consumed", "Consumed quantity", &mut errors);

        match (name, unit) {
            (Some(name), Some(unit)) if errors.is_empty() => Ok(NewMaterial {
                name,
                unit,
                purchased: purchased.unwrap_or(Decimal::ZERO),
                consumed: consumed.unwrap_or(Decimal::ZERO),
            }),
            _ => Err(errors),
        }
    }
}

/// A purchase or consumption entry against an existing material.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantityForm {
    /// Quantity in the material's unit.
    pub quantity: Option<Decimal>,
}

impl QuantityForm {
    /// The quantity, which must be present, greater than zero and at most
    /// [`MAX_AMOUNT`].
    pub fn validate(&self) -> Result<Decimal, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match self.quantity {
            Some(q) if q > Decimal::ZERO => {
                if let Some(q) = within_limit(q, "quantity", "Quantity", &mut errors) {
                    return Ok(q);
                }
            }
            Some(_) => errors.add("quantity", "Quantity must be greater than zero"),
            None => errors.add("quantity", "Quantity is required"),
        }
        Err(errors)
    }
}

/// Input for a new expense.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// What the money was spent on.
    pub description: Option<String>,
    /// Amount spent.
    pub amount: Option<Decimal>,
    /// Spending category.
    pub category: Option<ExpenseCategory>,
    /// Date incurred. Defaults to today.
    pub date: Option<NaiveDate>,
    /// Name of the site.
    pub site: Option<String>,
}

impl ExpenseForm {
    /// Validates the form, filling a missing date with `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<NewExpense, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let description = required_text(
            &self.description,
            "description",
            "Description is required",
            &mut errors,
        );
        let site = required_text(&self.site, "site", "Site is required", &mut errors);

        let amount = match self.amount {
            Some(a) if a > Decimal::ZERO => within_limit(a, "amount", "Amount", &mut errors),
            Some(_) => {
                errors.add("amount", "Amount must be greater than zero");
                None
            }
            None => {
                errors.add("amount", "Amount is required");
                None
            }
        };
        if self.category.is_none() {
            errors.add("category", "Category is required");
        }

        match (description, site, amount, self.category) {
            (Some(description), Some(site), Some(amount), Some(category)) if errors.is_empty() => {
                Ok(NewExpense {
                    description,
                    amount,
                    category,
                    date: self.date.unwrap_or(today),
                    site,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Input for a new vehicle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleForm {
    /// Display name.
    pub name: Option<String>,
    /// Kind of vehicle.
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    /// Name of the site.
    pub site: Option<String>,
    /// Operating status. Defaults to idle.
    pub status: Option<VehicleStatus>,
    /// Fuel consumption in litres per hour. Defaults to zero.
    pub fuel_consumption: Option<Decimal>,
    /// Date of the last service. Defaults to today.
    pub last_service: Option<NaiveDate>,
}

impl VehicleForm {
    /// Validates the form, filling a missing service date with `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<NewVehicle, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_text(&self.name, "name", "Vehicle name is required", &mut errors);
        let vehicle_type =
            required_text(&self.vehicle_type, "type", "Vehicle type is required", &mut errors);
        let site = required_text(&self.site, "site", "Site is required", &mut errors);
        let fuel = non_negative(
            self.fuel_consumption,
            "fuel_consumption",
            "Fuel consumption",
            &mut errors,
        );

        match (name, vehicle_type, site) {
            (Some(name), Some(vehicle_type), Some(site)) if errors.is_empty() => Ok(NewVehicle {
                name,
                vehicle_type,
                site,
                status: self.status.unwrap_or(VehicleStatus::Idle),
                fuel_consumption: fuel.unwrap_or(Decimal::ZERO),
                last_service: self.last_service.unwrap_or(today),
            }),
            _ => Err(errors),
        }
    }
}

/// Changes to an existing site. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteUpdate {
    /// New completion percentage, 0 to 100. Read as a wide integer so that
    /// any out-of-range value is reported as a field error.
    pub progress: Option<i64>,
    /// New lifecycle status.
    pub status: Option<SiteStatus>,
    /// New spent amount.
    pub spent: Option<Decimal>,
    /// New budget.
    pub budget: Option<Decimal>,
    /// New planned end date.
    pub end_date: Option<NaiveDate>,
    /// New site manager.
    pub manager: Option<String>,
}

impl SiteUpdate {
    /// Checks ranges. A site update with no fields is accepted and changes nothing.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.progress.is_some_and(|p| !(0..=100).contains(&p)) {
            errors.add("progress", "Progress must be between 0 and 100");
        }
        non_negative(self.spent, "spent", "Spent amount", &mut errors);
        non_negative(self.budget, "budget", "Budget", &mut errors);
        if self.manager.as_deref().is_some_and(|m| m.trim().is_empty()) {
            errors.add("manager", "Manager name is required");
        }
        errors.into_result(())
    }
}

/// Changes to an existing vehicle. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleUpdate {
    /// New operating status.
    pub status: Option<VehicleStatus>,
    /// New site allocation.
    pub site: Option<String>,
    /// New fuel consumption figure.
    pub fuel_consumption: Option<Decimal>,
    /// New last service date.
    pub last_service: Option<NaiveDate>,
}

impl VehicleUpdate {
    /// Checks the site name and fuel figure.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.site.as_deref().is_some_and(|s| s.trim().is_empty()) {
            errors.add("site", "Site is required");
        }
        non_negative(
            self.fuel_consumption,
            "fuel_consumption",
            "Fuel consumption",
            &mut errors,
        );
        errors.into_result(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 21).unwrap()
    }

    #[test]
    fn test_material_form_defaults_quantities_to_zero() {
        let form = MaterialForm {
            name: Some("Bricks".to_string()),
            unit: Some("Pieces".to_string()),
            ..MaterialForm::default()
        };
        let material = form.validate().unwrap();
        assert_eq!(material.purchased, Decimal::ZERO);
        assert_eq!(material.consumed, Decimal::ZERO);
    }

    #[test]
    fn test_material_form_rejects_negative_and_missing() {
        let form = MaterialForm {
            name: Some("  ".to_string()),
            unit: None,
            purchased: Some(Decimal::from(-1)),
            consumed: Some(Decimal::from(5)),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("purchased"), Some("Purchased quantity cannot be negative"));
    }

    #[test]
    fn test_material_form_allows_consumed_above_purchased() {
        let form = MaterialForm {
            name: Some("Aggregate".to_string()),
            unit: Some("Cubic Meters".to_string()),
            purchased: Some(Decimal::from(400)),
            consumed: Some(Decimal::from(420)),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert_eq!(
            QuantityForm { quantity: Some(Decimal::from(3)) }.validate(),
            Ok(Decimal::from(3))
        );
        let errors = QuantityForm { quantity: Some(Decimal::ZERO) }.validate().unwrap_err();
        assert_eq!(errors.get("quantity"), Some("Quantity must be greater than zero"));
        let errors = QuantityForm::default().validate().unwrap_err();
        assert_eq!(errors.get("quantity"), Some("Quantity is required"));
    }

    #[test]
    fn test_quantity_above_limit_is_rejected() {
        let huge = Decimal::from_str("79228162514264337593543950335").unwrap();
        let errors = QuantityForm { quantity: Some(huge) }.validate().unwrap_err();
        assert_eq!(errors.get("quantity"), Some("Quantity is too large"));

        assert_eq!(
            QuantityForm { quantity: Some(MAX_AMOUNT) }.validate(),
            Ok(MAX_AMOUNT)
        );
    }

    #[test]
    fn test_limit_is_one_quadrillion() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000i64));
    }

    #[test]
    fn test_expense_form_defaults_date() {
        let form = ExpenseForm {
            description: Some("Diesel top-up".to_string()),
            amount: Some(Decimal::from(15_000)),
            category: Some(ExpenseCategory::Fuel),
            date: None,
            site: Some("Downtown Project".to_string()),
        };
        let expense = form.validate(today()).unwrap();
        assert_eq!(expense.date, today());
    }

    #[test]
    fn test_expense_form_reports_every_problem() {
        let form = ExpenseForm {
            amount: Some(Decimal::ZERO),
            ..ExpenseForm::default()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains("description"));
        assert!(errors.contains("site"));
        assert!(errors.contains("category"));
        assert_eq!(errors.get("amount"), Some("Amount must be greater than zero"));
    }

    #[test]
    fn test_vehicle_form_defaults() {
        let form: VehicleForm = serde_json::from_str(
            r#"{"name": "Tipper TP-04", "type": "Tipper", "site": "Downtown Project"}"#,
        )
        .unwrap();
        let vehicle = form.validate(today()).unwrap();
        assert_eq!(vehicle.vehicle_type, "Tipper");
        assert_eq!(vehicle.status, VehicleStatus::Idle);
        assert_eq!(vehicle.last_service, today());
    }

    #[test]
    fn test_site_update_progress_range() {
        let update = SiteUpdate {
            progress: Some(101),
            ..SiteUpdate::default()
        };
        assert!(update.validate().unwrap_err().contains("progress"));

        let update = SiteUpdate {
            progress: Some(100),
            ..SiteUpdate::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_site_update_wide_progress_values_are_field_errors() {
        for body in [r#"{"progress": 300}"#, r#"{"progress": -1}"#] {
            let update: SiteUpdate = serde_json::from_str(body).unwrap();
            let errors = update.validate().unwrap_err();
            assert_eq!(
                errors.get("progress"),
                Some("Progress must be between 0 and 100")
            );
        }
    }

    #[test]
    fn test_site_update_amounts_above_limit_are_rejected() {
        let update = SiteUpdate {
            spent: Some(Decimal::from_str("1000000000000000000000000000").unwrap()),
            budget: Some(MAX_AMOUNT + Decimal::ONE),
            ..SiteUpdate::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(errors.get("spent"), Some("Spent amount is too large"));
        assert_eq!(errors.get("budget"), Some("Budget is too large"));
    }

    #[test]
    fn test_vehicle_fuel_above_limit_is_rejected() {
        let update = VehicleUpdate {
            fuel_consumption: Some(MAX_AMOUNT * Decimal::TEN),
            ..VehicleUpdate::default()
        };
        assert_eq!(
            update.validate().unwrap_err().get("fuel_consumption"),
            Some("Fuel consumption is too large")
        );
    }

    #[test]
    fn test_vehicle_update_rejects_blank_site() {
        let update = VehicleUpdate {
            site: Some(" ".to_string()),
            ..VehicleUpdate::default()
        };
        assert!(update.validate().unwrap_err().contains("site"));
    }
}
