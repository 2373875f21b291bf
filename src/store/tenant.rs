//! One tenant's records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::{DashboardOverview, build_overview};
use crate::config::SeedData;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    Expense, Material, NewExpense, NewMaterial, NewSite, NewVehicle, Site, Vehicle,
};
use crate::validation::{SiteUpdate, VehicleUpdate};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(entity: &'static str, id: &str) -> DashboardError {
    DashboardError::NotFound {
        entity,
        id: id.to_string(),
    }
}

/// The sites, materials, expenses and vehicles of a single tenant.
///
/// Lists keep insertion order. Records refer to sites by name only, so
/// removing a site leaves its expenses and vehicles in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantData {
    /// Construction sites.
    pub sites: Vec<Site>,
    /// Tracked materials.
    pub materials: Vec<Material>,
    /// Recorded expenses.
    pub expenses: Vec<Expense>,
    /// Vehicles and machinery.
    pub vehicles: Vec<Vehicle>,
}

impl From<&SeedData> for TenantData {
    fn from(seed: &SeedData) -> Self {
        Self {
            sites: seed.sites.clone(),
            materials: seed.materials.clone(),
            expenses: seed.expenses.clone(),
            vehicles: seed.vehicles.clone(),
        }
    }
}

impl TenantData {
    /// Builds the overview payload.
    pub fn overview(&self, recent_limit: usize) -> DashboardOverview {
        build_overview(
            &self.sites,
            &self.materials,
            &self.expenses,
            &self.vehicles,
            recent_limit,
        )
    }

    // Sites

    /// Looks up a site by id.
    pub fn site(&self, id: &str) -> DashboardResult<&Site> {
        self.sites
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("site", id))
    }

    /// Stores a new site and returns it.
    pub fn add_site(&mut self, new_site: NewSite) -> Site {
        let site = new_site.into_site(new_id());
        self.sites.push(site.clone());
        site
    }

    /// Applies `update` to a site. The update must already be validated.
    pub fn update_site(&mut self, id: &str, update: &SiteUpdate) -> DashboardResult<Site> {
        let site = self
            .sites
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("site", id))?;

        if let Some(progress) = update.progress {
            site.progress = u8::try_from(progress.clamp(0, 100)).unwrap_or(100);
        }
        if let Some(status) = update.status {
            site.status = status;
        }
        if let Some(spent) = update.spent {
            site.spent = spent;
        }
        if let Some(budget) = update.budget {
            site.budget = budget;
        }
        if let Some(end_date) = update.end_date {
            site.end_date = end_date;
        }
        if let Some(manager) = &update.manager {
            site.manager = manager.trim().to_string();
        }
        Ok(site.clone())
    }

    /// Removes a site and returns it.
    pub fn remove_site(&mut self, id: &str) -> DashboardResult<Site> {
        let index = self
            .sites
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found("site", id))?;
        Ok(self.sites.remove(index))
    }

    // Materials

    /// Looks up a material by id.
    pub fn material(&self, id: &str) -> DashboardResult<&Material> {
        self.materials
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("material", id))
    }

    fn material_mut(&mut self, id: &str) -> DashboardResult<&mut Material> {
        self.materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("material", id))
    }

    /// Stores a new material and returns it.
    pub fn add_material(
        &mut self,
        new_material: NewMaterial,
        today: NaiveDate,
        warning_ratio: Decimal,
    ) -> Material {
        let material = new_material.into_material(new_id(), today, warning_ratio);
        self.materials.push(material.clone());
        material
    }

    /// Adds a purchase to a material.
    pub fn record_purchase(
        &mut self,
        id: &str,
        quantity: Decimal,
        today: NaiveDate,
        warning_ratio: Decimal,
    ) -> DashboardResult<Material> {
        let material = self.material_mut(id)?;
        material.record_purchase(quantity, today, warning_ratio)?;
        Ok(material.clone())
    }

    /// Adds consumption to a material. Consuming more than is in stock is
    /// allowed and turns the material critical.
    pub fn record_consumption(
        &mut self,
        id: &str,
        quantity: Decimal,
        today: NaiveDate,
        warning_ratio: Decimal,
    ) -> DashboardResult<Material> {
        let material = self.material_mut(id)?;
        material.record_consumption(quantity, today, warning_ratio)?;
        Ok(material.clone())
    }

    /// Removes a material and returns it.
    pub fn remove_material(&mut self, id: &str) -> DashboardResult<Material> {
        let index = self
            .materials
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| not_found("material", id))?;
        Ok(self.materials.remove(index))
    }

    // Expenses

    /// Looks up an expense by id.
    pub fn expense(&self, id: &str) -> DashboardResult<&Expense> {
        self.expenses
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("expense", id))
    }

    /// Stores a new, unapproved expense and returns it.
    pub fn add_expense(&mut self, new_expense: NewExpense) -> Expense {
        let expense = new_expense.into_expense(new_id());
        self.expenses.push(expense.clone());
        expense
    }

    /// Marks an expense approved. Approving twice is harmless.
    pub fn approve_expense(&mut self, id: &str) -> DashboardResult<Expense> {
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("expense", id))?;
        expense.approved = true;
        Ok(expense.clone())
    }

    /// Removes an expense and returns it.
    pub fn remove_expense(&mut self, id: &str) -> DashboardResult<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| not_found("expense", id))?;
        Ok(self.expenses.remove(index))
    }

    // Vehicles

    /// Looks up a vehicle by id.
    pub fn vehicle(&self, id: &str) -> DashboardResult<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found("vehicle", id))
    }

    /// Stores a new vehicle and returns it.
    pub fn add_vehicle(&mut self, new_vehicle: NewVehicle) -> Vehicle {
        let vehicle = new_vehicle.into_vehicle(new_id());
        self.vehicles.push(vehicle.clone());
        vehicle
    }

    /// Applies `update` to a vehicle. The update must already be validated.
    pub fn update_vehicle(&mut self, id: &str, update: &VehicleUpdate) -> DashboardResult<Vehicle> {
        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found("vehicle", id))?;

        if let Some(status) = update.status {
            vehicle.status = status;
        }
        if let Some(site) = &update.site {
            vehicle.site = site.trim().to_string();
        }
        if let Some(fuel) = update.fuel_consumption {
            vehicle.fuel_consumption = fuel;
        }
        if let Some(last_service) = update.last_service {
            vehicle.last_service = last_service;
        }
        Ok(vehicle.clone())
    }

    /// Removes a vehicle and returns it.
    pub fn remove_vehicle(&mut self, id: &str) -> DashboardResult<Vehicle> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found("vehicle", id))?;
        Ok(self.vehicles.remove(index))
    }
}
