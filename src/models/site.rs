//! Site model and related types.
//!
//! A site is a construction project tracked by the dashboard, together with
//! its timeline, budget and the contact details captured by the Add Site form.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteStatus {
    /// Work is in progress.
    Active,
    /// The project has been handed over.
    Completed,
    /// Work is paused.
    OnHold,
}

impl SiteStatus {
    /// Parses the wire form (`active`, `completed`, `on-hold`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(SiteStatus::Active),
            "completed" => Some(SiteStatus::Completed),
            "on-hold" => Some(SiteStatus::OnHold),
            _ => None,
        }
    }
}

/// Kind of construction project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Housing.
    Residential,
    /// Offices and retail.
    Commercial,
    /// Plants and factories.
    Industrial,
    /// Roads, bridges and utilities.
    Infrastructure,
    /// Combined residential and commercial.
    MixedUse,
}

impl ProjectType {
    /// Parses the wire form (e.g., `mixed-use`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "residential" => Some(ProjectType::Residential),
            "commercial" => Some(ProjectType::Commercial),
            "industrial" => Some(ProjectType::Industrial),
            "infrastructure" => Some(ProjectType::Infrastructure),
            "mixed-use" => Some(ProjectType::MixedUse),
            _ => None,
        }
    }
}

/// Kind of building being put up on a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BuildingType {
    Apartment,
    House,
    Office,
    Mall,
    Hospital,
    School,
    Hotel,
    Factory,
    Warehouse,
}

impl BuildingType {
    /// Parses the wire form (e.g., `warehouse`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "apartment" => Some(BuildingType::Apartment),
            "house" => Some(BuildingType::House),
            "office" => Some(BuildingType::Office),
            "mall" => Some(BuildingType::Mall),
            "hospital" => Some(BuildingType::Hospital),
            "school" => Some(BuildingType::School),
            "hotel" => Some(BuildingType::Hotel),
            "factory" => Some(BuildingType::Factory),
            "warehouse" => Some(BuildingType::Warehouse),
            _ => None,
        }
    }
}

/// Contact and descriptive details that are optional on a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDetails {
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    /// Phone number of the site manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_phone: Option<String>,
    /// Email address of the site manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_email: Option<String>,
    /// Name of the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// Phone number of the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    /// Email address of the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    /// Kind of project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    /// Kind of building.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<BuildingType>,
    /// Number of floors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors: Option<u32>,
    /// Site area in square feet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_area: Option<Decimal>,
    /// Free-form project description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A construction project tracked by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Unique identifier for the site.
    pub id: String,
    /// Display name of the site.
    pub name: String,
    /// Human-readable location (e.g., "Mumbai, Maharashtra").
    pub location: String,
    /// Completion percentage, 0 to 100.
    pub progress: u8,
    /// Lifecycle status.
    pub status: SiteStatus,
    /// Planned start date.
    pub start_date: NaiveDate,
    /// Planned end date.
    pub end_date: NaiveDate,
    /// Total approved budget.
    pub budget: Decimal,
    /// Amount spent so far.
    pub spent: Decimal,
    /// Name of the site manager.
    pub manager: String,
    /// Optional details captured when the site was created.
    #[serde(flatten)]
    pub details: SiteDetails,
}

/// A validated site ready to be stored, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSite {
    /// Display name of the site.
    pub name: String,
    /// Human-readable location.
    pub location: String,
    /// Initial status.
    pub status: SiteStatus,
    /// Planned start date.
    pub start_date: NaiveDate,
    /// Planned end date.
    pub end_date: NaiveDate,
    /// Total approved budget.
    pub budget: Decimal,
    /// Name of the site manager.
    pub manager: String,
    /// Optional details.
    pub details: SiteDetails,
}

impl NewSite {
    /// Builds the stored site. New sites start with no progress and nothing spent.
    pub fn into_site(self, id: String) -> Site {
        Site {
            id,
            name: self.name,
            location: self.location,
            progress: 0,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
            spent: Decimal::ZERO,
            manager: self.manager,
            details: self.details,
        }
    }
}

impl Site {
    /// Budget not yet spent. Negative when the site is over budget.
    pub fn remaining_budget(&self) -> Decimal {
        self.budget - self.spent
    }

    /// Returns true if spending has exceeded the budget.
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }
}
