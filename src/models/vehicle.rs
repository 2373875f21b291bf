//! Vehicle model and operating status.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operating status of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    /// Working on a site.
    Active,
    /// In the workshop.
    Maintenance,
    /// Parked and available.
    Idle,
}

impl VehicleStatus {
    /// Parses the wire form (e.g., `maintenance`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(VehicleStatus::Active),
            "maintenance" => Some(VehicleStatus::Maintenance),
            "idle" => Some(VehicleStatus::Idle),
            _ => None,
        }
    }
}

/// A vehicle or piece of heavy machinery allocated to a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier for the vehicle.
    pub id: String,
    /// Display name (e.g., "Excavator JCB-01").
    pub name: String,
    /// Kind of vehicle (e.g., "Excavator").
    #[serde(rename = "type")]
    pub vehicle_type: String,
    /// Name of the site the vehicle is allocated to.
    pub site: String,
    /// Operating status.
    pub status: VehicleStatus,
    /// Fuel consumption in litres per hour.
    pub fuel_consumption: Decimal,
    /// Date of the last service.
    pub last_service: NaiveDate,
}

/// A validated vehicle ready to be stored, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    /// Display name.
    pub name: String,
    /// Kind of vehicle.
    pub vehicle_type: String,
    /// Name of the site the vehicle is allocated to.
    pub site: String,
    /// Operating status.
    pub status: VehicleStatus,
    /// Fuel consumption in litres per hour.
    pub fuel_consumption: Decimal,
    /// Date of the last service.
    pub last_service: NaiveDate,
}

impl NewVehicle {
    /// Builds the stored vehicle.
    pub fn into_vehicle(self, id: String) -> Vehicle {
        Vehicle {
            id,
            name: self.name,
            vehicle_type: self.vehicle_type,
            site: self.site,
            status: self.status,
            fuel_consumption: self.fuel_consumption,
            last_service: self.last_service,
        }
    }
}
