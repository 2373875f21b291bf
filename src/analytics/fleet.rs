//! Vehicle fleet summary.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Vehicle, VehicleStatus};

/// Counts and averages over a fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetSummary {
    /// Number of vehicles.
    pub total: usize,
    /// Vehicles working on a site.
    pub active: usize,
    /// Vehicles in the workshop.
    pub maintenance: usize,
    /// Vehicles parked.
    pub idle: usize,
    /// Mean fuel consumption, two decimal places. `None` for an empty fleet.
    pub average_fuel_consumption: Option<Decimal>,
}

/// Summarizes `vehicles` in a single pass.
pub fn summarize_fleet(vehicles: &[Vehicle]) -> FleetSummary {
    let mut summary = FleetSummary {
        total: vehicles.len(),
        active: 0,
        maintenance: 0,
        idle: 0,
        average_fuel_consumption: None,
    };
    let mut fuel_total = Decimal::ZERO;

    for vehicle in vehicles {
        match vehicle.status {
            VehicleStatus::Active => summary.active += 1,
            VehicleStatus::Maintenance => summary.maintenance += 1,
            VehicleStatus::Idle => summary.idle += 1,
        }
        fuel_total = fuel_total.saturating_add(vehicle.fuel_consumption);
    }

    if !vehicles.is_empty() {
        summary.average_fuel_consumption =
            fuel_total.checked_div(Decimal::from(vehicles.len())).map(|avg| avg.round_dp(2));
    }

    summary
}
