//! Core data models for the site dashboard.
//!
//! This module contains the records the dashboard tracks per tenant.

mod expense;
mod material;
mod site;
mod user;
mod vehicle;

pub use expense::{Expense, ExpenseCategory, NewExpense};
pub use material::{Material, MaterialStatus, NewMaterial};
pub use site::{BuildingType, NewSite, ProjectType, Site, SiteDetails, SiteStatus};
pub use user::User;
pub use vehicle::{NewVehicle, Vehicle, VehicleStatus};
