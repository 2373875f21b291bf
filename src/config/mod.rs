//! Configuration loading and management for the site dashboard.
//!
//! This module provides functionality to load service settings and tenant
//! seed data from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use site_dashboard::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/demo").unwrap();
//! println!("Listening on {}", config.settings().server.bind_addr);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AuthSettings, DashboardConfig, DashboardSettings, LimitSettings, MaterialSettings, SeedData,
    SeedMaterial, ServerSettings, Settings,
};
