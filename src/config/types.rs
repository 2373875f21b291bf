//! Configuration types for the site dashboard.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::analytics::{DEFAULT_RECENT_EXPENSE_LIMIT, DEFAULT_WARNING_RATIO};
use crate::models::{Expense, Material, Site, Vehicle};

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Address the server binds to (e.g., "127.0.0.1:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Sign-in and session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// How long a session token stays valid, in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    /// How often expired sessions are swept, in seconds.
    #[serde(default = "default_session_sweep_secs")]
    pub session_sweep_secs: u64,
    /// Tenant used when sign-in does not name one.
    #[serde(default = "default_tenant")]
    pub default_tenant: String,
    /// Id given to the demo user.
    #[serde(default = "default_demo_user_id")]
    pub demo_user_id: String,
    /// Display name given to the demo user.
    #[serde(default = "default_demo_user_name")]
    pub demo_user_name: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            session_sweep_secs: default_session_sweep_secs(),
            default_tenant: default_tenant(),
            demo_user_id: default_demo_user_id(),
            demo_user_name: default_demo_user_name(),
        }
    }
}

fn default_session_ttl_hours() -> i64 {
    720
}

fn default_session_sweep_secs() -> u64 {
    300
}

fn default_tenant() -> String {
    "demo".to_string()
}

fn default_demo_user_id() -> String {
    "demo-user-id".to_string()
}

fn default_demo_user_name() -> String {
    "Demo User".to_string()
}

/// Material stock settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialSettings {
    /// Fraction of the purchased quantity at or below which stock is low.
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: Decimal,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            warning_ratio: default_warning_ratio(),
        }
    }
}

fn default_warning_ratio() -> Decimal {
    DEFAULT_WARNING_RATIO
}

/// Overview settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    /// Number of expenses in the recent expenses list.
    #[serde(default = "default_recent_expense_limit")]
    pub recent_expense_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            recent_expense_limit: default_recent_expense_limit(),
        }
    }
}

fn default_recent_expense_limit() -> usize {
    DEFAULT_RECENT_EXPENSE_LIMIT
}

/// Caps on the in-memory tables that sign-in can grow.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitSettings {
    /// Most tenants held at once.
    #[serde(default = "default_max_tenants")]
    pub max_tenants: usize,
    /// Most sessions held at once, expired ones included until swept.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_tenants: default_max_tenants(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_max_tenants() -> usize {
    1_000
}

fn default_max_sessions() -> usize {
    10_000
}

/// Contents of `settings.yaml`. Every section may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Sign-in and session settings.
    #[serde(default)]
    pub auth: AuthSettings,
    /// Material stock settings.
    #[serde(default)]
    pub materials: MaterialSettings,
    /// Overview settings.
    #[serde(default)]
    pub dashboard: DashboardSettings,
    /// Table size caps.
    #[serde(default)]
    pub limits: LimitSettings,
}

/// A material as listed in `seed/materials.yaml`.
///
/// Balance and status are not read from the file; they are derived when the
/// seed is loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedMaterial {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unit of measure.
    pub unit: String,
    /// Quantity purchased.
    pub purchased: Decimal,
    /// Quantity consumed.
    pub consumed: Decimal,
    /// Date of the last entry.
    pub last_updated: NaiveDate,
}

/// Records every new tenant starts with.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    /// Seed sites.
    pub sites: Vec<Site>,
    /// Seed materials with derived balance and status.
    pub materials: Vec<Material>,
    /// Seed expenses.
    pub expenses: Vec<Expense>,
    /// Seed vehicles.
    pub vehicles: Vec<Vehicle>,
}

/// Fully loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    /// Service settings.
    pub settings: Settings,
    /// Tenant seed data.
    pub seed: SeedData,
}

impl DashboardConfig {
    /// Creates a configuration from already-loaded parts.
    pub fn new(settings: Settings, seed: SeedData) -> Self {
        Self { settings, seed }
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the tenant seed data.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }

    /// Returns the material warning ratio.
    pub fn warning_ratio(&self) -> Decimal {
        self.settings.materials.warning_ratio
    }
}
