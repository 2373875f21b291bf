//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading dashboard
//! settings and tenant seed data from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{Expense, Material, Site, Vehicle};
use crate::store::validate_tenant_name;
use crate::validation::MAX_AMOUNT;

use super::types::{DashboardConfig, SeedData, SeedMaterial, Settings};

/// Loads and provides access to dashboard configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/demo/
/// ├── settings.yaml       # Server, auth, materials and dashboard sections
/// └── seed/
///     ├── sites.yaml      # Sites every tenant starts with
///     ├── materials.yaml  # Materials (balance and status are derived)
///     ├── expenses.yaml
///     └── vehicles.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use site_dashboard::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/demo")?;
/// println!("Seed sites: {}", loader.config().seed().sites.len());
/// # Ok::<(), site_dashboard::error::DashboardError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: DashboardConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A setting or seed record is out of range or an id is repeated
    pub fn load<P: AsRef<Path>>(path: P) -> DashboardResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        Self::validate_settings(&settings)?;

        let seed_dir = path.join("seed");
        let sites = Self::load_yaml::<Vec<Site>>(&seed_dir.join("sites.yaml"))?;
        let seed_materials = Self::load_yaml::<Vec<SeedMaterial>>(&seed_dir.join("materials.yaml"))?;
        let expenses = Self::load_yaml::<Vec<Expense>>(&seed_dir.join("expenses.yaml"))?;
        let vehicles = Self::load_yaml::<Vec<Vehicle>>(&seed_dir.join("vehicles.yaml"))?;

        let materials = Self::derive_materials(seed_materials, settings.materials.warning_ratio);
        let seed = SeedData {
            sites,
            materials,
            expenses,
            vehicles,
        };
        Self::validate_seed(&seed)?;

        debug!(
            path = %path.display(),
            sites = seed.sites.len(),
            materials = seed.materials.len(),
            expenses = seed.expenses.len(),
            vehicles = seed.vehicles.len(),
            "Loaded dashboard configuration"
        );

        Ok(Self {
            config: DashboardConfig::new(settings, seed),
        })
    }

    /// Wraps an already-built configuration, applying the same checks as [`ConfigLoader::load`].
    pub fn from_config(config: DashboardConfig) -> DashboardResult<Self> {
        Self::validate_settings(&config.settings)?;
        Self::validate_seed(&config.seed)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> DashboardResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| DashboardError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| DashboardError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn derive_materials(seed: Vec<SeedMaterial>, warning_ratio: Decimal) -> Vec<Material> {
        seed.into_iter()
            .map(|m| {
                Material::new(
                    m.id,
                    m.name,
                    m.unit,
                    m.purchased,
                    m.consumed,
                    m.last_updated,
                    warning_ratio,
                )
            })
            .collect()
    }

    fn validate_settings(settings: &Settings) -> DashboardResult<()> {
        let ratio = settings.materials.warning_ratio;
        if ratio < Decimal::ZERO || ratio > Decimal::ONE {
            return Err(DashboardError::InvalidConfig {
                message: format!("materials.warning_ratio must be between 0 and 1, got {}", ratio),
            });
        }
        if settings.auth.session_ttl_hours <= 0 {
            return Err(DashboardError::InvalidConfig {
                message: "auth.session_ttl_hours must be positive".to_string(),
            });
        }
        if settings.auth.session_sweep_secs == 0 {
            return Err(DashboardError::InvalidConfig {
                message: "auth.session_sweep_secs must be positive".to_string(),
            });
        }
        if settings.limits.max_tenants == 0 || settings.limits.max_sessions == 0 {
            return Err(DashboardError::InvalidConfig {
                message: "limits.max_tenants and limits.max_sessions must be positive".to_string(),
            });
        }
        validate_tenant_name(&settings.auth.default_tenant).map_err(|_| {
            DashboardError::InvalidConfig {
                message: format!(
                    "auth.default_tenant '{}' is not a valid tenant name",
                    settings.auth.default_tenant
                ),
            }
        })
    }

    fn validate_seed(seed: &SeedData) -> DashboardResult<()> {
        if let Some(site) = seed.sites.iter().find(|s| s.progress > 100) {
            return Err(DashboardError::InvalidConfig {
                message: format!("site '{}' has progress {} above 100", site.id, site.progress),
            });
        }
        let oversized = seed
            .sites
            .iter()
            .find(|s| s.budget > MAX_AMOUNT || s.spent > MAX_AMOUNT)
            .map(|s| format!("site '{}'", s.id))
            .or_else(|| {
                seed.expenses
                    .iter()
                    .find(|e| e.amount > MAX_AMOUNT)
                    .map(|e| format!("expense '{}'", e.id))
            });
        if let Some(record) = oversized {
            return Err(DashboardError::InvalidConfig {
                message: format!("{} has an amount above {}", record, MAX_AMOUNT),
            });
        }
        Self::unique_ids("site", seed.sites.iter().map(|s| s.id.as_str()))?;
        Self::unique_ids("material", seed.materials.iter().map(|m| m.id.as_str()))?;
        Self::unique_ids("expense", seed.expenses.iter().map(|e| e.id.as_str()))?;
        Self::unique_ids("vehicle", seed.vehicles.iter().map(|v| v.id.as_str()))
    }

    fn unique_ids<'a>(entity: &str, ids: impl Iterator<Item = &'a str>) -> DashboardResult<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(DashboardError::InvalidConfig {
                    message: format!("duplicate {} id '{}' in seed data", entity, id),
                });
            }
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> DashboardConfig {
        self.config
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }
}
