//! Tenant-partitioned in-memory storage.
//!
//! Each tenant gets its own copy of the seed data the first time it is
//! touched. Nothing is persisted; a restart returns every tenant to the seed.
//! Sign-in admits tenants through [`DashboardStore::admit`], which refuses new
//! tenants once the configured cap is reached.

mod tenant;

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::SeedData;
use crate::error::{DashboardError, DashboardResult};

pub use tenant::TenantData;

/// Longest accepted tenant name.
pub const MAX_TENANT_NAME_LEN: usize = 64;

/// Checks that `name` is 1 to 64 ASCII letters, digits, `-` or `_`.
///
/// # Example
///
/// ```
/// use site_dashboard::store::validate_tenant_name;
///
/// assert!(validate_tenant_name("gavith-build").is_ok());
/// assert!(validate_tenant_name("../etc").is_err());
/// ```
pub fn validate_tenant_name(name: &str) -> DashboardResult<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_TENANT_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DashboardError::InvalidTenant {
            tenant: name.to_string(),
        })
    }
}

/// All tenants' data.
#[derive(Debug)]
pub struct DashboardStore {
    seed: SeedData,
    max_tenants: usize,
    tenants: RwLock<HashMap<String, TenantData>>,
}

impl DashboardStore {
    /// Creates an empty store that seeds new tenants from `seed` and holds
    /// at most `max_tenants` of them.
    pub fn new(seed: SeedData, max_tenants: usize) -> Self {
        Self {
            seed,
            max_tenants,
            tenants: RwLock::new(HashMap::new()),
        }
    }

    /// Makes sure `tenant` exists, seeding it if there is room.
    ///
    /// Existing tenants are always admitted. A new tenant beyond the cap is
    /// refused with `CapacityReached`.
    pub async fn admit(&self, tenant: &str) -> DashboardResult<()> {
        if self.tenants.read().await.contains_key(tenant) {
            return Ok(());
        }
        let mut tenants = self.tenants.write().await;
        if !tenants.contains_key(tenant) && tenants.len() >= self.max_tenants {
            warn!(tenant = %tenant, limit = self.max_tenants, "Tenant limit reached");
            return Err(DashboardError::CapacityReached {
                resource: "tenants",
                limit: self.max_tenants,
            });
        }
        self.entry(&mut tenants, tenant);
        Ok(())
    }

    /// Runs `f` against the tenant's data, seeding the tenant if needed.
    pub async fn read<R>(&self, tenant: &str, f: impl FnOnce(&TenantData) -> R) -> R {
        {
            let tenants = self.tenants.read().await;
            if let Some(data) = tenants.get(tenant) {
                return f(data);
            }
        }
        let mut tenants = self.tenants.write().await;
        f(self.entry(&mut tenants, tenant))
    }

    /// Runs `f` against the tenant's data mutably, seeding the tenant if needed.
    pub async fn write<R>(&self, tenant: &str, f: impl FnOnce(&mut TenantData) -> R) -> R {
        let mut tenants = self.tenants.write().await;
        f(self.entry(&mut tenants, tenant))
    }

    /// Number of tenants created so far.
    pub async fn tenant_count(&self) -> usize {
        self.tenants.read().await.len()
    }

    fn entry<'a>(
        &self,
        tenants: &'a mut HashMap<String, TenantData>,
        tenant: &str,
    ) -> &'a mut TenantData {
        tenants.entry(tenant.to_string()).or_insert_with(|| {
            info!(tenant = %tenant, "Seeding new tenant");
            TenantData::from(&self.seed)
        })
    }
}
