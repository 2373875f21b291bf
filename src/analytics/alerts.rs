//! Material stock alerts.

use serde::Serialize;

use crate::models::{Material, MaterialStatus};

/// Materials needing attention, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaterialAlerts {
    /// Materials with a negative balance.
    pub critical: Vec<Material>,
    /// Materials running low.
    pub warning: Vec<Material>,
}

impl MaterialAlerts {
    /// Returns true when there is nothing to warn about.
    pub fn is_empty(&self) -> bool {
        self.critical.is_empty() && self.warning.is_empty()
    }
}

/// Collects critical and warning materials, preserving list order.
pub fn collect_material_alerts(materials: &[Material]) -> MaterialAlerts {
    let mut alerts = MaterialAlerts::default();
    for material in materials {
        match material.status {
            MaterialStatus::Critical => alerts.critical.push(material.clone()),
            MaterialStatus::Warning => alerts.warning.push(material.clone()),
            MaterialStatus::Good => {}
        }
    }
    alerts
}
