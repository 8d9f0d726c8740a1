use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::{Date, EntityId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Equipment {
    pub project_id: Option<EntityId>,
    pub name: String,
    pub equipment_type: String,
    pub serial_number: String,
    pub status: EquipmentStatus,
    pub daily_cost: f64,
    pub last_maintenance: Option<Date>,
    pub next_maintenance: Option<Date>,
}

project_scoped!(Equipment, EntityKind::Equipment);

impl Equipment {
    /// Whether the next maintenance date has passed as of `today`.
    pub fn maintenance_due(&self, today: Date) -> bool {
        self.next_maintenance.is_some_and(|next| next <= today)
    }
}
