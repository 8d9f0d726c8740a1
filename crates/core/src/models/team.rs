use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamMember {
    pub project_id: Option<EntityId>,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub hourly_rate: f64,
    pub active: bool,
}

impl Default for TeamMember {
    fn default() -> Self {
        Self {
            project_id: None,
            name: String::new(),
            role: String::new(),
            email: String::new(),
            phone: String::new(),
            hourly_rate: 0.0,
            active: true,
        }
    }
}

project_scoped!(TeamMember, EntityKind::Team);
