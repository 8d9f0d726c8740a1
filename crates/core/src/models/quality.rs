use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::{Date, EntityId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChecklistStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub description: String,
    pub checked: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityChecklist {
    pub project_id: Option<EntityId>,
    pub title: String,
    pub stage: String,
    pub inspector: String,
    pub date: Option<Date>,
    pub items: Vec<ChecklistItem>,
    pub status: ChecklistStatus,
}

project_scoped!(QualityChecklist, EntityKind::Quality);

impl QualityChecklist {
    /// Fraction of checked items in percent; an empty list reports 0.
    pub fn completion_percent(&self) -> u8 {
        if self.items.is_empty() {
            return 0;
        }
        let checked = self.items.iter().filter(|i| i.checked).count();
        ((checked * 100) / self.items.len()) as u8
    }
}
