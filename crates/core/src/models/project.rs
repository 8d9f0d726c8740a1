//! Construction project: the anchor every other record may point at.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityKind};
use crate::types::{Date, EntityId};

/// Project lifecycle. See [`crate::lifecycle::project`] for allowed moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
    Paused,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub client: String,
    pub address: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub budget: f64,
    /// Maintained outside this module from expense entries.
    pub spent: f64,
    /// 0–100, recomputed from the project's schedule tasks.
    pub progress: u8,
    pub status: ProjectStatus,
    pub team_member_ids: Vec<EntityId>,
    pub labor: String,
}

impl Project {
    /// Budget left after what has been spent; negative when over budget.
    pub fn remaining_budget(&self) -> f64 {
        self.budget - self.spent
    }
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn project_id(&self) -> Option<&str> {
        None
    }

    fn set_project_id(&mut self, _project_id: Option<EntityId>) {}
}
