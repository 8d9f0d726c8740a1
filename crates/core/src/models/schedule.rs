//! Schedule tasks. Changes here drive project progress.

use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::{Date, EntityId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
    Delayed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schedule {
    pub project_id: Option<EntityId>,
    pub name: String,
    pub description: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// 0–100.
    pub progress: u8,
    pub status: ScheduleStatus,
    pub planned_cost: f64,
    pub actual_cost: f64,
    pub responsible: String,
    /// Ids of tasks that must finish first.
    pub dependencies: Vec<EntityId>,
}

project_scoped!(Schedule, EntityKind::Schedule);

impl Schedule {
    pub fn is_done(&self) -> bool {
        self.status == ScheduleStatus::Done
    }
}
