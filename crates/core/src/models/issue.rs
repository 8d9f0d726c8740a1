use serde::{Deserialize, Serialize};

use super::Severity;
use crate::entity::{project_scoped, EntityKind};
use crate::types::{Date, EntityId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl IssueStatus {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Issue {
    pub project_id: Option<EntityId>,
    pub title: String,
    pub description: String,
    pub priority: Severity,
    pub status: IssueStatus,
    pub assignee: String,
    pub due_date: Option<Date>,
    pub resolution: String,
}

project_scoped!(Issue, EntityKind::Issue);

impl Issue {
    /// Still open after its due date.
    pub fn is_overdue(&self, today: Date) -> bool {
        self.status.is_open() && self.due_date.is_some_and(|due| due < today)
    }
}
