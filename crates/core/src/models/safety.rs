use serde::{Deserialize, Serialize};

use super::Severity;
use crate::entity::{project_scoped, EntityKind};
use crate::types::{Date, EntityId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyRecordType {
    #[default]
    Inspection,
    Incident,
    Training,
    ToolboxTalk,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SafetyRecord {
    pub project_id: Option<EntityId>,
    pub date: Option<Date>,
    pub record_type: SafetyRecordType,
    pub description: String,
    pub severity: Severity,
    pub responsible: String,
    pub corrective_action: String,
    pub resolved: bool,
}

project_scoped!(SafetyRecord, EntityKind::Safety);
