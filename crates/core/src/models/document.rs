use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::{Date, EntityId};

/// Metadata for a project document (permit, drawing, contract).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentRecord {
    pub project_id: Option<EntityId>,
    pub name: String,
    pub category: String,
    pub version: String,
    pub url: String,
    pub issued_date: Option<Date>,
    pub expiry_date: Option<Date>,
    pub notes: String,
}

project_scoped!(DocumentRecord, EntityKind::Document);
