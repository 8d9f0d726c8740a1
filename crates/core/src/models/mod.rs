//! Entity models for the thirteen resource kinds.
//!
//! Every model is the payload a collaborator receives on create/update: no id,
//! no timestamps. Wire names are camelCase; enum values are kebab-case.

pub mod budget;
pub mod diary;
pub mod document;
pub mod equipment;
pub mod inventory;
pub mod issue;
pub mod measurement;
pub mod project;
pub mod quality;
pub mod safety;
pub mod schedule;
pub mod supplier;
pub mod team;

use serde::{Deserialize, Serialize};

pub use budget::{Budget, BudgetCategory};
pub use diary::{ApprovalStatus, Attachment, DiaryEntry, DiaryStatus, MaterialUsage, Photo, ReportType};
pub use document::DocumentRecord;
pub use equipment::{Equipment, EquipmentStatus};
pub use inventory::InventoryItem;
pub use issue::{Issue, IssueStatus};
pub use measurement::Measurement;
pub use project::{Project, ProjectStatus};
pub use quality::{ChecklistItem, ChecklistStatus, QualityChecklist};
pub use safety::{SafetyRecord, SafetyRecordType};
pub use schedule::{Schedule, ScheduleStatus};
pub use supplier::Supplier;
pub use team::TeamMember;

/// Shared four-step scale for issue priority and safety severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}
