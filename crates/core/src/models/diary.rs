//! Daily site diary entries and the report sub-types that share its shape.

use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::{Date, EntityId};

/// Which sub-form produced a report. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    /// Daily work report (relatório diário de obra).
    Rdo,
    ExpenseEntry,
    HydrostaticTest,
    Conclusion,
}

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        ReportType::Rdo,
        ReportType::ExpenseEntry,
        ReportType::HydrostaticTest,
        ReportType::Conclusion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rdo => "rdo",
            Self::ExpenseEntry => "expense-entry",
            Self::HydrostaticTest => "hydrostatic-test",
            Self::Conclusion => "conclusion",
        }
    }

    /// Only daily reports accept file attachments.
    pub fn accepts_attachments(self) -> bool {
        self == Self::Rdo
    }
}

/// Approval workflow. See [`crate::lifecycle::approval`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalStatus {
    #[default]
    Filling,
    Review,
    Approved,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filling => "filling",
            Self::Review => "review",
            Self::Approved => "approved",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiaryStatus {
    #[default]
    Draft,
    Submitted,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialUsage {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Photo embedded inline in the entry (data URL or base64 payload).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub data: String,
}

/// A file uploaded to storage and linked back to the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiaryEntry {
    pub project_id: Option<EntityId>,
    pub obra_name: String,
    pub date: Option<Date>,
    pub activities: String,
    pub weather: Option<String>,
    pub responsible: String,
    pub materials: Vec<MaterialUsage>,
    pub photos: Vec<Photo>,
    pub status: DiaryStatus,
    /// Absent on entries created before report types existed.
    pub report_type: Option<ReportType>,
    pub approval_status: ApprovalStatus,
    pub attachments: Vec<Attachment>,
    /// Required for expense entries.
    pub expense_amount: Option<f64>,
    /// Required for hydrostatic tests (bar).
    pub test_pressure: Option<f64>,
}

project_scoped!(DiaryEntry, EntityKind::Diary);

impl DiaryEntry {
    /// A blank report of the given type.
    pub fn of_type(report_type: ReportType) -> Self {
        Self {
            report_type: Some(report_type),
            ..Default::default()
        }
    }
}
