//! The closed set of screens and the payload a transition carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::models::{DiaryEntry, ReportType};
use crate::types::EntityId;

/// Whether a form creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormMode {
    New,
    Edit,
}

/// Where a report viewer goes back to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ReturnTarget {
    UnifiedReports,
    ProjectDetail {
        #[serde(rename = "projectId")]
        project_id: EntityId,
    },
}

impl ReturnTarget {
    pub fn into_view(self) -> View {
        match self {
            Self::UnifiedReports => View::UnifiedReports,
            Self::ProjectDetail { project_id } => View::ProjectDetail { project_id },
        }
    }

    /// The return target matching `view`, if a viewer can be opened from it.
    pub fn from_view(view: &View) -> Option<Self> {
        match view {
            View::UnifiedReports => Some(Self::UnifiedReports),
            View::ProjectDetail { project_id } => Some(Self::ProjectDetail {
                project_id: project_id.clone(),
            }),
            _ => None,
        }
    }
}

/// One screen of the module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    #[default]
    Menu,
    List { kind: EntityKind },
    New { kind: EntityKind },
    Edit { kind: EntityKind },
    ProjectDetail {
        #[serde(rename = "projectId")]
        project_id: EntityId,
    },
    ReportTypeSelector {
        #[serde(rename = "projectId")]
        project_id: Option<EntityId>,
    },
    /// Type-specific report sub-form.
    ReportForm {
        #[serde(rename = "reportType")]
        report_type: ReportType,
        mode: FormMode,
    },
    UnifiedReports,
    ReportViewer {
        #[serde(rename = "reportId")]
        report_id: EntityId,
        #[serde(rename = "returnTo")]
        return_to: ReturnTarget,
    },
}

impl View {
    pub fn list(kind: EntityKind) -> Self {
        Self::List { kind }
    }

    pub fn new_form(kind: EntityKind) -> Self {
        Self::New { kind }
    }

    pub fn edit_form(kind: EntityKind) -> Self {
        Self::Edit { kind }
    }

    /// The entity kind whose draft a form view works on.
    pub fn form_kind(&self) -> Option<EntityKind> {
        match self {
            Self::New { kind } | Self::Edit { kind } => Some(*kind),
            Self::ReportForm { .. } => Some(EntityKind::Diary),
            _ => None,
        }
    }

    /// Forms that start a new record and accept a seeded project id.
    pub fn is_new_form(&self) -> bool {
        matches!(
            self,
            Self::New { .. }
                | Self::ReportForm {
                    mode: FormMode::New,
                    ..
                }
        )
    }

    /// Stable identifier (`menu`, `new-team`, `new-report-rdo`, ...).
    pub fn id(&self) -> String {
        match self {
            Self::Menu => "menu".to_string(),
            Self::List { kind } => format!("list-{}", kind.slug()),
            Self::New { kind } => format!("new-{}", kind.slug()),
            Self::Edit { kind } => format!("edit-{}", kind.slug()),
            Self::ProjectDetail { .. } => "project-detail".to_string(),
            Self::ReportTypeSelector { .. } => "report-type-selector".to_string(),
            Self::ReportForm { report_type, mode } => match mode {
                FormMode::New => format!("new-report-{}", report_type.as_str()),
                FormMode::Edit => format!("edit-report-{}", report_type.as_str()),
            },
            Self::UnifiedReports => "unified-reports".to_string(),
            Self::ReportViewer { .. } => "report-viewer".to_string(),
        }
    }

    /// The form that edits `entry`: its type's sub-form, or the generic
    /// diary edit view for entries without a report type.
    pub fn edit_report(entry: &DiaryEntry) -> Self {
        match entry.report_type {
            Some(report_type) => Self::ReportForm {
                report_type,
                mode: FormMode::Edit,
            },
            None => Self::Edit {
                kind: EntityKind::Diary,
            },
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Payload attached to a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewContext {
    /// Seeds the project reference of a new-record draft.
    pub project_id: Option<EntityId>,
    /// Where a report viewer should return.
    pub return_to: Option<ReturnTarget>,
}

impl ViewContext {
    pub fn project(project_id: impl Into<EntityId>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            return_to: None,
        }
    }

    pub fn returning_to(target: ReturnTarget) -> Self {
        Self {
            project_id: None,
            return_to: Some(target),
        }
    }
}
