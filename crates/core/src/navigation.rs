//! Navigation state machine.
//!
//! [`ViewStateController`] owns the active [`View`] and every pending
//! [`Draft`]. State only changes through [`Command`]s applied by
//! [`ViewStateController::apply`] or the typed draft operations below, so a
//! presentation layer never mutates screen state directly.
//!
//! Transition rules:
//!
//! - `Menu` is the initial state and reachable from everywhere.
//! - Opening a new-record form makes sure a new draft exists for its kind
//!   and, when the context carries a project id, seeds that draft before
//!   the view becomes active.
//! - `Back` from a report viewer returns to the viewer's own return target
//!   and keeps drafts; from any other screen it returns to `Menu` and clears
//!   every draft.

use crate::drafts::{Draft, DraftSlot, Drafts};
use crate::entity::{EntityKind, Stored};
use crate::models::{DiaryEntry, ReportType};
use crate::types::EntityId;
use crate::views::{FormMode, ReturnTarget, View, ViewContext};

/// Named state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Activate `view`, seeding drafts from `context`.
    Transition { view: View, context: ViewContext },
    /// Leave the current screen.
    Back,
    /// Open the report viewer for `report_id`. The return target comes from
    /// `return_to`, else the current screen, else the unified list.
    OpenReport {
        report_id: EntityId,
        return_to: Option<ReturnTarget>,
    },
    /// Pick a sub-form from the report-type selector.
    ChooseReportType { report_type: ReportType },
    /// A save for `kind` succeeded: drop its draft and show its list.
    Saved { kind: EntityKind },
    /// Abandon the draft of `kind` and return to its list.
    Cancel { kind: EntityKind },
}

/// Active screen plus every pending draft.
#[derive(Debug, Clone, Default)]
pub struct ViewStateController {
    view: View,
    drafts: Drafts,
}

impl ViewStateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn drafts(&self) -> &Drafts {
        &self.drafts
    }

    pub fn draft<T: DraftSlot>(&self) -> Option<&Draft<T>> {
        self.drafts.get::<T>()
    }

    // -- Commands -----------------------------------------------------------

    /// Apply one command and return the resulting view.
    pub fn apply(&mut self, command: Command) -> &View {
        tracing::debug!(from = %self.view, ?command, "Applying navigation command");
        match command {
            Command::Transition { view, context } => self.enter(view, context),
            Command::Back => self.go_back(),
            Command::OpenReport {
                report_id,
                return_to,
            } => {
                let return_to = return_to
                    .or_else(|| ReturnTarget::from_view(&self.view))
                    .unwrap_or(ReturnTarget::UnifiedReports);
                self.view = View::ReportViewer {
                    report_id,
                    return_to,
                };
            }
            Command::ChooseReportType { report_type } => {
                let project_id = match &self.view {
                    View::ReportTypeSelector { project_id } => project_id.clone(),
                    _ => None,
                };
                let view = View::ReportForm {
                    report_type,
                    mode: FormMode::New,
                };
                self.enter(
                    view,
                    ViewContext {
                        project_id,
                        return_to: None,
                    },
                );
            }
            Command::Saved { kind } | Command::Cancel { kind } => {
                self.drafts.clear(kind);
                self.view = View::list(kind);
            }
        }
        &self.view
    }

    /// `transition(view, context)`.
    pub fn transition(&mut self, view: View, context: ViewContext) -> &View {
        self.apply(Command::Transition { view, context })
    }

    pub fn back(&mut self) -> &View {
        self.apply(Command::Back)
    }

    pub fn open_report(&mut self, report_id: impl Into<EntityId>) -> &View {
        self.apply(Command::OpenReport {
            report_id: report_id.into(),
            return_to: None,
        })
    }

    // -- Typed draft operations ---------------------------------------------

    /// Start editing `record` in the form that owns it.
    pub fn begin_edit<T: DraftSlot>(&mut self, record: &Stored<T>) -> &View {
        self.drafts.set(Draft::for_edit(record));
        self.view = record.data.edit_view();
        tracing::debug!(view = %self.view, id = %record.id, "Editing record");
        &self.view
    }

    /// Mutate the pending draft of `T`, if any. Returns whether one existed.
    pub fn update_draft<T: DraftSlot>(&mut self, edit: impl FnOnce(&mut T)) -> bool {
        match self.drafts.get_mut::<T>() {
            Some(draft) => {
                edit(&mut draft.data);
                true
            }
            None => false,
        }
    }

    /// A copy of the pending draft of `T`, for submission. The draft stays in
    /// place until [`Command::Saved`] confirms the write.
    pub fn pending<T: DraftSlot>(&self) -> Option<Draft<T>> {
        self.drafts.get::<T>().cloned()
    }

    // -- Internals ----------------------------------------------------------

    fn enter(&mut self, view: View, context: ViewContext) {
        if view.is_new_form() {
            if let Some(kind) = view.form_kind() {
                self.drafts.ensure_new(kind);
                if let View::ReportForm { report_type, .. } = &view {
                    self.prepare_report_draft(*report_type);
                }
                if let Some(project_id) = &context.project_id {
                    self.drafts.seed_project(kind, project_id);
                }
            }
        }

        self.view = match view {
            View::ReportViewer {
                report_id,
                return_to,
            } => View::ReportViewer {
                report_id,
                return_to: context.return_to.unwrap_or(return_to),
            },
            other => other,
        };
    }

    /// A new report draft must carry the sub-form's type.
    fn prepare_report_draft(&mut self, report_type: ReportType) {
        let matches = self
            .drafts
            .get::<DiaryEntry>()
            .is_some_and(|d| d.data.report_type == Some(report_type));
        if !matches {
            self.drafts.set(Draft::new(DiaryEntry::of_type(report_type)));
        }
    }

    fn go_back(&mut self) {
        match &self.view {
            View::Menu => {}
            View::ReportViewer { return_to, .. } => {
                self.view = return_to.clone().into_view();
            }
            _ => {
                self.drafts.clear_all();
                self.view = View::Menu;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Schedule, TeamMember};

    #[test]
    fn starts_on_menu() {
        let controller = ViewStateController::new();
        assert_eq!(controller.view(), &View::Menu);
        assert_eq!(controller.drafts().active_count(), 0);
    }

    #[test]
    fn new_form_with_project_context_seeds_the_draft() {
        let mut controller = ViewStateController::new();
        controller.transition(View::new_form(EntityKind::Team), ViewContext::project("P1"));

        assert_eq!(controller.view().id(), "new-team");
        let draft = controller.draft::<TeamMember>().unwrap();
        assert_eq!(draft.data.project_id.as_deref(), Some("P1"));
    }

    #[test]
    fn new_form_without_context_starts_blank() {
        let mut controller = ViewStateController::new();
        controller.transition(View::new_form(EntityKind::Schedule), ViewContext::default());
        let draft = controller.draft::<Schedule>().unwrap();
        assert_eq!(draft.data, Schedule::default());
    }

    #[test]
    fn viewer_returns_to_unified_list() {
        let mut controller = ViewStateController::new();
        controller.transition(View::UnifiedReports, ViewContext::default());
        controller.open_report("R1");
        assert_eq!(
            controller.view(),
            &View::ReportViewer {
                report_id: "R1".into(),
                return_to: ReturnTarget::UnifiedReports
            }
        );
        assert_eq!(controller.back(), &View::UnifiedReports);
    }

    #[test]
    fn viewer_returns_to_project_detail() {
        let mut controller = ViewStateController::new();
        controller.transition(
            View::ProjectDetail {
                project_id: "P1".into(),
            },
            ViewContext::default(),
        );
        controller.open_report("R1");
        assert_eq!(
            controller.back(),
            &View::ProjectDetail {
                project_id: "P1".into()
            }
        );
    }

    #[test]
    fn context_return_target_overrides_the_viewer_payload() {
        let mut controller = ViewStateController::new();
        controller.transition(
            View::ReportViewer {
                report_id: "R1".into(),
                return_to: ReturnTarget::UnifiedReports,
            },
            ViewContext::returning_to(ReturnTarget::ProjectDetail {
                project_id: "P2".into(),
            }),
        );
        assert_eq!(
            controller.back(),
            &View::ProjectDetail {
                project_id: "P2".into()
            }
        );
    }

    #[test]
    fn back_from_a_form_clears_all_drafts() {
        let mut controller = ViewStateController::new();
        controller.transition(View::new_form(EntityKind::Team), ViewContext::project("P1"));
        controller.transition(View::new_form(EntityKind::Issue), ViewContext::default());
        assert_eq!(controller.drafts().active_count(), 2);

        assert_eq!(controller.back(), &View::Menu);
        assert_eq!(controller.drafts().active_count(), 0);
    }

    #[test]
    fn back_from_viewer_keeps_drafts() {
        let mut controller = ViewStateController::new();
        controller.transition(View::new_form(EntityKind::Team), ViewContext::default());
        controller.transition(View::UnifiedReports, ViewContext::default());
        controller.open_report("R1");
        controller.back();
        assert!(controller.drafts().is_active(EntityKind::Team));
    }

    #[test]
    fn back_on_menu_is_a_no_op() {
        let mut controller = ViewStateController::new();
        assert_eq!(controller.back(), &View::Menu);
    }

    #[test]
    fn report_type_selector_carries_the_project_into_the_form() {
        let mut controller = ViewStateController::new();
        controller.transition(
            View::ReportTypeSelector {
                project_id: Some("P3".into()),
            },
            ViewContext::default(),
        );
        controller.apply(Command::ChooseReportType {
            report_type: ReportType::HydrostaticTest,
        });

        let draft = controller.draft::<DiaryEntry>().unwrap();
        assert_eq!(draft.data.report_type, Some(ReportType::HydrostaticTest));
        assert_eq!(draft.data.project_id.as_deref(), Some("P3"));
        assert_eq!(controller.view().id(), "new-report-hydrostatic-test");
    }

    #[test]
    fn switching_report_type_resets_the_draft() {
        let mut controller = ViewStateController::new();
        let rdo = View::ReportForm {
            report_type: ReportType::Rdo,
            mode: FormMode::New,
        };
        controller.transition(rdo, ViewContext::default());
        controller.update_draft::<DiaryEntry>(|d| d.activities = "Excavation".into());

        let conclusion = View::ReportForm {
            report_type: ReportType::Conclusion,
            mode: FormMode::New,
        };
        controller.transition(conclusion, ViewContext::default());
        let draft = controller.draft::<DiaryEntry>().unwrap();
        assert_eq!(draft.data.report_type, Some(ReportType::Conclusion));
        assert!(draft.data.activities.is_empty());
    }

    #[test]
    fn begin_edit_routes_reports_by_type() {
        let mut controller = ViewStateController::new();
        let typed = Stored::new("R1", DiaryEntry::of_type(ReportType::ExpenseEntry));
        controller.begin_edit(&typed);
        assert_eq!(controller.view().id(), "edit-report-expense-entry");

        let legacy = Stored::new("R2", DiaryEntry::default());
        controller.begin_edit(&legacy);
        assert_eq!(controller.view(), &View::edit_form(EntityKind::Diary));
        assert_eq!(
            controller.draft::<DiaryEntry>().unwrap().editing_id(),
            Some("R2")
        );
    }

    #[test]
    fn saved_clears_only_that_kind() {
        let mut controller = ViewStateController::new();
        controller.transition(View::new_form(EntityKind::Team), ViewContext::default());
        controller.transition(View::new_form(EntityKind::Issue), ViewContext::default());
        controller.apply(Command::Saved {
            kind: EntityKind::Issue,
        });
        assert_eq!(controller.view(), &View::list(EntityKind::Issue));
        assert!(controller.drafts().is_active(EntityKind::Team));
        assert!(!controller.drafts().is_active(EntityKind::Issue));
    }

    #[test]
    fn update_draft_without_a_draft_reports_false() {
        let mut controller = ViewStateController::new();
        assert!(!controller.update_draft::<TeamMember>(|m| m.name = "Ana".into()));
    }
}
