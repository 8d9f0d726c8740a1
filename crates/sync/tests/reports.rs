//! Report saving with attachments, and the approval workflow.

mod common;

use assert_matches::assert_matches;
use common::{date, project, Harness};
use sitebook_core::models::{ApprovalStatus, DiaryEntry, ReportType};
use sitebook_core::navigation::ViewStateController;
use sitebook_core::views::{FormMode, View, ViewContext};
use sitebook_core::{CoreError, EntityKind, Stored};
use sitebook_events::Severity;
use sitebook_sync::memory::{MemoryFileStorage, Operation};
use sitebook_sync::{PendingFile, SyncError};

fn files(n: usize) -> Vec<PendingFile> {
    (1..=n)
        .map(|i| PendingFile::new(format!("photo-{i}.jpg"), "image/jpeg", vec![7; 16]))
        .collect()
}

fn report(report_type: ReportType) -> DiaryEntry {
    DiaryEntry {
        project_id: Some("P1".into()),
        obra_name: "Tower A".into(),
        date: Some(date(2024, 5, 14)),
        activities: "Slab pour, level 3".into(),
        ..DiaryEntry::of_type(report_type)
    }
}

/// A controller with a new report form of `report_type` for project P1,
/// filled in with valid values.
fn filled_form(report_type: ReportType) -> ViewStateController {
    let mut controller = ViewStateController::new();
    controller.transition(
        View::ReportForm {
            report_type,
            mode: FormMode::New,
        },
        ViewContext::project("P1"),
    );
    controller.update_draft::<DiaryEntry>(|d| {
        d.obra_name = "Tower A".into();
        d.date = Some(date(2024, 5, 14));
        d.activities = "Slab pour, level 3".into();
    });
    controller
}

#[tokio::test]
async fn second_upload_failing_keeps_only_the_first_attachment() {
    let h = Harness::with_storage(MemoryFileStorage::fail_on_upload(2));
    h.backend.projects.seed(project("P1", "Tower A"));
    h.load().await;
    let mut controller = filled_form(ReportType::Rdo);

    let id = h
        .sitebook
        .submit_report(&mut controller, &files(3))
        .await
        .unwrap();

    let saved = h.backend.reports.get(&id).unwrap().data;
    let names: Vec<_> = saved.attachments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["photo-1.jpg"]);
    assert_eq!(h.storage.attempts(), 2);
    assert_eq!(h.notifier.count(Severity::Warning), 1);

    // One refresh for the whole save, after the attachments were linked.
    assert_eq!(h.refreshes(), 2);
    let loaded = h.sitebook.snapshot().find::<DiaryEntry>(&id).cloned().unwrap();
    assert_eq!(loaded.data.attachments.len(), 1);
    assert_eq!(controller.view(), &View::list(EntityKind::Diary));
}

#[tokio::test]
async fn failed_link_warns_that_no_attachment_was_linked() {
    let h = Harness::new();
    h.backend.projects.seed(project("P1", "Tower A"));
    h.load().await;
    h.backend.reports.fail(Operation::Update);

    let id = h
        .sitebook
        .reports()
        .save_report(report(ReportType::Rdo), None, &files(2))
        .await
        .unwrap();

    assert_eq!(h.storage.attempts(), 2);
    assert!(h.backend.reports.get(&id).unwrap().data.attachments.is_empty());
    let warning = h
        .notifier
        .notifications()
        .into_iter()
        .find(|n| n.severity == Severity::Warning)
        .unwrap();
    assert!(
        warning.message.starts_with("Report saved with 0 of 2 attachment(s) linked"),
        "{}",
        warning.message
    );
}

#[tokio::test]
async fn all_uploads_are_linked_under_the_project_path() {
    let h = Harness::new();
    h.backend.projects.seed(project("P1", "Tower A"));
    h.load().await;
    let mut controller = filled_form(ReportType::Rdo);

    let id = h
        .sitebook
        .submit_report(&mut controller, &files(3))
        .await
        .unwrap();

    let saved = h.backend.reports.get(&id).unwrap().data;
    assert_eq!(saved.attachments.len(), 3);
    assert_eq!(saved.attachments[0].url, format!("memory://P1/{id}/photo-1.jpg"));
    assert_eq!(h.notifier.count(Severity::Warning), 0);
}

#[tokio::test]
async fn other_report_types_ignore_files() {
    let h = Harness::new();
    h.backend.projects.seed(project("P1", "Tower A"));
    h.load().await;
    let mut controller = filled_form(ReportType::Conclusion);

    h.sitebook
        .submit_report(&mut controller, &files(2))
        .await
        .unwrap();

    assert_eq!(h.storage.attempts(), 0);
    assert_eq!(h.backend.reports.calls().update, 0);
}

#[tokio::test]
async fn invalid_report_keeps_the_form_open() {
    let h = Harness::new();
    h.load().await;
    // P1 is not a known project.
    let mut controller = filled_form(ReportType::Rdo);

    let result = h.sitebook.submit_report(&mut controller, &files(1)).await;

    assert_matches!(result, Err(SyncError::Validation { entity: "Report", .. }));
    assert_eq!(h.storage.attempts(), 0);
    assert_eq!(controller.view().id(), "new-report-rdo");
    assert!(controller.drafts().is_active(EntityKind::Diary));
}

#[tokio::test]
async fn edited_reports_keep_their_type() {
    let h = Harness::new();
    h.backend.projects.seed(project("P1", "Tower A"));
    h.backend.reports.seed(Stored::new("R1", report(ReportType::Rdo)));
    h.load().await;

    let mut controller = ViewStateController::new();
    let record = h.sitebook.snapshot().find::<DiaryEntry>("R1").cloned().unwrap();
    controller.begin_edit(&record);
    assert_eq!(controller.view().id(), "edit-report-rdo");
    controller.update_draft::<DiaryEntry>(|d| {
        d.report_type = Some(ReportType::Conclusion);
        d.weather = Some("Rain".into());
    });

    h.sitebook.submit_report(&mut controller, &[]).await.unwrap();

    let stored = h.backend.reports.get("R1").unwrap().data;
    assert_eq!(stored.report_type, Some(ReportType::Rdo));
    assert_eq!(stored.weather.as_deref(), Some("Rain"));
}

#[tokio::test]
async fn approval_moves_forward_until_approved() {
    let h = Harness::new();
    h.backend.projects.seed(project("P1", "Tower A"));
    h.backend.reports.seed(Stored::new("R1", report(ReportType::Rdo)));
    h.load().await;
    let reports = h.sitebook.reports();

    assert_eq!(reports.advance_approval("R1").await.unwrap(), ApprovalStatus::Review);
    assert_eq!(reports.advance_approval("R1").await.unwrap(), ApprovalStatus::Approved);

    let err = reports.advance_approval("R1").await.unwrap_err();
    assert_matches!(err, SyncError::Core(CoreError::InvalidTransition { .. }));
    assert_matches!(
        reports.send_back("R1").await,
        Err(SyncError::Core(CoreError::InvalidTransition { .. }))
    );
    assert_eq!(
        h.backend.reports.get("R1").unwrap().data.approval_status,
        ApprovalStatus::Approved
    );
}

#[tokio::test]
async fn reviewers_can_send_reports_back() {
    let h = Harness::new();
    h.backend.projects.seed(project("P1", "Tower A"));
    h.backend.reports.seed(Stored::new(
        "R1",
        DiaryEntry {
            approval_status: ApprovalStatus::Review,
            ..report(ReportType::Rdo)
        },
    ));
    h.load().await;

    h.sitebook.reports().send_back("R1").await.unwrap();

    assert_eq!(
        h.backend.reports.get("R1").unwrap().data.approval_status,
        ApprovalStatus::Filling
    );
}

#[tokio::test]
async fn approval_changes_do_not_revalidate_content() {
    let h = Harness::new();
    // No project and no site name: would fail validation on save.
    h.backend.reports.seed(Stored::new("R1", DiaryEntry::of_type(ReportType::Rdo)));
    h.load().await;

    let status = h.sitebook.reports().advance_approval("R1").await.unwrap();

    assert_eq!(status, ApprovalStatus::Review);
}

#[tokio::test]
async fn approving_an_unknown_report_fails() {
    let h = Harness::new();
    h.load().await;

    let result = h.sitebook.reports().advance_approval("nope").await;

    assert_matches!(result, Err(SyncError::Core(CoreError::NotFound { entity: "report", .. })));
    assert_eq!(h.notifier.count(Severity::Error), 1);
}

#[tokio::test]
async fn edit_view_routes_by_report_type() {
    let h = Harness::new();
    h.backend.reports.seed(Stored::new("R1", report(ReportType::HydrostaticTest)));
    h.backend.reports.seed(Stored::new("R2", DiaryEntry::default()));
    h.load().await;
    let reports = h.sitebook.reports();

    assert_eq!(
        reports.edit_view("R1"),
        Some(View::ReportForm {
            report_type: ReportType::HydrostaticTest,
            mode: FormMode::Edit
        })
    );
    assert_eq!(reports.edit_view("R2"), Some(View::edit_form(EntityKind::Diary)));
    assert_eq!(reports.edit_view("R3"), None);
}
