//! In-memory snapshot of every collection, replaced wholesale by
//! [`EntityStore::refresh_all`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use sitebook_core::models::{
    Budget, DiaryEntry, DocumentRecord, Equipment, InventoryItem, Issue, Measurement, Project,
    QualityChecklist, ReportType, SafetyRecord, Schedule, Supplier, TeamMember,
};
use sitebook_core::validation::ValidationContext;
use sitebook_core::{Date, EntityKind, Stored, Timestamp};
use tokio::sync::watch;

use crate::error::{CollaboratorError, RefreshError};
use crate::resource::{Collaborators, Resource};

/// Label shown for a missing or dangling project reference.
pub const NO_PROJECT_LABEL: &str = "No project";

/// Every collection as of the last successful refresh.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub(crate) projects: Vec<Stored<Project>>,
    pub(crate) reports: Vec<Stored<DiaryEntry>>,
    pub(crate) inventory: Vec<Stored<InventoryItem>>,
    pub(crate) budgets: Vec<Stored<Budget>>,
    pub(crate) suppliers: Vec<Stored<Supplier>>,
    pub(crate) team: Vec<Stored<TeamMember>>,
    pub(crate) equipment: Vec<Stored<Equipment>>,
    pub(crate) schedules: Vec<Stored<Schedule>>,
    pub(crate) safety: Vec<Stored<SafetyRecord>>,
    pub(crate) measurements: Vec<Stored<Measurement>>,
    pub(crate) issues: Vec<Stored<Issue>>,
    pub(crate) documents: Vec<Stored<DocumentRecord>>,
    pub(crate) checklists: Vec<Stored<QualityChecklist>>,
    pub(crate) refreshed_at: Option<Timestamp>,
}

/// Related-record counts for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectOverview {
    pub project: Stored<Project>,
    pub counts: BTreeMap<EntityKind, usize>,
}

impl ProjectOverview {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

impl Snapshot {
    pub fn records<T: Resource>(&self) -> &[Stored<T>] {
        T::records(self)
    }

    pub fn find<T: Resource>(&self, id: &str) -> Option<&Stored<T>> {
        T::records(self).iter().find(|r| r.id == id)
    }

    /// Records of `T` that reference `project_id`.
    pub fn for_project<T: Resource>(&self, project_id: &str) -> Vec<&Stored<T>> {
        T::records(self)
            .iter()
            .filter(|r| r.belongs_to(project_id))
            .collect()
    }

    /// `None` until the first successful refresh.
    pub fn refreshed_at(&self) -> Option<Timestamp> {
        self.refreshed_at
    }

    /// Display name for a weak project reference. Missing or dangling
    /// references resolve to [`NO_PROJECT_LABEL`].
    pub fn project_label(&self, project_id: Option<&str>) -> &str {
        project_id
            .and_then(|id| self.find::<Project>(id))
            .map(|p| p.data.name.as_str())
            .unwrap_or(NO_PROJECT_LABEL)
    }

    /// What validators may reference: the ids of every known project.
    pub fn validation_context(&self) -> ValidationContext {
        ValidationContext::new(self.projects.iter().map(|p| p.id.clone()))
    }

    pub fn overview(&self, project_id: &str) -> Option<ProjectOverview> {
        let project = self.find::<Project>(project_id)?.clone();
        let counts = [
            (EntityKind::Diary, self.for_project::<DiaryEntry>(project_id).len()),
            (EntityKind::Inventory, self.for_project::<InventoryItem>(project_id).len()),
            (EntityKind::Budget, self.for_project::<Budget>(project_id).len()),
            (EntityKind::Supplier, self.for_project::<Supplier>(project_id).len()),
            (EntityKind::Team, self.for_project::<TeamMember>(project_id).len()),
            (EntityKind::Equipment, self.for_project::<Equipment>(project_id).len()),
            (EntityKind::Schedule, self.for_project::<Schedule>(project_id).len()),
            (EntityKind::Safety, self.for_project::<SafetyRecord>(project_id).len()),
            (EntityKind::Measurement, self.for_project::<Measurement>(project_id).len()),
            (EntityKind::Issue, self.for_project::<Issue>(project_id).len()),
            (EntityKind::Document, self.for_project::<DocumentRecord>(project_id).len()),
            (EntityKind::Quality, self.for_project::<QualityChecklist>(project_id).len()),
        ]
        .into_iter()
        .collect();
        Some(ProjectOverview { project, counts })
    }

    /// Reports newest first, optionally restricted to one type. Undated
    /// entries sort last.
    pub fn reports(&self, report_type: Option<ReportType>) -> Vec<&Stored<DiaryEntry>> {
        let mut reports: Vec<_> = self
            .reports
            .iter()
            .filter(|r| report_type.is_none() || r.data.report_type == report_type)
            .collect();
        reports.sort_by(|a, b| {
            b.data
                .date
                .cmp(&a.data.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        reports
    }

    pub fn low_stock(&self) -> Vec<&Stored<InventoryItem>> {
        self.inventory.iter().filter(|i| i.data.is_low_stock()).collect()
    }

    pub fn overspent_budgets(&self) -> Vec<&Stored<Budget>> {
        self.budgets.iter().filter(|b| b.data.is_overspent()).collect()
    }

    /// Remaining amount across every budget of `project_id`.
    pub fn budget_remaining(&self, project_id: &str) -> f64 {
        self.for_project::<Budget>(project_id)
            .iter()
            .map(|b| b.data.remaining())
            .sum()
    }

    pub fn overdue_issues(&self, today: Date) -> Vec<&Stored<Issue>> {
        self.issues
            .iter()
            .filter(|i| i.data.is_overdue(today))
            .collect()
    }
}

/// Holds the current [`Snapshot`] and reloads it from the collaborators.
pub struct EntityStore {
    collaborators: Collaborators,
    snapshot: watch::Sender<Arc<Snapshot>>,
    refreshes: AtomicUsize,
}

impl EntityStore {
    pub fn new(collaborators: Collaborators) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::default()));
        Self {
            collaborators,
            snapshot,
            refreshes: AtomicUsize::new(0),
        }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// The current snapshot. Cheap; readers keep the `Arc` as long as needed.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.borrow().clone()
    }

    /// Notified after every successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshot.subscribe()
    }

    /// Number of `refresh_all` calls so far, successful or not.
    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::Relaxed)
    }

    /// Fetch all thirteen collections concurrently and replace the snapshot.
    ///
    /// All or nothing: when any fetch fails the current snapshot is kept and
    /// one error lists every failed kind.
    pub async fn refresh_all(&self) -> Result<Arc<Snapshot>, RefreshError> {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        let c = &self.collaborators;

        let (
            projects,
            reports,
            inventory,
            budgets,
            suppliers,
            team,
            equipment,
            schedules,
            safety,
            measurements,
            issues,
            documents,
            checklists,
        ) = tokio::join!(
            c.projects.get_all(),
            c.reports.get_all(),
            c.inventory.get_all(),
            c.budgets.get_all(),
            c.suppliers.get_all(),
            c.team.get_all(),
            c.equipment.get_all(),
            c.schedules.get_all(),
            c.safety.get_all(),
            c.measurements.get_all(),
            c.issues.get_all(),
            c.documents.get_all(),
            c.checklists.get_all(),
        );

        let mut failures = Vec::new();
        let next = Snapshot {
            projects: keep(EntityKind::Project, projects, &mut failures),
            reports: keep(EntityKind::Diary, reports, &mut failures),
            inventory: keep(EntityKind::Inventory, inventory, &mut failures),
            budgets: keep(EntityKind::Budget, budgets, &mut failures),
            suppliers: keep(EntityKind::Supplier, suppliers, &mut failures),
            team: keep(EntityKind::Team, team, &mut failures),
            equipment: keep(EntityKind::Equipment, equipment, &mut failures),
            schedules: keep(EntityKind::Schedule, schedules, &mut failures),
            safety: keep(EntityKind::Safety, safety, &mut failures),
            measurements: keep(EntityKind::Measurement, measurements, &mut failures),
            issues: keep(EntityKind::Issue, issues, &mut failures),
            documents: keep(EntityKind::Document, documents, &mut failures),
            checklists: keep(EntityKind::Quality, checklists, &mut failures),
            refreshed_at: Some(Utc::now()),
        };

        if !failures.is_empty() {
            let err = RefreshError { failures };
            tracing::error!(error = %err, "Refresh failed, keeping previous snapshot");
            return Err(err);
        }

        let next = Arc::new(next);
        self.snapshot.send_replace(Arc::clone(&next));
        tracing::info!(
            projects = next.projects.len(),
            reports = next.reports.len(),
            schedules = next.schedules.len(),
            "Snapshot refreshed"
        );
        Ok(next)
    }
}

fn keep<T>(
    kind: EntityKind,
    fetched: Result<Vec<T>, CollaboratorError>,
    failures: &mut Vec<(EntityKind, CollaboratorError)>,
) -> Vec<T> {
    fetched.unwrap_or_else(|e| {
        failures.push((kind, e));
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sitebook_core::models::IssueStatus;

    fn date(d: u32) -> Option<Date> {
        NaiveDate::from_ymd_opt(2024, 5, d)
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            projects: vec![Stored::new(
                "P1",
                Project {
                    name: "Tower A".into(),
                    ..Default::default()
                },
            )],
            reports: vec![
                Stored::new(
                    "R1",
                    DiaryEntry {
                        project_id: Some("P1".into()),
                        date: date(1),
                        report_type: Some(ReportType::Rdo),
                        ..Default::default()
                    },
                ),
                Stored::new(
                    "R2",
                    DiaryEntry {
                        project_id: Some("P1".into()),
                        date: date(9),
                        report_type: Some(ReportType::Conclusion),
                        ..Default::default()
                    },
                ),
                Stored::new(
                    "R3",
                    DiaryEntry {
                        date: date(5),
                        report_type: Some(ReportType::Rdo),
                        ..Default::default()
                    },
                ),
            ],
            issues: vec![Stored::new(
                "I1",
                Issue {
                    project_id: Some("P1".into()),
                    status: IssueStatus::Open,
                    due_date: date(2),
                    ..Default::default()
                },
            )],
            ..Default::default()
        }
    }

    #[test]
    fn dangling_project_references_get_a_placeholder_label() {
        let s = snapshot();
        assert_eq!(s.project_label(Some("P1")), "Tower A");
        assert_eq!(s.project_label(Some("gone")), NO_PROJECT_LABEL);
        assert_eq!(s.project_label(None), NO_PROJECT_LABEL);
    }

    #[test]
    fn reports_list_newest_first_with_type_filter() {
        let s = snapshot();
        let ids: Vec<_> = s.reports(None).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["R2", "R3", "R1"]);
        let rdo: Vec<_> = s
            .reports(Some(ReportType::Rdo))
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(rdo, ["R3", "R1"]);
    }

    #[test]
    fn overview_counts_related_records() {
        let s = snapshot();
        let overview = s.overview("P1").unwrap();
        assert_eq!(overview.project.data.name, "Tower A");
        assert_eq!(overview.count(EntityKind::Diary), 2);
        assert_eq!(overview.count(EntityKind::Issue), 1);
        assert_eq!(overview.count(EntityKind::Team), 0);
        assert!(s.overview("P9").is_none());
    }

    #[test]
    fn overdue_issues_respect_the_date() {
        let s = snapshot();
        assert_eq!(s.overdue_issues(date(3).unwrap()).len(), 1);
        assert!(s.overdue_issues(date(1).unwrap()).is_empty());
    }

    fn stock_and_budgets() -> Snapshot {
        let item = |id: &str, quantity: f64| {
            Stored::new(
                id,
                InventoryItem {
                    name: id.into(),
                    quantity,
                    min_stock: 10.0,
                    ..Default::default()
                },
            )
        };
        let budget = |id: &str, project: &str, total: f64, spent: f64| {
            Stored::new(
                id,
                Budget {
                    project_id: Some(project.into()),
                    name: id.into(),
                    total_amount: total,
                    spent_amount: spent,
                    ..Default::default()
                },
            )
        };
        Snapshot {
            inventory: vec![item("cement", 4.0), item("rebar", 10.0), item("sand", 25.0)],
            budgets: vec![
                budget("B1", "P1", 1_000.0, 400.0),
                budget("B2", "P1", 500.0, 650.0),
                budget("B3", "P2", 300.0, 0.0),
            ],
            ..snapshot()
        }
    }

    #[test]
    fn low_stock_includes_items_at_the_threshold() {
        let s = stock_and_budgets();
        let names: Vec<_> = s.low_stock().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(names, ["cement", "rebar"]);
    }

    #[test]
    fn overspent_budgets_are_listed_across_projects() {
        let s = stock_and_budgets();
        let ids: Vec<_> = s.overspent_budgets().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["B2"]);
    }

    #[test]
    fn budget_remaining_sums_one_project_and_can_go_negative() {
        let s = stock_and_budgets();
        assert_eq!(s.budget_remaining("P1"), 450.0);
        assert_eq!(s.budget_remaining("P2"), 300.0);
        assert_eq!(s.budget_remaining("P9"), 0.0);

        let over = Snapshot {
            budgets: vec![s.budgets[1].clone()],
            ..Snapshot::default()
        };
        assert_eq!(over.budget_remaining("P1"), -150.0);
    }

    #[test]
    fn validation_context_knows_snapshot_projects() {
        let ctx = snapshot().validation_context();
        assert!(ctx.project_exists("P1"));
        assert!(!ctx.project_exists("P2"));
    }
}
