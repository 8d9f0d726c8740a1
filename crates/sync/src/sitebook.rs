//! One handle over the whole sync layer.

use std::sync::Arc;

use sitebook_core::models::{
    Budget, DiaryEntry, DocumentRecord, Equipment, InventoryItem, Issue, Measurement, Project,
    QualityChecklist, SafetyRecord, Schedule, Supplier, TeamMember,
};
use sitebook_core::navigation::{Command, ViewStateController};
use sitebook_core::{EntityId, EntityKind};
use sitebook_events::{Notifier, Severity};

use crate::attachments::AttachmentPipeline;
use crate::collaborator::{Confirm, FileStorage, PendingFile};
use crate::config::SyncConfig;
use crate::error::{RefreshError, SyncError};
use crate::orchestrator::{CrudOrchestrator, DeleteOutcome};
use crate::progress::ProgressAggregator;
use crate::reports::ReportService;
use crate::resource::{Collaborators, Resource};
use crate::store::{EntityStore, Snapshot};

/// One orchestrator per entity kind.
pub struct Orchestrators {
    pub(crate) projects: Arc<CrudOrchestrator<Project>>,
    pub(crate) reports: Arc<CrudOrchestrator<DiaryEntry>>,
    pub(crate) inventory: Arc<CrudOrchestrator<InventoryItem>>,
    pub(crate) budgets: Arc<CrudOrchestrator<Budget>>,
    pub(crate) suppliers: Arc<CrudOrchestrator<Supplier>>,
    pub(crate) team: Arc<CrudOrchestrator<TeamMember>>,
    pub(crate) equipment: Arc<CrudOrchestrator<Equipment>>,
    pub(crate) schedules: Arc<CrudOrchestrator<Schedule>>,
    pub(crate) safety: Arc<CrudOrchestrator<SafetyRecord>>,
    pub(crate) measurements: Arc<CrudOrchestrator<Measurement>>,
    pub(crate) issues: Arc<CrudOrchestrator<Issue>>,
    pub(crate) documents: Arc<CrudOrchestrator<DocumentRecord>>,
    pub(crate) checklists: Arc<CrudOrchestrator<QualityChecklist>>,
}

/// Store, orchestrators, progress aggregation and the report workflow,
/// wired over one set of collaborators.
///
/// Every orchestrator validates creates with the entity's own rules. The
/// schedule orchestrator recomputes project progress after each write.
pub struct Sitebook {
    store: Arc<EntityStore>,
    crud: Orchestrators,
    reports: ReportService,
    progress: Arc<ProgressAggregator>,
    notifier: Arc<dyn Notifier>,
    config: SyncConfig,
}

impl Sitebook {
    pub fn new(
        collaborators: Collaborators,
        storage: Arc<dyn FileStorage>,
        confirm: Arc<dyn Confirm>,
        notifier: Arc<dyn Notifier>,
        config: SyncConfig,
    ) -> Self {
        let store = Arc::new(EntityStore::new(collaborators));
        let progress = Arc::new(ProgressAggregator::new(
            store.clone(),
            notifier.clone(),
            config.clone(),
        ));

        let crud = Orchestrators {
            projects: orchestrator(&store, &confirm, &notifier, &config),
            reports: orchestrator(&store, &confirm, &notifier, &config),
            inventory: orchestrator(&store, &confirm, &notifier, &config),
            budgets: orchestrator(&store, &confirm, &notifier, &config),
            suppliers: orchestrator(&store, &confirm, &notifier, &config),
            team: orchestrator(&store, &confirm, &notifier, &config),
            equipment: orchestrator(&store, &confirm, &notifier, &config),
            schedules: Arc::new(
                CrudOrchestrator::new(
                    store.clone(),
                    confirm.clone(),
                    notifier.clone(),
                    config.clone(),
                )
                .with_default_validation()
                .with_hook(progress.clone()),
            ),
            safety: orchestrator(&store, &confirm, &notifier, &config),
            measurements: orchestrator(&store, &confirm, &notifier, &config),
            issues: orchestrator(&store, &confirm, &notifier, &config),
            documents: orchestrator(&store, &confirm, &notifier, &config),
            checklists: orchestrator(&store, &confirm, &notifier, &config),
        };

        let pipeline = AttachmentPipeline::new(storage, store.collaborators().reports.clone());
        let reports = ReportService::new(crud.reports.clone(), pipeline);

        Self {
            store,
            crud,
            reports,
            progress,
            notifier,
            config,
        }
    }

    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    pub fn crud<T: Resource>(&self) -> &CrudOrchestrator<T> {
        T::orchestrator(&self.crud)
    }

    pub fn reports(&self) -> &ReportService {
        &self.reports
    }

    pub fn progress(&self) -> &ProgressAggregator {
        &self.progress
    }

    /// Initial load, or a manual reload. Failures are shown to the user.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, RefreshError> {
        self.store.refresh_all().await.inspect_err(|e| {
            let message = format!("Could not load data: {e}");
            self.notifier
                .notify(self.config.notification(Severity::Error, message));
        })
    }

    /// Save the pending draft of `T`. On success the draft is dropped and
    /// the controller shows the kind's list; on failure both stay as they
    /// were so the user can fix the form and retry.
    pub async fn submit<T: Resource>(
        &self,
        controller: &mut ViewStateController,
    ) -> Result<EntityId, SyncError> {
        let draft = controller.pending::<T>().ok_or(SyncError::NoDraft {
            entity: T::KIND.label(),
        })?;
        let id = self
            .crud::<T>()
            .handle_create(draft.data, draft.editing.as_ref())
            .await?;
        controller.apply(Command::Saved { kind: T::KIND });
        Ok(id)
    }

    /// [`submit`](Self::submit) for report forms, uploading `files` for the
    /// saved report.
    pub async fn submit_report(
        &self,
        controller: &mut ViewStateController,
        files: &[PendingFile],
    ) -> Result<EntityId, SyncError> {
        let draft = controller
            .pending::<DiaryEntry>()
            .ok_or(SyncError::NoDraft { entity: "Report" })?;
        let id = self
            .reports
            .save_report(draft.data, draft.editing.as_ref(), files)
            .await?;
        controller.apply(Command::Saved {
            kind: EntityKind::Diary,
        });
        Ok(id)
    }

    pub async fn delete<T: Resource>(&self, id: &str) -> Result<DeleteOutcome, SyncError> {
        self.crud::<T>().handle_delete(id).await
    }
}

fn orchestrator<T: Resource>(
    store: &Arc<EntityStore>,
    confirm: &Arc<dyn Confirm>,
    notifier: &Arc<dyn Notifier>,
    config: &SyncConfig,
) -> Arc<CrudOrchestrator<T>> {
    Arc::new(
        CrudOrchestrator::new(store.clone(), confirm.clone(), notifier.clone(), config.clone())
            .with_default_validation(),
    )
}
