//! Report workflow: saving with attachments and moving through approval.

use std::sync::Arc;

use sitebook_core::lifecycle::approval;
use sitebook_core::models::{ApprovalStatus, DiaryEntry};
use sitebook_core::views::View;
use sitebook_core::{CoreError, EntityId, Stored};
use sitebook_events::Severity;

use crate::attachments::AttachmentPipeline;
use crate::collaborator::PendingFile;
use crate::error::SyncError;
use crate::orchestrator::{CrudOrchestrator, Target};

pub struct ReportService {
    crud: Arc<CrudOrchestrator<DiaryEntry>>,
    pipeline: AttachmentPipeline,
}

impl ReportService {
    pub fn new(crud: Arc<CrudOrchestrator<DiaryEntry>>, pipeline: AttachmentPipeline) -> Self {
        Self { crud, pipeline }
    }

    /// Save a report form and upload `files` for it.
    ///
    /// Same flow as [`CrudOrchestrator::handle_create`], with the attachment
    /// pipeline run between the write and the single refresh. An edited
    /// report keeps the type it was created with. Upload failures do not
    /// fail the save: the report and any attachments uploaded before the
    /// failure stay persisted and a warning is shown.
    pub async fn save_report(
        &self,
        data: DiaryEntry,
        editing: Option<&Stored<DiaryEntry>>,
        files: &[PendingFile],
    ) -> Result<EntityId, SyncError> {
        let mut data = data;
        let target = match editing {
            Some(record) => {
                data.report_type = record.data.report_type;
                Target::Existing {
                    id: &record.id,
                    before: Some(record.clone()),
                }
            }
            None => Target::New,
        };

        let mutation = self
            .crud
            .write(data, target, self.crud.validator())
            .await
            .map_err(|e| self.crud.reject(e))?;

        if let Some(saved) = &mutation.after {
            let outcome = self.pipeline.attach(&mutation.id, saved, files).await;
            if !outcome.is_complete() {
                let reasons: Vec<String> = outcome.errors.iter().map(ToString::to_string).collect();
                self.crud.notify(
                    Severity::Warning,
                    format!(
                        "Report saved with {} of {} attachment(s) linked: {}",
                        outcome.attached.len(),
                        files.len(),
                        reasons.join("; ")
                    ),
                );
            }
        }

        self.crud.complete(&mutation).await;
        Ok(mutation.id)
    }

    /// Move report `id` one step forward (`filling → review → approved`).
    pub async fn advance_approval(&self, id: &str) -> Result<ApprovalStatus, SyncError> {
        let record = self.loaded(id)?;
        let from = record.data.approval_status;
        let Some(to) = approval::next(from) else {
            return Err(self.crud.reject(SyncError::Core(CoreError::InvalidTransition {
                entity: "report",
                from: from.as_str().to_string(),
                to: "next step".to_string(),
            })));
        };
        self.set_approval(record, to).await?;
        Ok(to)
    }

    /// Send a report under review back to filling.
    pub async fn send_back(&self, id: &str) -> Result<(), SyncError> {
        let record = self.loaded(id)?;
        self.set_approval(record, ApprovalStatus::Filling).await
    }

    /// The form that edits report `id`, routed by its report type.
    pub fn edit_view(&self, id: &str) -> Option<View> {
        self.crud
            .store()
            .snapshot()
            .find::<DiaryEntry>(id)
            .map(|r| View::edit_report(&r.data))
    }

    /// Status changes go through the direct update path; the report's
    /// content is not revalidated.
    async fn set_approval(
        &self,
        record: Stored<DiaryEntry>,
        to: ApprovalStatus,
    ) -> Result<(), SyncError> {
        approval::validate_transition(record.data.approval_status, to)
            .map_err(|e| self.crud.reject(e.into()))?;
        let data = DiaryEntry {
            approval_status: to,
            ..record.data
        };
        tracing::info!(id = %record.id, to = to.as_str(), "Changing report approval");
        self.crud.handle_update(&record.id, data).await
    }

    fn loaded(&self, id: &str) -> Result<Stored<DiaryEntry>, SyncError> {
        self.crud
            .store()
            .snapshot()
            .find::<DiaryEntry>(id)
            .cloned()
            .ok_or_else(|| {
                self.crud.reject(SyncError::Core(CoreError::NotFound {
                    entity: "report",
                    id: id.to_string(),
                }))
            })
    }
}
