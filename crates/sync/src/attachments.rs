//! Uploads report attachments and links them back to the entry.

use std::sync::Arc;

use sitebook_core::models::{Attachment, DiaryEntry};
use uuid::Uuid;

use crate::collaborator::{EntityApi, FileStorage, PendingFile};
use crate::error::{SyncError, WriteAction};

/// Result of one pipeline run.
#[derive(Debug, Default)]
pub struct AttachmentOutcome {
    /// Records linked to the entry and persisted. Uploads that succeeded
    /// before a failed upload are included.
    pub attached: Vec<Attachment>,
    /// Files that reached storage but could not be linked because the entry
    /// update failed.
    pub unlinked: Vec<Attachment>,
    pub errors: Vec<SyncError>,
}

impl AttachmentOutcome {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct AttachmentPipeline {
    storage: Arc<dyn FileStorage>,
    reports: Arc<dyn EntityApi<DiaryEntry>>,
}

impl AttachmentPipeline {
    pub fn new(storage: Arc<dyn FileStorage>, reports: Arc<dyn EntityApi<DiaryEntry>>) -> Self {
        Self { storage, reports }
    }

    /// Upload `files` one at a time for the saved entry `entry_id`, then
    /// append their records to `entry.attachments` and persist the entry.
    ///
    /// Only daily reports take attachments; any other entry, or an empty
    /// file list, is a no-op. The first failed upload stops the run. Files
    /// uploaded before it are kept and linked.
    pub async fn attach(
        &self,
        entry_id: &str,
        entry: &DiaryEntry,
        files: &[PendingFile],
    ) -> AttachmentOutcome {
        let mut outcome = AttachmentOutcome::default();
        let accepts = entry
            .report_type
            .is_some_and(|report_type| report_type.accepts_attachments());
        if !accepts || files.is_empty() {
            return outcome;
        }

        let project_id = entry.project_id.as_deref().unwrap_or_default();
        for file in files {
            match self.storage.upload_attachment(project_id, entry_id, file).await {
                Ok(url) => {
                    tracing::debug!(entry_id, file = %file.name, "Attachment uploaded");
                    outcome.attached.push(Attachment {
                        id: Uuid::new_v4().to_string(),
                        name: file.name.clone(),
                        url,
                    });
                }
                Err(source) => {
                    tracing::warn!(
                        entry_id,
                        file = %file.name,
                        uploaded = outcome.attached.len(),
                        error = %source,
                        "Attachment upload failed, stopping"
                    );
                    outcome.errors.push(SyncError::Upload {
                        file: file.name.clone(),
                        source,
                    });
                    break;
                }
            }
        }

        if outcome.attached.is_empty() {
            return outcome;
        }

        let mut linked = entry.clone();
        linked.attachments.extend(outcome.attached.iter().cloned());
        match self.reports.update(entry_id, &linked).await {
            Ok(()) => {
                tracing::info!(
                    entry_id,
                    project_id,
                    count = outcome.attached.len(),
                    "Attachments linked"
                );
            }
            Err(source) => {
                tracing::error!(
                    entry_id,
                    uploaded = outcome.attached.len(),
                    error = %source,
                    "Failed to link attachments"
                );
                outcome.unlinked = std::mem::take(&mut outcome.attached);
                outcome.errors.push(SyncError::Persistence {
                    entity: "Report",
                    action: WriteAction::Update,
                    source,
                });
            }
        }
        outcome
    }
}
