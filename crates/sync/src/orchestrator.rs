//! Generic create/update/delete flow for one entity kind.
//!
//! Every write follows the same sequence: validate (when a validator is
//! configured), sanitize, call the collaborator, refresh the store exactly
//! once, run post-refresh hooks, notify. Failures before the refresh are
//! reported to the user once and returned; nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use sitebook_core::validation::{sanitize, Validate, ValidationContext, ValidationResult};
use sitebook_core::{Entity, EntityId, Stored};
use sitebook_events::{Notifier, Severity};

use crate::collaborator::{Confirm, EntityApi};
use crate::config::SyncConfig;
use crate::error::{CollaboratorError, SyncError, WriteAction};
use crate::resource::Resource;
use crate::store::EntityStore;

/// Checks a payload against the current snapshot before it is written.
pub type Validator<T> = Arc<dyn Fn(&T, &ValidationContext) -> ValidationResult + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing happened.
    Declined,
}

/// A completed write, as seen by post-refresh hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub action: WriteAction,
    pub id: EntityId,
    /// The record as last loaded, for updates and deletes.
    pub before: Option<Stored<T>>,
    /// The sanitized payload that was written. `None` for deletes.
    pub after: Option<T>,
}

impl<T: Entity> Mutation<T> {
    /// Projects referenced before or after the write, without duplicates.
    /// A record moved between projects yields both.
    pub fn affected_projects(&self) -> Vec<EntityId> {
        let before = self.before.as_ref().and_then(|r| r.project_id());
        let after = self.after.as_ref().and_then(|d| d.project_id());
        let mut ids: Vec<EntityId> = Vec::with_capacity(2);
        for id in [before, after].into_iter().flatten() {
            if !ids.iter().any(|known| known == id) {
                ids.push(id.to_string());
            }
        }
        ids
    }
}

/// Runs after the store has been refreshed following a successful write.
#[async_trait]
pub trait MutationHook<T: Entity>: Send + Sync {
    async fn after_refresh(&self, mutation: &Mutation<T>);
}

/// What a write goes to: a new record, or an existing id.
pub(crate) enum Target<'a, T> {
    New,
    Existing {
        id: &'a str,
        before: Option<Stored<T>>,
    },
}

pub struct CrudOrchestrator<T: Resource> {
    label: &'static str,
    api: Arc<dyn EntityApi<T>>,
    store: Arc<EntityStore>,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
    config: SyncConfig,
    validator: Option<Validator<T>>,
    hooks: Vec<Arc<dyn MutationHook<T>>>,
}

impl<T: Resource> CrudOrchestrator<T> {
    /// An orchestrator without a validator, writing through the store's
    /// collaborator for `T`.
    pub fn new(
        store: Arc<EntityStore>,
        confirm: Arc<dyn Confirm>,
        notifier: Arc<dyn Notifier>,
        config: SyncConfig,
    ) -> Self {
        let api = Arc::clone(T::api(store.collaborators()));
        Self {
            label: T::KIND.label(),
            api,
            store,
            confirm,
            notifier,
            config,
            validator: None,
            hooks: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&T, &ValidationContext) -> ValidationResult + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Validate creates with the entity's own [`Validate`] rules.
    pub fn with_default_validation(self) -> Self {
        self.with_validator(|data: &T, ctx: &ValidationContext| data.validate(ctx))
    }

    pub fn with_hook(mut self, hook: Arc<dyn MutationHook<T>>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    pub(crate) fn validator(&self) -> Option<&Validator<T>> {
        self.validator.as_ref()
    }

    // -- Operations ---------------------------------------------------------

    /// Save a form: update `editing` when it is a persisted record, else
    /// create. Returns the id written.
    ///
    /// An invalid payload is rejected before any collaborator call.
    pub async fn handle_create(
        &self,
        data: T,
        editing: Option<&Stored<T>>,
    ) -> Result<EntityId, SyncError> {
        let target = match editing {
            Some(record) => Target::Existing {
                id: &record.id,
                before: Some(record.clone()),
            },
            None => Target::New,
        };
        let mutation = self
            .write(data, target, self.validator.as_ref())
            .await
            .map_err(|e| self.reject(e))?;
        self.complete(&mutation).await;
        Ok(mutation.id)
    }

    /// Update record `id` directly. Does not validate, even when a
    /// validator is configured; see [`handle_update_checked`](Self::handle_update_checked).
    pub async fn handle_update(&self, id: &str, data: T) -> Result<(), SyncError> {
        self.update_by_id(id, data, None).await
    }

    /// [`handle_update`](Self::handle_update) behind the configured
    /// validator, or the entity's own rules when none is configured.
    pub async fn handle_update_checked(&self, id: &str, data: T) -> Result<(), SyncError> {
        let fallback: Validator<T> =
            Arc::new(|data: &T, ctx: &ValidationContext| data.validate(ctx));
        let validator = self.validator.as_ref().unwrap_or(&fallback);
        self.update_by_id(id, data, Some(validator)).await
    }

    /// Ask for confirmation, then delete record `id`.
    pub async fn handle_delete(&self, id: &str) -> Result<DeleteOutcome, SyncError> {
        let prompt = format!("Delete this {}?", self.label.to_lowercase());
        if !self.confirm.confirm(&prompt).await {
            tracing::debug!(entity = self.label, id, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let before = self.store.snapshot().find::<T>(id).cloned();
        self.api
            .delete(id)
            .await
            .map_err(|source| self.reject(self.persistence(WriteAction::Delete, source)))?;
        tracing::info!(entity = self.label, id, "Record deleted");

        let mutation = Mutation {
            action: WriteAction::Delete,
            id: id.to_string(),
            before,
            after: None,
        };
        self.complete(&mutation).await;
        Ok(DeleteOutcome::Deleted)
    }

    // -- Steps shared with ReportService -------------------------------------

    /// Validate, sanitize and persist. No refresh, no notification.
    pub(crate) async fn write(
        &self,
        data: T,
        target: Target<'_, T>,
        validator: Option<&Validator<T>>,
    ) -> Result<Mutation<T>, SyncError> {
        if let Some(validate) = validator {
            let result = validate(&data, &self.store.snapshot().validation_context());
            if !result.is_valid {
                return Err(SyncError::Validation {
                    entity: self.label,
                    errors: result.messages(),
                });
            }
        }

        let clean = sanitize(&data)?;
        match target {
            Target::New => {
                let id = self
                    .api
                    .create(&clean)
                    .await
                    .map_err(|source| self.persistence(WriteAction::Create, source))?;
                tracing::info!(entity = self.label, %id, project_id = ?clean.project_id(), "Record created");
                Ok(Mutation {
                    action: WriteAction::Create,
                    id,
                    before: None,
                    after: Some(clean),
                })
            }
            Target::Existing { id, before } => {
                self.api
                    .update(id, &clean)
                    .await
                    .map_err(|source| self.persistence(WriteAction::Update, source))?;
                tracing::info!(entity = self.label, id, project_id = ?clean.project_id(), "Record updated");
                Ok(Mutation {
                    action: WriteAction::Update,
                    id: id.to_string(),
                    before,
                    after: Some(clean),
                })
            }
        }
    }

    /// Refresh once, run hooks, tell the user. A failed refresh does not
    /// undo the write; it is surfaced as a warning and hooks are skipped,
    /// which the warning mentions when any are registered.
    pub(crate) async fn complete(&self, mutation: &Mutation<T>) {
        match self.store.refresh_all().await {
            Ok(_) => {
                for hook in &self.hooks {
                    hook.after_refresh(mutation).await;
                }
                self.notify(Severity::Success, self.success_message(mutation.action));
            }
            Err(e) => {
                tracing::warn!(
                    entity = self.label,
                    id = %mutation.id,
                    skipped_hooks = self.hooks.len(),
                    error = %e,
                    "Saved but refresh failed"
                );
                self.notify(Severity::Success, self.success_message(mutation.action));
                let warning = if self.hooks.is_empty() {
                    "Saved, but the lists could not be reloaded. They may be out of date."
                } else {
                    "Saved, but the lists could not be reloaded. They may be out of date, \
                     and derived values such as project progress were not recomputed."
                };
                self.notify(Severity::Warning, warning);
            }
        }
    }

    /// Log and notify a failed write, then hand the error back.
    pub(crate) fn reject(&self, err: SyncError) -> SyncError {
        let mut notification = self.config.notification(Severity::Error, err.to_string());
        match &err {
            SyncError::Validation { errors, .. } => {
                tracing::warn!(entity = self.label, ?errors, "Validation failed");
                notification = notification.with_payload(json!({
                    "entity": T::KIND,
                    "errors": errors,
                }));
            }
            other => {
                tracing::error!(entity = self.label, error = %other, "Write failed");
            }
        }
        self.notifier.notify(notification);
        err
    }

    pub(crate) fn notify(&self, severity: Severity, message: impl Into<String>) {
        self.notifier.notify(self.config.notification(severity, message));
    }

    pub(crate) fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    fn persistence(&self, action: WriteAction, source: CollaboratorError) -> SyncError {
        SyncError::Persistence {
            entity: self.label,
            action,
            source,
        }
    }

    fn success_message(&self, action: WriteAction) -> String {
        let verb = match action {
            WriteAction::Create => "created",
            WriteAction::Update => "updated",
            WriteAction::Delete => "deleted",
        };
        format!("{} {verb} successfully", self.label)
    }

    async fn update_by_id(
        &self,
        id: &str,
        data: T,
        validator: Option<&Validator<T>>,
    ) -> Result<(), SyncError> {
        let before = self.store.snapshot().find::<T>(id).cloned();
        let mutation = self
            .write(data, Target::Existing { id, before }, validator)
            .await
            .map_err(|e| self.reject(e))?;
        self.complete(&mutation).await;
        Ok(())
    }
}
