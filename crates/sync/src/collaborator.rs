//! Contracts for the remote store, file storage and user confirmation.
//!
//! The sync layer never talks to a backend directly; every side effect goes
//! through one of these traits so hosts can plug in a real backend and tests
//! can plug in [`crate::memory`].

use async_trait::async_trait;
use sitebook_core::{Entity, EntityId, Stored};

use crate::error::CollaboratorError;

/// Remote CRUD for one entity kind.
#[async_trait]
pub trait EntityApi<T: Entity>: Send + Sync {
    /// Persist a new record and return its assigned id.
    async fn create(&self, data: &T) -> Result<EntityId, CollaboratorError>;

    /// Every record of this kind.
    async fn get_all(&self) -> Result<Vec<Stored<T>>, CollaboratorError>;

    /// Replace the payload of record `id`.
    async fn update(&self, id: &str, data: &T) -> Result<(), CollaboratorError>;

    async fn delete(&self, id: &str) -> Result<(), CollaboratorError>;
}

/// A file chosen by the user, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Blob storage for report attachments.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Upload `file` under `project_id/entry_id` and return its public URL.
    async fn upload_attachment(
        &self,
        project_id: &str,
        entry_id: &str,
        file: &PendingFile,
    ) -> Result<String, CollaboratorError>;
}

/// Asks the user to confirm a destructive action. Resolves once the user
/// has answered.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Answers every prompt the same way. For headless hosts and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirm(pub bool);

#[async_trait]
impl Confirm for FixedConfirm {
    async fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, answer = self.0, "Auto-answered confirmation");
        self.0
    }
}
