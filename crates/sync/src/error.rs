//! Error taxonomy of the sync layer.

use std::fmt;

use sitebook_core::{CoreError, EntityId, EntityKind};

/// A collaborator (remote store or file storage) call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("Record {0} not found")]
    NotFound(EntityId),

    #[error("Remote store unavailable: {0}")]
    Unavailable(String),

    #[error("Rejected by remote store: {0}")]
    Rejected(String),
}

/// Which write a persistence error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
    Delete,
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// One or more collections failed to load. The previous snapshot is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshError {
    pub failures: Vec<(EntityKind, CollaboratorError)>,
}

impl RefreshError {
    pub fn failed_kinds(&self) -> Vec<EntityKind> {
        self.failures.iter().map(|(kind, _)| *kind).collect()
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Refresh failed for {} collection(s): ", self.failures.len())?;
        for (i, (kind, err)) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{kind}: {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RefreshError {}

/// Errors surfaced by the orchestrator boundary.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{entity} is invalid: {}", .errors.join("; "))]
    Validation {
        entity: &'static str,
        errors: Vec<String>,
    },

    #[error("Failed to {action} {entity}: {source}")]
    Persistence {
        entity: &'static str,
        action: WriteAction,
        source: CollaboratorError,
    },

    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error("Failed to upload '{file}': {source}")]
    Upload {
        file: String,
        source: CollaboratorError,
    },

    #[error("No pending {entity} draft to submit")]
    NoDraft { entity: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SyncError {
    /// Whether retrying the same user action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Persistence { .. } | Self::Refresh(_) | Self::Upload { .. }
        )
    }
}

/// Progress recomputation did not complete. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationWarning {
    #[error("Project {project_id} is not in the current snapshot")]
    MissingProject { project_id: EntityId },

    #[error("Failed to persist progress for project {project_id}: {source}")]
    Persist {
        project_id: EntityId,
        source: CollaboratorError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_error_lists_every_failure() {
        let err = RefreshError {
            failures: vec![
                (EntityKind::Budget, CollaboratorError::Unavailable("timeout".into())),
                (EntityKind::Issue, CollaboratorError::Rejected("denied".into())),
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Refresh failed for 2 collection(s)"));
        assert!(msg.contains("budget: Remote store unavailable: timeout"));
        assert!(msg.contains("issue: Rejected by remote store: denied"));
        assert_eq!(err.failed_kinds(), vec![EntityKind::Budget, EntityKind::Issue]);
    }

    #[test]
    fn validation_error_joins_messages() {
        let err = SyncError::Validation {
            entity: "Schedule task",
            errors: vec!["Task name is required".into(), "Project is required".into()],
        };
        assert_eq!(
            err.to_string(),
            "Schedule task is invalid: Task name is required; Project is required"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn persistence_errors_are_retryable() {
        let err = SyncError::Persistence {
            entity: "Project",
            action: WriteAction::Update,
            source: CollaboratorError::NotFound("P1".into()),
        };
        assert_eq!(err.to_string(), "Failed to update Project: Record P1 not found");
        assert!(err.is_retryable());
    }
}
