//! Lifecycle state machines for projects and report approval.
//!
//! Lives in `core` so both the sync layer and any presentation layer can ask
//! which moves are legal before issuing an update.

use crate::error::CoreError;

/// Project status transitions.
pub mod project {
    use super::CoreError;
    use crate::models::ProjectStatus;

    /// Statuses reachable from `from`. `Completed` is terminal.
    pub fn valid_transitions(from: ProjectStatus) -> &'static [ProjectStatus] {
        use ProjectStatus::*;
        match from {
            Planning => &[InProgress, Paused],
            InProgress => &[Completed, Paused],
            Paused => &[InProgress, Planning],
            Completed => &[],
        }
    }

    pub fn can_transition(from: ProjectStatus, to: ProjectStatus) -> bool {
        valid_transitions(from).contains(&to)
    }

    pub fn validate_transition(from: ProjectStatus, to: ProjectStatus) -> Result<(), CoreError> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                entity: "project",
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

/// Report approval transitions: `filling → review → approved`, with
/// `review → filling` when a reviewer sends the report back.
pub mod approval {
    use super::CoreError;
    use crate::models::ApprovalStatus;

    pub fn valid_transitions(from: ApprovalStatus) -> &'static [ApprovalStatus] {
        use ApprovalStatus::*;
        match from {
            Filling => &[Review],
            Review => &[Approved, Filling],
            Approved => &[],
        }
    }

    pub fn can_transition(from: ApprovalStatus, to: ApprovalStatus) -> bool {
        valid_transitions(from).contains(&to)
    }

    pub fn validate_transition(from: ApprovalStatus, to: ApprovalStatus) -> Result<(), CoreError> {
        if can_transition(from, to) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                entity: "report",
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }

    /// The forward step from `from`, if any.
    pub fn next(from: ApprovalStatus) -> Option<ApprovalStatus> {
        match from {
            ApprovalStatus::Filling => Some(ApprovalStatus::Review),
            ApprovalStatus::Review => Some(ApprovalStatus::Approved),
            ApprovalStatus::Approved => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalStatus, ProjectStatus};
    use assert_matches::assert_matches;

    #[test]
    fn project_happy_path() {
        assert!(project::can_transition(ProjectStatus::Planning, ProjectStatus::InProgress));
        assert!(project::can_transition(ProjectStatus::InProgress, ProjectStatus::Completed));
    }

    #[test]
    fn paused_projects_can_resume() {
        assert!(project::can_transition(ProjectStatus::InProgress, ProjectStatus::Paused));
        assert!(project::can_transition(ProjectStatus::Paused, ProjectStatus::InProgress));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(project::valid_transitions(ProjectStatus::Completed).is_empty());
        let err = project::validate_transition(ProjectStatus::Completed, ProjectStatus::Planning)
            .unwrap_err();
        assert_matches!(err, CoreError::InvalidTransition { entity: "project", .. });
        assert!(err.to_string().contains("completed"));
    }

    #[test]
    fn planning_cannot_skip_to_completed() {
        assert!(project::validate_transition(ProjectStatus::Planning, ProjectStatus::Completed)
            .is_err());
    }

    #[test]
    fn approval_moves_forward_one_step_at_a_time() {
        assert_eq!(approval::next(ApprovalStatus::Filling), Some(ApprovalStatus::Review));
        assert_eq!(approval::next(ApprovalStatus::Review), Some(ApprovalStatus::Approved));
        assert_eq!(approval::next(ApprovalStatus::Approved), None);
        assert!(approval::validate_transition(ApprovalStatus::Filling, ApprovalStatus::Approved)
            .is_err());
    }

    #[test]
    fn review_can_send_back_to_filling() {
        assert!(approval::can_transition(ApprovalStatus::Review, ApprovalStatus::Filling));
        assert!(!approval::can_transition(ApprovalStatus::Approved, ApprovalStatus::Filling));
    }
}
