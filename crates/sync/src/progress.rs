//! Keeps each project's `progress` in line with its schedule tasks.

use std::sync::Arc;

use async_trait::async_trait;
use sitebook_core::models::{Project, Schedule};
use sitebook_core::progress::{AverageProgress, ProgressFormula};
use sitebook_events::{Notifier, Severity};

use crate::config::SyncConfig;
use crate::error::AggregationWarning;
use crate::orchestrator::{Mutation, MutationHook};
use crate::store::EntityStore;

/// Recomputes project progress after schedule writes.
///
/// Registered as a [`MutationHook`] on the schedule orchestrator, so it reads
/// the snapshot the write's refresh produced. It persists the project with a
/// full-field update and does not refresh again; the next refresh shows the
/// new value. Failures never undo the schedule write.
pub struct ProgressAggregator {
    store: Arc<EntityStore>,
    notifier: Arc<dyn Notifier>,
    config: SyncConfig,
    formula: Arc<dyn ProgressFormula>,
}

impl ProgressAggregator {
    pub fn new(store: Arc<EntityStore>, notifier: Arc<dyn Notifier>, config: SyncConfig) -> Self {
        Self {
            store,
            notifier,
            config,
            formula: Arc::new(AverageProgress),
        }
    }

    pub fn with_formula(mut self, formula: Arc<dyn ProgressFormula>) -> Self {
        self.formula = formula;
        self
    }

    /// Recompute and persist the progress of `project_id` from the current
    /// snapshot. Returns the new value.
    pub async fn recompute(&self, project_id: &str) -> Result<u8, AggregationWarning> {
        let snapshot = self.store.snapshot();
        let project = snapshot.find::<Project>(project_id).ok_or_else(|| {
            AggregationWarning::MissingProject {
                project_id: project_id.to_string(),
            }
        })?;

        let tasks: Vec<&Schedule> = snapshot
            .for_project::<Schedule>(project_id)
            .into_iter()
            .map(|t| &t.data)
            .collect();
        let progress = self.formula.project_progress(&tasks);
        if progress == project.data.progress {
            tracing::debug!(project_id, progress, "Project progress unchanged");
            return Ok(progress);
        }

        let updated = Project {
            progress,
            ..project.data.clone()
        };
        self.store
            .collaborators()
            .projects
            .update(project_id, &updated)
            .await
            .map_err(|source| AggregationWarning::Persist {
                project_id: project_id.to_string(),
                source,
            })?;

        tracing::info!(
            project_id,
            from = project.data.progress,
            to = progress,
            tasks = tasks.len(),
            "Project progress recomputed"
        );
        Ok(progress)
    }
}

#[async_trait]
impl MutationHook<Schedule> for ProgressAggregator {
    async fn after_refresh(&self, mutation: &Mutation<Schedule>) {
        for project_id in mutation.affected_projects() {
            match self.recompute(&project_id).await {
                Ok(_) => {}
                // Dangling reference: nothing to aggregate into.
                Err(AggregationWarning::MissingProject { .. }) => {
                    tracing::debug!(%project_id, "Skipping progress for unknown project");
                }
                Err(warning) => {
                    tracing::warn!(%project_id, error = %warning, "Progress aggregation failed");
                    self.notifier.notify(self.config.notification(
                        Severity::Warning,
                        "Task saved, but project progress could not be updated.",
                    ));
                }
            }
        }
    }
}
