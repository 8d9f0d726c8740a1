#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use sitebook_core::models::{Project, ProjectStatus, Schedule, ScheduleStatus};
use sitebook_core::{Date, Stored};
use sitebook_events::RecordingNotifier;
use sitebook_sync::memory::{MemoryBackend, MemoryFileStorage};
use sitebook_sync::{FixedConfirm, Sitebook, SyncConfig};

/// A [`Sitebook`] over the in-memory backend, with handles to inspect it.
pub struct Harness {
    pub backend: MemoryBackend,
    pub storage: Arc<MemoryFileStorage>,
    pub notifier: RecordingNotifier,
    pub sitebook: Sitebook,
}

impl Harness {
    /// Confirmations are accepted.
    pub fn new() -> Self {
        Self::build(MemoryFileStorage::new(), true)
    }

    /// Confirmations are declined.
    pub fn declining() -> Self {
        Self::build(MemoryFileStorage::new(), false)
    }

    pub fn with_storage(storage: MemoryFileStorage) -> Self {
        Self::build(storage, true)
    }

    fn build(storage: MemoryFileStorage, confirm: bool) -> Self {
        let backend = MemoryBackend::new();
        let storage = Arc::new(storage);
        let notifier = RecordingNotifier::new();
        let sitebook = Sitebook::new(
            backend.collaborators(),
            storage.clone(),
            Arc::new(FixedConfirm(confirm)),
            Arc::new(notifier.clone()),
            SyncConfig::default(),
        );
        Self {
            backend,
            storage,
            notifier,
            sitebook,
        }
    }

    /// Initial load. Panics if the backend is faulted.
    pub async fn load(&self) {
        self.sitebook
            .refresh()
            .await
            .expect("initial refresh should succeed");
    }

    pub fn refreshes(&self) -> usize {
        self.sitebook.store().refresh_count()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> Date {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A project that passes validation.
pub fn project(id: &str, name: &str) -> Stored<Project> {
    Stored::new(
        id,
        Project {
            name: name.to_string(),
            client: "Municipality".to_string(),
            start_date: Some(date(2024, 1, 8)),
            end_date: Some(date(2024, 12, 20)),
            budget: 500_000.0,
            status: ProjectStatus::InProgress,
            ..Default::default()
        },
    )
}

/// A schedule task payload that passes validation against `project_id`.
pub fn task(project_id: &str, name: &str, progress: u8, status: ScheduleStatus) -> Schedule {
    Schedule {
        project_id: Some(project_id.to_string()),
        name: name.to_string(),
        start_date: Some(date(2024, 2, 1)),
        end_date: Some(date(2024, 3, 1)),
        progress,
        status,
        ..Default::default()
    }
}
