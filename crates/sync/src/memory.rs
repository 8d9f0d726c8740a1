//! In-memory collaborators with call counters and fault injection.
//!
//! Used by the test suites and for running the sync layer without a backend.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use sitebook_core::models::{
    Budget, DiaryEntry, DocumentRecord, Equipment, InventoryItem, Issue, Measurement, Project,
    QualityChecklist, SafetyRecord, Schedule, Supplier, TeamMember,
};
use sitebook_core::{Entity, EntityId, Stored};
use uuid::Uuid;

use crate::collaborator::{EntityApi, FileStorage, PendingFile};
use crate::error::CollaboratorError;
use crate::resource::Collaborators;

/// One of the four [`EntityApi`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    GetAll,
    Update,
    Delete,
}

/// How many times each operation was called, failed calls included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub create: usize,
    pub get_all: usize,
    pub update: usize,
    pub delete: usize,
}

impl CallCounts {
    /// Create, update and delete calls.
    pub fn writes(&self) -> usize {
        self.create + self.update + self.delete
    }
}

struct MemoryState<T> {
    records: Vec<Stored<T>>,
    calls: CallCounts,
    failing: Vec<Operation>,
}

/// A remote collection held in a `Vec`.
pub struct MemoryApi<T> {
    state: Mutex<MemoryState<T>>,
}

impl<T: Entity> Default for MemoryApi<T> {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl<T: Entity> MemoryApi<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Stored<T>>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                records,
                calls: CallCounts::default(),
                failing: Vec::new(),
            }),
        }
    }

    pub fn records(&self) -> Vec<Stored<T>> {
        self.lock().records.clone()
    }

    pub fn get(&self, id: &str) -> Option<Stored<T>> {
        self.lock().records.iter().find(|r| r.id == id).cloned()
    }

    /// Insert a record directly, bypassing counters.
    pub fn seed(&self, record: Stored<T>) {
        self.lock().records.push(record);
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Make every later call of `operation` fail until [`heal`](Self::heal).
    pub fn fail(&self, operation: Operation) {
        let mut state = self.lock();
        if !state.failing.contains(&operation) {
            state.failing.push(operation);
        }
    }

    pub fn heal(&self) {
        self.lock().failing.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the call, then fail it if `operation` is faulted.
    fn begin(
        &self,
        operation: Operation,
    ) -> Result<MutexGuard<'_, MemoryState<T>>, CollaboratorError> {
        let mut state = self.lock();
        match operation {
            Operation::Create => state.calls.create += 1,
            Operation::GetAll => state.calls.get_all += 1,
            Operation::Update => state.calls.update += 1,
            Operation::Delete => state.calls.delete += 1,
        }
        if state.failing.contains(&operation) {
            return Err(CollaboratorError::Unavailable(format!(
                "injected {operation:?} failure for {}",
                T::KIND
            )));
        }
        Ok(state)
    }
}

#[async_trait]
impl<T: Entity> EntityApi<T> for MemoryApi<T> {
    async fn create(&self, data: &T) -> Result<EntityId, CollaboratorError> {
        let mut state = self.begin(Operation::Create)?;
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        state.records.push(Stored {
            id: id.clone(),
            created_at: Some(now),
            updated_at: Some(now),
            data: data.clone(),
        });
        Ok(id)
    }

    async fn get_all(&self) -> Result<Vec<Stored<T>>, CollaboratorError> {
        let state = self.begin(Operation::GetAll)?;
        Ok(state.records.clone())
    }

    async fn update(&self, id: &str, data: &T) -> Result<(), CollaboratorError> {
        let mut state = self.begin(Operation::Update)?;
        let record = state
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CollaboratorError::NotFound(id.to_string()))?;
        record.data = data.clone();
        record.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), CollaboratorError> {
        let mut state = self.begin(Operation::Delete)?;
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        if state.records.len() == before {
            return Err(CollaboratorError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// One [`MemoryApi`] per kind, with typed handles kept for inspection.
#[derive(Default)]
pub struct MemoryBackend {
    pub projects: Arc<MemoryApi<Project>>,
    pub reports: Arc<MemoryApi<DiaryEntry>>,
    pub inventory: Arc<MemoryApi<InventoryItem>>,
    pub budgets: Arc<MemoryApi<Budget>>,
    pub suppliers: Arc<MemoryApi<Supplier>>,
    pub team: Arc<MemoryApi<TeamMember>>,
    pub equipment: Arc<MemoryApi<Equipment>>,
    pub schedules: Arc<MemoryApi<Schedule>>,
    pub safety: Arc<MemoryApi<SafetyRecord>>,
    pub measurements: Arc<MemoryApi<Measurement>>,
    pub issues: Arc<MemoryApi<Issue>>,
    pub documents: Arc<MemoryApi<DocumentRecord>>,
    pub checklists: Arc<MemoryApi<QualityChecklist>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            projects: self.projects.clone(),
            reports: self.reports.clone(),
            inventory: self.inventory.clone(),
            budgets: self.budgets.clone(),
            suppliers: self.suppliers.clone(),
            team: self.team.clone(),
            equipment: self.equipment.clone(),
            schedules: self.schedules.clone(),
            safety: self.safety.clone(),
            measurements: self.measurements.clone(),
            issues: self.issues.clone(),
            documents: self.documents.clone(),
            checklists: self.checklists.clone(),
        }
    }

    /// Total `get_all` calls across all kinds.
    pub fn fetches(&self) -> usize {
        [
            self.projects.calls().get_all,
            self.reports.calls().get_all,
            self.inventory.calls().get_all,
            self.budgets.calls().get_all,
            self.suppliers.calls().get_all,
            self.team.calls().get_all,
            self.equipment.calls().get_all,
            self.schedules.calls().get_all,
            self.safety.calls().get_all,
            self.measurements.calls().get_all,
            self.issues.calls().get_all,
            self.documents.calls().get_all,
            self.checklists.calls().get_all,
        ]
        .into_iter()
        .sum()
    }
}

/// An uploaded blob as recorded by [`MemoryFileStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: String,
    pub size: usize,
}

#[derive(Default)]
struct StorageState {
    files: Vec<StoredFile>,
    attempts: usize,
    fail_on: Option<usize>,
}

/// File storage that keeps uploads in memory and serves `memory://` URLs.
#[derive(Default)]
pub struct MemoryFileStorage {
    state: Mutex<StorageState>,
}

impl MemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`th upload attempt (1-based); the others succeed.
    pub fn fail_on_upload(n: usize) -> Self {
        Self {
            state: Mutex::new(StorageState {
                fail_on: Some(n),
                ..Default::default()
            }),
        }
    }

    pub fn files(&self) -> Vec<StoredFile> {
        self.lock().files.clone()
    }

    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    fn lock(&self) -> MutexGuard<'_, StorageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn upload_attachment(
        &self,
        project_id: &str,
        entry_id: &str,
        file: &PendingFile,
    ) -> Result<String, CollaboratorError> {
        let mut state = self.lock();
        state.attempts += 1;
        if state.fail_on == Some(state.attempts) {
            return Err(CollaboratorError::Unavailable(format!(
                "injected failure uploading {}",
                file.name
            )));
        }
        let path = format!("{project_id}/{entry_id}/{}", file.name);
        state.files.push(StoredFile {
            path: path.clone(),
            size: file.bytes.len(),
        });
        Ok(format!("memory://{path}"))
    }
}
