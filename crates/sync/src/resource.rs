//! Per-kind wiring: which collaborator, snapshot collection and orchestrator
//! belong to each entity type.

use std::sync::Arc;

use sitebook_core::drafts::DraftSlot;
use sitebook_core::models::{
    Budget, DiaryEntry, DocumentRecord, Equipment, InventoryItem, Issue, Measurement, Project,
    QualityChecklist, SafetyRecord, Schedule, Supplier, TeamMember,
};
use sitebook_core::validation::Validate;
use sitebook_core::Stored;

use crate::collaborator::EntityApi;
use crate::orchestrator::CrudOrchestrator;
use crate::sitebook::Orchestrators;
use crate::store::Snapshot;

/// One remote API per entity kind.
#[derive(Clone)]
pub struct Collaborators {
    pub projects: Arc<dyn EntityApi<Project>>,
    pub reports: Arc<dyn EntityApi<DiaryEntry>>,
    pub inventory: Arc<dyn EntityApi<InventoryItem>>,
    pub budgets: Arc<dyn EntityApi<Budget>>,
    pub suppliers: Arc<dyn EntityApi<Supplier>>,
    pub team: Arc<dyn EntityApi<TeamMember>>,
    pub equipment: Arc<dyn EntityApi<Equipment>>,
    pub schedules: Arc<dyn EntityApi<Schedule>>,
    pub safety: Arc<dyn EntityApi<SafetyRecord>>,
    pub measurements: Arc<dyn EntityApi<Measurement>>,
    pub issues: Arc<dyn EntityApi<Issue>>,
    pub documents: Arc<dyn EntityApi<DocumentRecord>>,
    pub checklists: Arc<dyn EntityApi<QualityChecklist>>,
}

/// An entity type the sync layer can load, validate and write.
pub trait Resource: DraftSlot + Validate {
    fn api(collaborators: &Collaborators) -> &Arc<dyn EntityApi<Self>>;
    fn records(snapshot: &Snapshot) -> &[Stored<Self>];
    fn orchestrator(orchestrators: &Orchestrators) -> &CrudOrchestrator<Self>;
}

macro_rules! resource {
    ($ty:ty, $field:ident) => {
        impl Resource for $ty {
            fn api(collaborators: &Collaborators) -> &Arc<dyn EntityApi<Self>> {
                &collaborators.$field
            }

            fn records(snapshot: &Snapshot) -> &[Stored<Self>] {
                &snapshot.$field
            }

            fn orchestrator(orchestrators: &Orchestrators) -> &CrudOrchestrator<Self> {
                &orchestrators.$field
            }
        }
    };
}

resource!(Project, projects);
resource!(DiaryEntry, reports);
resource!(InventoryItem, inventory);
resource!(Budget, budgets);
resource!(Supplier, suppliers);
resource!(TeamMember, team);
resource!(Equipment, equipment);
resource!(Schedule, schedules);
resource!(SafetyRecord, safety);
resource!(Measurement, measurements);
resource!(Issue, issues);
resource!(DocumentRecord, documents);
resource!(QualityChecklist, checklists);
