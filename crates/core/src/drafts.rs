//! Pending form state: at most one draft per entity kind.

use crate::entity::{Entity, EntityKind, Stored};
use crate::models::{
    Budget, DiaryEntry, DocumentRecord, Equipment, InventoryItem, Issue, Measurement, Project,
    QualityChecklist, SafetyRecord, Schedule, Supplier, TeamMember,
};
use crate::types::EntityId;
use crate::views::View;

/// A form being filled in. `editing` holds the persisted record when the
/// form edits an existing entry; `None` means the record is new.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<T> {
    pub editing: Option<Stored<T>>,
    pub data: T,
}

impl<T: Entity> Draft<T> {
    pub fn blank() -> Self {
        Self::new(T::default())
    }

    pub fn new(data: T) -> Self {
        Self {
            editing: None,
            data,
        }
    }

    /// Start editing `record`; the form starts from its current values.
    pub fn for_edit(record: &Stored<T>) -> Self {
        Self {
            editing: Some(record.clone()),
            data: record.data.clone(),
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|r| r.id.as_str())
    }

    pub fn is_new(&self) -> bool {
        self.editing.is_none()
    }
}

/// Maps an entity type to its slot in [`Drafts`].
pub trait DraftSlot: Entity {
    fn slot(drafts: &Drafts) -> &Option<Draft<Self>>;
    fn slot_mut(drafts: &mut Drafts) -> &mut Option<Draft<Self>>;

    /// The view that edits this record.
    fn edit_view(&self) -> View {
        View::edit_form(Self::KIND)
    }
}

/// One optional draft per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drafts {
    project: Option<Draft<Project>>,
    diary: Option<Draft<DiaryEntry>>,
    inventory: Option<Draft<InventoryItem>>,
    budget: Option<Draft<Budget>>,
    supplier: Option<Draft<Supplier>>,
    team: Option<Draft<TeamMember>>,
    equipment: Option<Draft<Equipment>>,
    schedule: Option<Draft<Schedule>>,
    safety: Option<Draft<SafetyRecord>>,
    measurement: Option<Draft<Measurement>>,
    issue: Option<Draft<Issue>>,
    document: Option<Draft<DocumentRecord>>,
    quality: Option<Draft<QualityChecklist>>,
}

macro_rules! draft_slot {
    ($ty:ty, $field:ident) => {
        impl DraftSlot for $ty {
            fn slot(drafts: &Drafts) -> &Option<Draft<Self>> {
                &drafts.$field
            }

            fn slot_mut(drafts: &mut Drafts) -> &mut Option<Draft<Self>> {
                &mut drafts.$field
            }
        }
    };
}

draft_slot!(Project, project);

impl DraftSlot for DiaryEntry {
    fn slot(drafts: &Drafts) -> &Option<Draft<Self>> {
        &drafts.diary
    }

    fn slot_mut(drafts: &mut Drafts) -> &mut Option<Draft<Self>> {
        &mut drafts.diary
    }

    /// Typed reports edit in their own sub-form.
    fn edit_view(&self) -> View {
        View::edit_report(self)
    }
}

draft_slot!(InventoryItem, inventory);
draft_slot!(Budget, budget);
draft_slot!(Supplier, supplier);
draft_slot!(TeamMember, team);
draft_slot!(Equipment, equipment);
draft_slot!(Schedule, schedule);
draft_slot!(SafetyRecord, safety);
draft_slot!(Measurement, measurement);
draft_slot!(Issue, issue);
draft_slot!(DocumentRecord, document);
draft_slot!(QualityChecklist, quality);

/// Calls `$body` with `$T` bound to the model type of `$kind`.
macro_rules! for_kind {
    ($kind:expr, $T:ident => $body:expr) => {
        match $kind {
            EntityKind::Project => {
                type $T = Project;
                $body
            }
            EntityKind::Diary => {
                type $T = DiaryEntry;
                $body
            }
            EntityKind::Inventory => {
                type $T = InventoryItem;
                $body
            }
            EntityKind::Budget => {
                type $T = Budget;
                $body
            }
            EntityKind::Supplier => {
                type $T = Supplier;
                $body
            }
            EntityKind::Team => {
                type $T = TeamMember;
                $body
            }
            EntityKind::Equipment => {
                type $T = Equipment;
                $body
            }
            EntityKind::Schedule => {
                type $T = Schedule;
                $body
            }
            EntityKind::Safety => {
                type $T = SafetyRecord;
                $body
            }
            EntityKind::Measurement => {
                type $T = Measurement;
                $body
            }
            EntityKind::Issue => {
                type $T = Issue;
                $body
            }
            EntityKind::Document => {
                type $T = DocumentRecord;
                $body
            }
            EntityKind::Quality => {
                type $T = QualityChecklist;
                $body
            }
        }
    };
}

impl Drafts {
    pub fn get<T: DraftSlot>(&self) -> Option<&Draft<T>> {
        T::slot(self).as_ref()
    }

    pub fn get_mut<T: DraftSlot>(&mut self) -> Option<&mut Draft<T>> {
        T::slot_mut(self).as_mut()
    }

    /// Install `draft`, replacing whatever draft of that kind was pending.
    pub fn set<T: DraftSlot>(&mut self, draft: Draft<T>) {
        *T::slot_mut(self) = Some(draft);
    }

    pub fn take<T: DraftSlot>(&mut self) -> Option<Draft<T>> {
        T::slot_mut(self).take()
    }

    pub fn is_active(&self, kind: EntityKind) -> bool {
        for_kind!(kind, T => T::slot(self).is_some())
    }

    pub fn is_editing(&self, kind: EntityKind) -> bool {
        for_kind!(kind, T => T::slot(self).as_ref().is_some_and(|d| !d.is_new()))
    }

    pub fn clear(&mut self, kind: EntityKind) {
        for_kind!(kind, T => *T::slot_mut(self) = None)
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Number of kinds with a pending draft.
    pub fn active_count(&self) -> usize {
        EntityKind::ALL
            .into_iter()
            .filter(|k| self.is_active(*k))
            .count()
    }

    /// Make sure a new-record draft exists for `kind`. A pending edit draft
    /// is discarded; a pending new-record draft is kept as is.
    pub fn ensure_new(&mut self, kind: EntityKind) {
        for_kind!(kind, T => {
            let slot = T::slot_mut(self);
            if !slot.as_ref().is_some_and(Draft::is_new) {
                *slot = Some(Draft::<T>::blank());
            }
        })
    }

    /// Set the project reference of the pending draft for `kind`, creating a
    /// blank draft first if none is pending.
    pub fn seed_project(&mut self, kind: EntityKind, project_id: &EntityId) {
        for_kind!(kind, T => {
            let draft = T::slot_mut(self).get_or_insert_with(Draft::<T>::blank);
            draft.data.set_project_id(Some(project_id.clone()));
        })
    }
}
