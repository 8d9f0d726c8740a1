//! Entity kinds, the shared [`Entity`] contract and the persisted record
//! envelope [`Stored`].

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The thirteen resource kinds tracked by the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Project,
    Diary,
    Inventory,
    Budget,
    Supplier,
    Team,
    Equipment,
    Schedule,
    Safety,
    Measurement,
    Issue,
    Document,
    Quality,
}

impl EntityKind {
    /// Every kind, in refresh order.
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Project,
        EntityKind::Diary,
        EntityKind::Inventory,
        EntityKind::Budget,
        EntityKind::Supplier,
        EntityKind::Team,
        EntityKind::Equipment,
        EntityKind::Schedule,
        EntityKind::Safety,
        EntityKind::Measurement,
        EntityKind::Issue,
        EntityKind::Document,
        EntityKind::Quality,
    ];

    /// Stable identifier used in view names (`new-team`, `list-schedule`, ...).
    pub fn slug(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Diary => "diary",
            Self::Inventory => "inventory",
            Self::Budget => "budget",
            Self::Supplier => "supplier",
            Self::Team => "team",
            Self::Equipment => "equipment",
            Self::Schedule => "schedule",
            Self::Safety => "safety",
            Self::Measurement => "measurement",
            Self::Issue => "issue",
            Self::Document => "document",
            Self::Quality => "quality",
        }
    }

    /// Human-readable singular label used in notifications.
    pub fn label(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Diary => "Report",
            Self::Inventory => "Inventory item",
            Self::Budget => "Budget",
            Self::Supplier => "Supplier",
            Self::Team => "Team member",
            Self::Equipment => "Equipment",
            Self::Schedule => "Schedule task",
            Self::Safety => "Safety record",
            Self::Measurement => "Measurement",
            Self::Issue => "Issue",
            Self::Document => "Document",
            Self::Quality => "Quality checklist",
        }
    }

    /// Parse a kind from its slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Whether records of this kind carry a project reference.
    pub fn is_project_scoped(self) -> bool {
        !matches!(self, Self::Project)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Payload of one record, without the id and timestamps the remote store
/// assigns.
///
/// `Default` is the empty form a draft starts from.
pub trait Entity:
    Clone + fmt::Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    /// Weak reference to the owning project, if any.
    fn project_id(&self) -> Option<&str>;

    /// Replace the project reference. Kinds without one ignore the call.
    fn set_project_id(&mut self, project_id: Option<EntityId>);
}

/// Implements [`Entity`] for a model with a `project_id: Option<EntityId>` field.
macro_rules! project_scoped {
    ($ty:ty, $kind:expr) => {
        impl $crate::entity::Entity for $ty {
            const KIND: $crate::entity::EntityKind = $kind;

            fn project_id(&self) -> Option<&str> {
                self.project_id.as_deref()
            }

            fn set_project_id(&mut self, project_id: Option<$crate::types::EntityId>) {
                self.project_id = project_id;
            }
        }
    };
}

pub(crate) use project_scoped;

// ---------------------------------------------------------------------------
// Stored
// ---------------------------------------------------------------------------

/// A persisted record: the collaborator-assigned id and timestamps around
/// the entity payload. On the wire the payload fields sit next to `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Entity> Stored<T> {
    /// Wrap a payload under an id, without timestamps.
    pub fn new(id: impl Into<EntityId>, data: T) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            updated_at: None,
            data,
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        self.data.project_id()
    }

    /// Whether this record references `project_id`.
    pub fn belongs_to(&self, project_id: &str) -> bool {
        self.project_id() == Some(project_id)
    }
}
