//! Entity synchronization layer for the construction-site module.
//!
//! Keeps thirteen in-memory collections consistent with a remote store:
//!
//! - [`EntityStore`]: all-or-nothing bulk refresh of every collection.
//! - [`CrudOrchestrator`]: validate, sanitize, write, refresh, notify.
//! - [`ProgressAggregator`]: recomputes project progress after schedule
//!   changes.
//! - [`AttachmentPipeline`] / [`ReportService`]: sequential uploads linked
//!   back to daily reports, and the approval workflow.
//! - [`Sitebook`]: wires all of the above over one set of collaborators.
//!
//! Persistence and file storage are collaborators ([`EntityApi`],
//! [`FileStorage`]); the [`memory`] module provides in-memory versions.

pub mod attachments;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod progress;
pub mod reports;
pub mod resource;
pub mod sitebook;
pub mod store;

pub use attachments::{AttachmentOutcome, AttachmentPipeline};
pub use collaborator::{Confirm, EntityApi, FileStorage, FixedConfirm, PendingFile};
pub use config::SyncConfig;
pub use error::{AggregationWarning, CollaboratorError, RefreshError, SyncError, WriteAction};
pub use orchestrator::{CrudOrchestrator, DeleteOutcome, Mutation, MutationHook, Validator};
pub use progress::ProgressAggregator;
pub use reports::ReportService;
pub use resource::{Collaborators, Resource};
pub use sitebook::Sitebook;
pub use store::{EntityStore, ProjectOverview, Snapshot, NO_PROJECT_LABEL};
