//! Domain layer for the construction-site management module.
//!
//! Everything in this crate is pure logic with no I/O: the thirteen entity
//! models, per-entity validation and the generic sanitizer, lifecycle state
//! machines, the default progress formula, and the navigation state machine
//! ([`navigation::ViewStateController`]) with its per-kind drafts.

pub mod drafts;
pub mod entity;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod navigation;
pub mod progress;
pub mod types;
pub mod validation;
pub mod views;

pub use entity::{Entity, EntityKind, Stored};
pub use error::CoreError;
pub use types::{Date, EntityId, Timestamp};
