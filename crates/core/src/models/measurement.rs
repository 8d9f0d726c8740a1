use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::{Date, EntityId};

/// A measured quantity of executed work for a billing period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Measurement {
    pub project_id: Option<EntityId>,
    pub description: String,
    pub date: Option<Date>,
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    pub unit: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub measured_by: String,
}

project_scoped!(Measurement, EntityKind::Measurement);

impl Measurement {
    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}
