use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InventoryItem {
    pub project_id: Option<EntityId>,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub min_stock: f64,
    pub max_stock: f64,
    pub unit_price: f64,
    pub supplier: String,
    pub location: String,
}

project_scoped!(InventoryItem, EntityKind::Inventory);

impl InventoryItem {
    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }

    pub fn stock_value(&self) -> f64 {
        self.quantity * self.unit_price
    }
}
