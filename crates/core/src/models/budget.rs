use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::EntityId;

/// One line of a budget breakdown. Only totals are interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetCategory {
    pub name: String,
    pub allocated: f64,
    pub spent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Budget {
    pub project_id: Option<EntityId>,
    pub name: String,
    pub total_amount: f64,
    pub spent_amount: f64,
    pub categories: Vec<BudgetCategory>,
}

project_scoped!(Budget, EntityKind::Budget);

impl Budget {
    pub fn remaining(&self) -> f64 {
        self.total_amount - self.spent_amount
    }

    pub fn is_overspent(&self) -> bool {
        self.spent_amount > self.total_amount
    }

    /// Share of the total already spent, in percent. Zero-total budgets report 0.
    pub fn usage_percent(&self) -> f64 {
        if self.total_amount <= 0.0 {
            return 0.0;
        }
        self.spent_amount / self.total_amount * 100.0
    }
}
