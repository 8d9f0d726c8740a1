use serde::{Deserialize, Serialize};

use crate::entity::{project_scoped, EntityKind};
use crate::types::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Supplier {
    pub project_id: Option<EntityId>,
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    /// CNPJ/CPF or equivalent tax registration.
    pub tax_id: String,
    pub address: String,
    /// 0–5 stars.
    pub rating: Option<u8>,
}

project_scoped!(Supplier, EntityKind::Supplier);
