//! Validators for the thirteen entity kinds.

use super::rules::{Checks, ValidationContext, ValidationResult};
use super::Validate;
use crate::models::{
    Budget, DiaryEntry, DocumentRecord, Equipment, InventoryItem, Issue, IssueStatus, Measurement,
    Project, QualityChecklist, ReportType, SafetyRecord, SafetyRecordType, Schedule, Severity,
    Supplier, TeamMember,
};

/// Highest supplier rating.
pub const MAX_RATING: u8 = 5;

impl Validate for Project {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("name", &self.name, "Project name");
        c.required("client", &self.client, "Client");
        c.required_date("startDate", self.start_date, "Start date");
        c.date_order("endDate", self.start_date, self.end_date);
        c.non_negative("budget", self.budget, "Budget");
        c.non_negative("spent", self.spent, "Spent amount");
        c.percent("progress", self.progress, "Progress");
        c.finish()
    }
}

impl Validate for DiaryEntry {
    fn validate(&self, ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("obraName", &self.obra_name, "Site name");
        c.required_date("date", self.date, "Date");
        c.project_resolves(ctx, self.project_id.as_deref());

        for (i, material) in self.materials.iter().enumerate() {
            if material.name.trim().is_empty() {
                c.fail("materials", format!("Material #{} needs a name", i + 1));
            }
            if material.quantity < 0.0 {
                c.fail(
                    "materials",
                    format!("Material '{}' cannot have a negative quantity", material.name),
                );
            }
        }

        match self.report_type {
            Some(ReportType::ExpenseEntry) => {
                c.positive("expenseAmount", self.expense_amount, "Expense amount");
            }
            Some(ReportType::HydrostaticTest) => {
                c.positive("testPressure", self.test_pressure, "Test pressure");
            }
            Some(ReportType::Rdo) => {
                c.required("activities", &self.activities, "Activities");
            }
            Some(ReportType::Conclusion) | None => {}
        }
        c.finish()
    }
}

impl Validate for InventoryItem {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("name", &self.name, "Item name");
        c.required("category", &self.category, "Category");
        c.required("unit", &self.unit, "Unit");
        c.non_negative("quantity", self.quantity, "Quantity");
        c.non_negative("minStock", self.min_stock, "Minimum stock");
        c.non_negative("maxStock", self.max_stock, "Maximum stock");
        c.non_negative("unitPrice", self.unit_price, "Unit price");
        if self.max_stock > 0.0 && self.max_stock < self.min_stock {
            c.fail("maxStock", "Maximum stock cannot be below minimum stock");
        }
        c.finish()
    }
}

impl Validate for Budget {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("name", &self.name, "Budget name");
        c.non_negative("totalAmount", self.total_amount, "Total amount");
        c.non_negative("spentAmount", self.spent_amount, "Spent amount");
        for category in &self.categories {
            if category.name.trim().is_empty() {
                c.fail("categories", "Budget categories need a name");
            }
        }
        c.finish()
    }
}

impl Validate for Supplier {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("name", &self.name, "Supplier name");
        c.email("email", &self.email);
        c.phone("phone", &self.phone);
        if self.rating.is_some_and(|r| r > MAX_RATING) {
            c.fail("rating", format!("Rating must be between 0 and {MAX_RATING}"));
        }
        c.finish()
    }
}

impl Validate for TeamMember {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("name", &self.name, "Name");
        c.required("role", &self.role, "Role");
        c.email("email", &self.email);
        c.phone("phone", &self.phone);
        c.non_negative("hourlyRate", self.hourly_rate, "Hourly rate");
        c.finish()
    }
}

impl Validate for Equipment {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("name", &self.name, "Equipment name");
        c.required("equipmentType", &self.equipment_type, "Equipment type");
        c.non_negative("dailyCost", self.daily_cost, "Daily cost");
        if let (Some(last), Some(next)) = (self.last_maintenance, self.next_maintenance) {
            if next < last {
                c.fail(
                    "nextMaintenance",
                    "Next maintenance cannot be before the last one",
                );
            }
        }
        c.finish()
    }
}

impl Validate for Schedule {
    fn validate(&self, ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("name", &self.name, "Task name");
        c.project_resolves(ctx, self.project_id.as_deref());
        c.required_date("startDate", self.start_date, "Start date");
        c.required_date("endDate", self.end_date, "End date");
        c.date_order("endDate", self.start_date, self.end_date);
        c.percent("progress", self.progress, "Progress");
        c.non_negative("plannedCost", self.planned_cost, "Planned cost");
        c.non_negative("actualCost", self.actual_cost, "Actual cost");
        c.finish()
    }
}

impl Validate for SafetyRecord {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required_date("date", self.date, "Date");
        c.required("description", &self.description, "Description");
        c.required("responsible", &self.responsible, "Responsible");
        if self.record_type == SafetyRecordType::Incident && self.severity >= Severity::High {
            c.required(
                "correctiveAction",
                &self.corrective_action,
                "Corrective action for a serious incident",
            );
        }
        c.finish()
    }
}

impl Validate for Measurement {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("description", &self.description, "Description");
        c.required_date("date", self.date, "Date");
        c.required("unit", &self.unit, "Unit");
        c.non_negative("quantity", self.quantity, "Quantity");
        c.non_negative("unitPrice", self.unit_price, "Unit price");
        c.date_order("periodEnd", self.period_start, self.period_end);
        c.finish()
    }
}

impl Validate for Issue {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("title", &self.title, "Title");
        c.required("description", &self.description, "Description");
        if matches!(self.status, IssueStatus::Resolved | IssueStatus::Closed) {
            c.required("resolution", &self.resolution, "Resolution");
        }
        c.finish()
    }
}

impl Validate for DocumentRecord {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("name", &self.name, "Document name");
        c.required("category", &self.category, "Category");
        c.date_order("expiryDate", self.issued_date, self.expiry_date);
        c.finish()
    }
}

impl Validate for QualityChecklist {
    fn validate(&self, _ctx: &ValidationContext) -> ValidationResult {
        let mut c = Checks::new();
        c.required("title", &self.title, "Title");
        c.required("inspector", &self.inspector, "Inspector");
        c.required_date("date", self.date, "Date");
        if self.items.is_empty() {
            c.fail("items", "Checklist needs at least one item");
        }
        if self.items.iter().any(|i| i.description.trim().is_empty()) {
            c.fail("items", "Checklist items need a description");
        }
        c.finish()
    }
}
