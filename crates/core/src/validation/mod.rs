//! Validation gate for writes.
//!
//! One [`Validate`] implementation per entity kind plus the generic
//! [`sanitize`](sanitize::sanitize) pass that runs between validation and
//! persistence. All pure logic.

pub mod entities;
pub mod rules;
pub mod sanitize;

pub use rules::{FieldViolation, ValidationContext, ValidationResult};
pub use sanitize::sanitize;

/// Per-entity validator.
pub trait Validate {
    /// Check required fields, formats and cross-field rules.
    ///
    /// `ctx` carries what the record may reference (known project ids).
    fn validate(&self, ctx: &ValidationContext) -> ValidationResult;
}
