//! Validation result types and the field checks shared by every validator.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Date, EntityId};

/// Aggregated result of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Flat list of messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Whether any violation concerns `field`.
    pub fn has_error_on(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// What a record being validated may reference.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    project_ids: HashSet<EntityId>,
}

impl ValidationContext {
    pub fn new<I, S>(project_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EntityId>,
    {
        Self {
            project_ids: project_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn project_exists(&self, project_id: &str) -> bool {
        self.project_ids.contains(project_id)
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Accumulates violations for one record.
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldViolation>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldViolation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Non-blank text.
    pub fn required(&mut self, field: &str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.fail(field, format!("{label} is required"));
        }
    }

    pub fn required_date(&mut self, field: &str, value: Option<Date>, label: &str) {
        if value.is_none() {
            self.fail(field, format!("{label} is required"));
        }
    }

    pub fn non_negative(&mut self, field: &str, value: f64, label: &str) {
        if !value.is_finite() || value < 0.0 {
            self.fail(field, format!("{label} cannot be negative"));
        }
    }

    pub fn positive(&mut self, field: &str, value: Option<f64>, label: &str) {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => {}
            _ => self.fail(field, format!("{label} must be greater than zero")),
        }
    }

    pub fn percent(&mut self, field: &str, value: u8, label: &str) {
        if value > 100 {
            self.fail(field, format!("{label} must be between 0 and 100"));
        }
    }

    /// `end` may not precede `start`. Missing dates are not checked here.
    pub fn date_order(&mut self, end_field: &str, start: Option<Date>, end: Option<Date>) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.fail(end_field, "End date cannot be before start date");
            }
        }
    }

    /// Optional email: checked only when present.
    pub fn email(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        if !EMAIL_RE.is_match(value) {
            self.fail(field, format!("Invalid email '{value}'"));
        }
    }

    /// Optional phone: checked only when present.
    pub fn phone(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let allowed = value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '(' | ')' | '+' | '-' | '.'));
        let digits = value.chars().filter(char::is_ascii_digit).count();
        if !allowed || digits < MIN_PHONE_DIGITS {
            self.fail(field, format!("Invalid phone number '{value}'"));
        }
    }

    /// The record must reference a project that exists in `ctx`.
    pub fn project_resolves(&mut self, ctx: &ValidationContext, project_id: Option<&str>) {
        match project_id.map(str::trim) {
            None | Some("") => self.fail("projectId", "Project is required"),
            Some(id) if !ctx.project_exists(id) => {
                self.fail("projectId", format!("Project '{id}' does not exist"))
            }
            Some(_) => {}
        }
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<Date> {
        Date::from_ymd_opt(y, m, d)
    }

    #[test]
    fn required_rejects_whitespace() {
        let mut checks = Checks::new();
        checks.required("name", "   ", "Name");
        let result = checks.finish();
        assert!(!result.is_valid);
        assert_eq!(result.messages(), vec!["Name is required"]);
    }

    #[test]
    fn date_order_allows_same_day() {
        let mut checks = Checks::new();
        checks.date_order("endDate", date(2024, 1, 1), date(2024, 1, 1));
        assert!(checks.finish().is_valid);
    }

    #[test]
    fn date_order_rejects_inverted_range() {
        let mut checks = Checks::new();
        checks.date_order("endDate", date(2024, 2, 1), date(2024, 1, 1));
        assert!(checks.finish().has_error_on("endDate"));
    }

    #[test]
    fn non_negative_rejects_nan_and_negatives() {
        let mut checks = Checks::new();
        checks.non_negative("a", -1.0, "A");
        checks.non_negative("b", f64::NAN, "B");
        checks.non_negative("c", 0.0, "C");
        let result = checks.finish();
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn email_is_optional_but_checked_when_present() {
        let mut checks = Checks::new();
        checks.email("email", "");
        checks.email("email", "site@example.com");
        assert!(checks.finish().is_valid);

        let mut checks = Checks::new();
        checks.email("email", "not-an-email");
        assert!(!checks.finish().is_valid);
    }

    #[test]
    fn email_pattern_compiles_and_rejects_malformed_addresses() {
        assert!(EMAIL_RE.is_match("foreman@site.example"));
        for bad in ["foreman@", "@site.example", "fore man@site.example", "foreman@site"] {
            let mut checks = Checks::new();
            checks.email("email", bad);
            let result = checks.finish();
            assert!(result.has_error_on("email"), "accepted {bad}");
        }
    }

    #[test]
    fn phone_needs_enough_digits() {
        let mut checks = Checks::new();
        checks.phone("phone", "(11) 98765-4321");
        assert!(checks.finish().is_valid);

        let mut checks = Checks::new();
        checks.phone("phone", "12-34");
        assert!(!checks.finish().is_valid);
    }

    #[test]
    fn project_must_exist_in_context() {
        let ctx = ValidationContext::new(["P1"]);

        let mut checks = Checks::new();
        checks.project_resolves(&ctx, Some("P1"));
        assert!(checks.finish().is_valid);

        let mut checks = Checks::new();
        checks.project_resolves(&ctx, Some("P9"));
        checks.project_resolves(&ctx, None);
        let result = checks.finish();
        assert_eq!(result.errors.len(), 2);
        assert!(result.has_error_on("projectId"));
    }
}
