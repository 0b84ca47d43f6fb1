//! Validated input shapes for create/update operations.
//!
//! # Responsibility
//! - Declare field constraints next to each input struct.
//! - Flatten constraint failures into a stable list of field violations.
//!
//! # Invariants
//! - `violations` reports every failing field, not just the first.
//! - Violations are sorted by field then code, so output is deterministic.

pub mod class;
pub mod staff;
pub mod student;
pub mod user;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

pub(crate) static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid uuid regex")
});

/// One failing constraint on one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// camelCase field name as shown to the user.
    pub field: String,
    /// Machine-readable constraint code (`length`, `range`, `uuid`, ...).
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Input rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join_violations(.violations))]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Failure for a single field, used by guards that run outside a DTO.
    pub fn single(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, code, message)],
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

/// Evaluates the constraints declared on `dto`.
pub fn violations<T: Validate>(dto: &T) -> Vec<FieldViolation> {
    match dto.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => flatten(&errors),
    }
}

/// Returns `Err` carrying every violation when `dto` is invalid.
pub fn check<T: Validate>(dto: &T) -> Result<(), ValidationFailure> {
    let violations = violations(dto);
    if violations.is_empty() {
        return Ok(());
    }
    Err(ValidationFailure { violations })
}

fn flatten(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            let field = camel_case(field);
            field_errors.iter().map(move |error| FieldViolation {
                field: field.clone(),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| "is invalid".to_string()),
            })
        })
        .collect();

    sort_violations(&mut violations);
    violations
}

pub(crate) fn sort_violations(violations: &mut [FieldViolation]) {
    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
}

fn camel_case(field: &str) -> String {
    let mut output = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            output.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            output.push(ch);
        }
    }
    output
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::class::CreateClassDto;
    use super::staff::CreateStaffDto;
    use super::student::CreateStudentDto;
    use super::user::{CreateUserDto, UpdateUserDto};
    use super::{camel_case, check, violations};

    fn user(age: Option<i64>) -> CreateUserDto {
        CreateUserDto {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            age,
        }
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(violations(&user(Some(0))).is_empty());
        assert!(violations(&user(Some(25))).is_empty());
        assert!(violations(&user(None)).is_empty());
    }

    #[test]
    fn age_outside_range_is_rejected() {
        for age in [-1, 26, 30, i64::MAX] {
            let found = violations(&user(Some(age)));
            assert_eq!(found.len(), 1, "age {age} should fail exactly once");
            assert_eq!(found[0].field, "age");
            assert_eq!(found[0].code, "range");
        }
    }

    #[test]
    fn every_failing_field_is_reported() {
        let dto = CreateUserDto {
            first_name: String::new(),
            last_name: String::new(),
            age: Some(99),
        };

        let failure = check(&dto).expect_err("invalid dto must fail");
        let fields: Vec<_> = failure.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["age", "firstName", "lastName"]);
        assert!(failure.to_string().contains("age must be between 0 and 25"));
    }

    #[test]
    fn update_user_accepts_empty_patch() {
        assert!(violations(&UpdateUserDto::default()).is_empty());
    }

    #[test]
    fn uuid_fields_reject_malformed_text() {
        let dto = CreateStudentDto {
            user_id: "not-a-uuid".to_string(),
            class_id: "11111111-2222-4333-8444-555555555555".to_string(),
        };

        let found = violations(&dto);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "userId");
        assert_eq!(found[0].code, "uuid");
    }

    #[test]
    fn staff_class_is_optional_but_checked_when_present() {
        let mut dto = CreateStaffDto {
            user_id: "11111111-2222-4333-8444-555555555555".to_string(),
            class_id: None,
        };
        assert!(violations(&dto).is_empty());

        dto.class_id = Some("42".to_string());
        assert!(check(&dto).expect_err("bad class id").has_field("classId"));
    }

    #[test]
    fn class_name_is_required() {
        let found = violations(&CreateClassDto::default());
        assert_eq!(found[0].field, "name");
    }

    #[test]
    fn camel_case_converts_snake_names() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("age"), "age");
    }
}
