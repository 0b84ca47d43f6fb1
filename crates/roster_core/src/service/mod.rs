//! Use-case services, one per entity.
//!
//! # Responsibility
//! - Validate input before any repository call.
//! - Delegate persistence to repositories and hand failures back to callers.
//!
//! # Invariants
//! - A rejected input never reaches the repository, so it never mutates data.
//! - Services never terminate the process; the caller decides the exit path.

pub mod class_service;
pub mod staff_service;
pub mod student_service;
pub mod user_service;

use crate::dto::{sort_violations, violations, ValidationFailure};
use crate::repo::RepoError;
use log::{error, info, warn};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input problem; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    /// Persistence-layer problem.
    #[error(transparent)]
    Repository(#[from] RepoError),
}

/// Parses a caller-supplied identifier, rejecting blank and malformed values.
pub(crate) fn require_id(field: &str, raw: &str) -> Result<Uuid, ValidationFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationFailure::single(field, "required", "is required"));
    }
    Uuid::parse_str(trimmed)
        .map_err(|_| ValidationFailure::single(field, "uuid", "must be a valid UUID"))
}

/// Parses `raw` and validates `dto` in one pass, so a bad id and bad fields
/// are reported together.
pub(crate) fn require_id_and_check<T: Validate>(
    field: &str,
    raw: &str,
    dto: &T,
) -> Result<Uuid, ValidationFailure> {
    let mut found = violations(dto);
    let id = match require_id(field, raw) {
        Ok(id) => Some(id),
        Err(failure) => {
            found.extend(failure.violations);
            None
        }
    };

    match id {
        Some(id) if found.is_empty() => Ok(id),
        _ => {
            sort_violations(&mut found);
            Err(ValidationFailure { violations: found })
        }
    }
}

/// Runs one service operation and records its outcome.
pub(crate) fn logged<T>(
    event: &str,
    operation: impl FnOnce() -> ServiceResult<T>,
) -> ServiceResult<T> {
    let result = operation();
    match &result {
        Ok(_) => info!("event={event} module=service status=ok"),
        Err(ServiceError::Validation(failure)) => warn!(
            "event={event} module=service status=rejected violations={}",
            failure.violations.len()
        ),
        Err(ServiceError::Repository(err)) => {
            error!("event={event} module=service status=error error={err}")
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{require_id, require_id_and_check};
    use crate::dto::user::UpdateUserDto;

    #[test]
    fn require_id_rejects_blank_values() {
        let failure = require_id("id", "   ").expect_err("blank id must fail");
        assert_eq!(failure.violations[0].code, "required");
    }

    #[test]
    fn require_id_rejects_malformed_values() {
        let failure = require_id("id", "abc").expect_err("malformed id must fail");
        assert_eq!(failure.violations[0].code, "uuid");
    }

    #[test]
    fn require_id_trims_surrounding_whitespace() {
        let id = require_id("id", " 11111111-2222-4333-8444-555555555555 ").unwrap();
        assert_eq!(id.to_string(), "11111111-2222-4333-8444-555555555555");
    }

    #[test]
    fn bad_id_and_bad_fields_are_reported_together() {
        let dto = UpdateUserDto {
            age: Some(40),
            ..UpdateUserDto::default()
        };

        let failure = require_id_and_check("id", "abc", &dto).expect_err("must fail");
        let fields: Vec<_> = failure.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["age", "id"]);
    }

    #[test]
    fn valid_id_and_fields_pass() {
        let id = require_id_and_check(
            "id",
            "11111111-2222-4333-8444-555555555555",
            &UpdateUserDto::default(),
        )
        .unwrap();
        assert_eq!(id.to_string(), "11111111-2222-4333-8444-555555555555");
    }
}
