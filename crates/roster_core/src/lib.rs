//! Core domain logic for roster: storage, validation and use-case services
//! for users, classes, students and staff.

pub mod config;
pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{resolve_config, AppConfig, ConfigError, ConfigOverrides, DatabaseConfig};
pub use db::{close_db, open_db, open_db_in_memory, open_from_config, DbError, DbResult};
pub use dto::class::{CreateClassDto, UpdateClassDto};
pub use dto::staff::{CreateStaffDto, UpdateStaffDto};
pub use dto::student::{CreateStudentDto, UpdateStudentDto};
pub use dto::user::{CreateUserDto, UpdateUserDto};
pub use dto::{FieldViolation, ValidationFailure};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::class::{Class, ClassId, ClassSummary};
pub use model::staff::{Staff, StaffId, StaffSummary};
pub use model::student::{Student, StudentId, StudentSummary};
pub use model::user::{User, UserId, UserSummary};
pub use repo::class_repo::{ClassFilter, ClassListQuery, ClassRepository, SqliteClassRepository};
pub use repo::staff_repo::{SqliteStaffRepository, StaffFilter, StaffListQuery, StaffRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentListQuery, StudentRepository};
pub use repo::user_repo::{SqliteUserRepository, UserListQuery, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::class_service::ClassService;
pub use service::staff_service::StaffService;
pub use service::student_service::StudentService;
pub use service::user_service::UserService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
