//! Command handlers.
//!
//! # Responsibility
//! - Collect prompt answers, call one service operation, print the outcome.
//!
//! # Invariants
//! - Handlers never exit the process; failures are returned to `run`.
//! - Output goes only to the supplied writer.

pub mod class;
pub mod staff;
pub mod student;
pub mod user;

use crate::cli::Command;
use crate::error::{CliError, CliResult};
use crate::prompt::Prompter;
use roster_core::{
    ClassService, RepoResult, SqliteClassRepository, SqliteStaffRepository,
    SqliteStudentRepository, SqliteUserRepository, StaffService, StudentService, UserService,
};
use rusqlite::Connection;
use serde::Serialize;
use std::io::Write;

/// One service per entity, all sharing a connection.
pub struct Services<'conn> {
    pub users: UserService<SqliteUserRepository<'conn>>,
    pub classes: ClassService<SqliteClassRepository<'conn>>,
    pub students: StudentService<SqliteStudentRepository<'conn>>,
    pub staff: StaffService<SqliteStaffRepository<'conn>>,
}

impl<'conn> Services<'conn> {
    pub fn try_new(conn: &'conn Connection) -> CliResult<Self> {
        Ok(Self {
            users: UserService::new(ready(SqliteUserRepository::try_new(conn))?),
            classes: ClassService::new(ready(SqliteClassRepository::try_new(conn))?),
            students: StudentService::new(ready(SqliteStudentRepository::try_new(conn))?),
            staff: StaffService::new(ready(SqliteStaffRepository::try_new(conn))?),
        })
    }
}

fn ready<R>(repo: RepoResult<R>) -> CliResult<R> {
    repo.map_err(|err| CliError::Service(err.into()))
}

/// Runs one command against `services`.
pub fn dispatch(
    command: &Command,
    services: &Services<'_>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    match command {
        Command::CreateUser => user::create_user(&services.users, prompter, out),
        Command::ListUsers(args) => user::list_users(&services.users, args, out),
        Command::GetUser => user::get_user(&services.users, prompter, out),
        Command::UpdateUser => user::update_user(&services.users, prompter, out),
        Command::DeleteUser => user::delete_user(&services.users, prompter, out),

        Command::AddStudent => student::add_student(&services.students, prompter, out),
        Command::ListStudents(args) => student::list_students(&services.students, args, out),
        Command::GetStudent => student::get_student(&services.students, prompter, out),
        Command::UpdateStudent => student::update_student(&services.students, prompter, out),
        Command::DeleteStudent => student::delete_student(&services.students, prompter, out),

        Command::AddStaff => staff::add_staff(&services.staff, prompter, out),
        Command::ListStaff(args) => staff::list_staff(&services.staff, args, out),
        Command::GetStaff => staff::get_staff(&services.staff, prompter, out),
        Command::UpdateStaff => staff::update_staff(&services.staff, prompter, out),
        Command::DeleteStaff => staff::delete_staff(&services.staff, prompter, out),

        Command::AddClass => class::add_class(&services.classes, prompter, out),
        Command::ListClasses(args) => class::list_classes(&services.classes, args, out),
        Command::GetClass => class::get_class(&services.classes, prompter, out),
        Command::UpdateClass => class::update_class(&services.classes, prompter, out),
        Command::DeleteClass => class::delete_class(&services.classes, prompter, out),
    }
}

/// Prints `<label>: <pretty JSON>`.
pub(crate) fn print_labeled<T: Serialize + ?Sized>(
    out: &mut impl Write,
    label: &str,
    value: &T,
) -> CliResult<()> {
    writeln!(out, "{label}: {}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Prints a record under `label`, or the entity's not-found line.
pub(crate) fn print_found<T: Serialize>(
    out: &mut impl Write,
    entity: &str,
    label: &str,
    value: Option<&T>,
) -> CliResult<()> {
    match value {
        Some(value) => print_labeled(out, label, value),
        None => {
            writeln!(out, "{entity} not found")?;
            Ok(())
        }
    }
}

pub(crate) fn print_deleted(out: &mut impl Write, entity: &str, deleted: bool) -> CliResult<()> {
    if deleted {
        writeln!(out, "{entity} deleted successfully")?;
    } else {
        writeln!(out, "Could not delete {}", entity.to_lowercase())?;
    }
    Ok(())
}
