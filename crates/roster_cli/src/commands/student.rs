//! `*-student` commands.

use crate::cli::ListArgs;
use crate::commands::{print_deleted, print_found, print_labeled};
use crate::error::CliResult;
use crate::prompt::Prompter;
use roster_core::{
    CreateStudentDto, StudentListQuery, StudentRepository, StudentService, UpdateStudentDto,
};
use std::io::Write;

pub fn add_student<R: StudentRepository>(
    service: &StudentService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let user_id = prompter.text("User ID")?;
    let class_id = prompter.text("Class ID")?;
    let created = service.create(&CreateStudentDto {
        user_id: user_id.trim().to_string(),
        class_id: class_id.trim().to_string(),
    })?;
    print_labeled(out, "Student created successfully", &created)
}

pub fn list_students<R: StudentRepository>(
    service: &StudentService<R>,
    args: &ListArgs,
    out: &mut impl Write,
) -> CliResult<()> {
    let students = service.find_all(&StudentListQuery {
        limit: args.limit,
        offset: args.offset,
        ..StudentListQuery::default()
    })?;
    print_labeled(out, "Students", &students)
}

pub fn get_student<R: StudentRepository>(
    service: &StudentService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Student ID")?;
    let student = service.find_by_pk(&id)?;
    print_found(out, "Student", "Student", student.as_ref())
}

pub fn update_student<R: StudentRepository>(
    service: &StudentService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Student ID")?;
    let class_id = prompter.text("New Class ID")?;
    let updated = service.find_and_update_by_id(
        &id,
        &UpdateStudentDto {
            class_id: class_id.trim().to_string(),
        },
    )?;
    match updated {
        Some(count) => writeln!(out, "{count} students updated successfully")?,
        None => writeln!(out, "Student not found")?,
    }
    Ok(())
}

pub fn delete_student<R: StudentRepository>(
    service: &StudentService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Student ID")?;
    let deleted = service.delete(&id)?;
    print_deleted(out, "Student", deleted)
}
