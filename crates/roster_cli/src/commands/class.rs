//! `*-class` commands.

use crate::cli::ListArgs;
use crate::commands::{print_deleted, print_found, print_labeled};
use crate::error::CliResult;
use crate::prompt::Prompter;
use roster_core::{ClassListQuery, ClassRepository, ClassService, CreateClassDto, UpdateClassDto};
use std::io::Write;

pub fn add_class<R: ClassRepository>(
    service: &ClassService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let name = prompter.text("Class name")?;
    let created = service.create(&CreateClassDto {
        name: name.trim().to_string(),
    })?;
    print_labeled(out, "Class created successfully", &created)
}

pub fn list_classes<R: ClassRepository>(
    service: &ClassService<R>,
    args: &ListArgs,
    out: &mut impl Write,
) -> CliResult<()> {
    let classes = service.find_all(&ClassListQuery {
        limit: args.limit,
        offset: args.offset,
        ..ClassListQuery::default()
    })?;
    print_labeled(out, "Classes", &classes)
}

pub fn get_class<R: ClassRepository>(
    service: &ClassService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Class ID")?;
    let class = service.find_by_pk(&id)?;
    print_found(out, "Class", "Class", class.as_ref())
}

pub fn update_class<R: ClassRepository>(
    service: &ClassService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Class ID")?;
    let name = prompter.text("New Class name")?;
    let updated = service.find_and_update_by_id(
        &id,
        &UpdateClassDto {
            name: name.trim().to_string(),
        },
    )?;
    print_found(out, "Class", "Class updated", updated.as_ref())
}

/// Students and staff assigned to the class are removed with it.
pub fn delete_class<R: ClassRepository>(
    service: &ClassService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Class ID")?;
    let deleted = service.delete(&id)?;
    print_deleted(out, "Class", deleted)
}
