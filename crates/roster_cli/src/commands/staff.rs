//! `*-staff` commands.

use crate::cli::ListArgs;
use crate::commands::{print_deleted, print_found, print_labeled};
use crate::error::CliResult;
use crate::prompt::{optional, Prompter};
use roster_core::{CreateStaffDto, StaffListQuery, StaffRepository, StaffService, UpdateStaffDto};
use std::io::Write;

/// A blank class answer registers the staff member without a class.
pub fn add_staff<R: StaffRepository>(
    service: &StaffService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let user_id = prompter.text("User ID")?;
    let class_id = optional(prompter.text("Class ID")?);
    let created = service.create(&CreateStaffDto {
        user_id: user_id.trim().to_string(),
        class_id,
    })?;
    print_labeled(out, "Staff created successfully", &created)
}

pub fn list_staff<R: StaffRepository>(
    service: &StaffService<R>,
    args: &ListArgs,
    out: &mut impl Write,
) -> CliResult<()> {
    let staff = service.find_all(&StaffListQuery {
        limit: args.limit,
        offset: args.offset,
        ..StaffListQuery::default()
    })?;
    print_labeled(out, "Staff", &staff)
}

pub fn get_staff<R: StaffRepository>(
    service: &StaffService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Staff ID")?;
    let staff = service.find_by_pk(&id)?;
    print_found(out, "Staff", "Staff", staff.as_ref())
}

pub fn update_staff<R: StaffRepository>(
    service: &StaffService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Staff ID")?;
    let class_id = prompter.text("New Class ID")?;
    let updated = service.find_and_update_by_id(
        &id,
        &UpdateStaffDto {
            class_id: class_id.trim().to_string(),
        },
    )?;
    print_found(out, "Staff", "Staff updated", updated.as_ref())
}

pub fn delete_staff<R: StaffRepository>(
    service: &StaffService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("Staff ID")?;
    let deleted = service.delete(&id)?;
    print_deleted(out, "Staff", deleted)
}
