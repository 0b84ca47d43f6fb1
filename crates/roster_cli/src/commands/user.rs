//! `*-user` commands.

use crate::cli::ListArgs;
use crate::commands::{print_deleted, print_found, print_labeled};
use crate::error::CliResult;
use crate::prompt::{optional, Prompter};
use roster_core::{
    CreateUserDto, UpdateUserDto, UserListQuery, UserRepository, UserService, ValidationFailure,
};
use std::io::Write;

pub fn create_user<R: UserRepository>(
    service: &UserService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let first_name = prompter.text("First name")?;
    let last_name = prompter.text("Last name")?;
    let age = parse_age(optional(prompter.text("Age")?))?;

    let created = service.create(&CreateUserDto {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        age,
    })?;
    print_labeled(out, "User created successfully", &created)
}

pub fn list_users<R: UserRepository>(
    service: &UserService<R>,
    args: &ListArgs,
    out: &mut impl Write,
) -> CliResult<()> {
    let users = service.find_all(&UserListQuery {
        limit: args.limit,
        offset: args.offset,
        ..UserListQuery::default()
    })?;
    print_labeled(out, "Users", &users)
}

pub fn get_user<R: UserRepository>(
    service: &UserService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("User ID")?;
    let user = service.find_by_pk(&id)?;
    print_found(out, "User", "User", user.as_ref())
}

/// Blank answers leave the corresponding field unchanged.
pub fn update_user<R: UserRepository>(
    service: &UserService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("User ID")?;
    let first_name = optional(prompter.text("First name")?);
    let last_name = optional(prompter.text("Last name")?);
    let age = parse_age(optional(prompter.text("Age")?))?;

    let changes = UpdateUserDto {
        first_name,
        last_name,
        age,
    };
    match service.find_and_update_by_id(&id, &changes)? {
        Some(count) => writeln!(out, "{count} users updated successfully")?,
        None => writeln!(out, "User not found")?,
    }
    Ok(())
}

pub fn delete_user<R: UserRepository>(
    service: &UserService<R>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let id = prompter.text("User ID")?;
    let deleted = service.delete(&id)?;
    print_deleted(out, "User", deleted)
}

fn parse_age(answer: Option<String>) -> Result<Option<i64>, ValidationFailure> {
    answer
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| ValidationFailure::single("age", "integer", "must be an integer"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::parse_age;

    #[test]
    fn age_is_optional() {
        assert_eq!(parse_age(None).unwrap(), None);
        assert_eq!(parse_age(Some("12".to_string())).unwrap(), Some(12));
    }

    #[test]
    fn non_numeric_age_is_rejected_on_the_age_field() {
        let failure = parse_age(Some("twelve".to_string())).unwrap_err();
        assert!(failure.has_field("age"));
    }
}
