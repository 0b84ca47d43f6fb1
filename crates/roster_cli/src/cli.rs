//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use roster_core::ConfigOverrides;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "roster", version)]
#[command(about = "Manage users, students, staff and classes")]
pub struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Configuration environment to use (e.g. development, test).
    #[arg(long = "env", global = true)]
    pub environment: Option<String>,
    /// SQLite database path, or `:memory:`.
    #[arg(long, global = true)]
    pub database: Option<String>,
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            environment: self.environment.clone(),
            config_path: self.config.clone(),
            database: self.database.clone(),
            log_level: self.log_level.clone(),
            log_dir: None,
        }
    }
}

/// Pagination for `list-*` commands.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ListArgs {
    /// Maximum number of rows to print.
    #[arg(long)]
    pub limit: Option<u32>,
    /// Number of rows to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new user
    CreateUser,
    /// List all users
    ListUsers(ListArgs),
    /// Get a specific user by ID
    GetUser,
    /// Update user details
    UpdateUser,
    /// Delete a user
    DeleteUser,

    /// Add a new student
    AddStudent,
    /// List all students
    ListStudents(ListArgs),
    /// Get a specific student by ID
    GetStudent,
    /// Move a student to another class
    UpdateStudent,
    /// Delete a student
    DeleteStudent,

    /// Add a new staff member
    AddStaff,
    /// List all staff members
    ListStaff(ListArgs),
    /// Get a specific staff member by ID
    GetStaff,
    /// Assign a staff member to a class
    UpdateStaff,
    /// Delete a staff member
    DeleteStaff,

    /// Add a new class
    AddClass,
    /// List all classes
    ListClasses(ListArgs),
    /// Get a specific class by ID
    GetClass,
    /// Rename a class
    UpdateClass,
    /// Delete a class and everything enrolled in it
    DeleteClass,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "roster",
            "list-users",
            "--database",
            ":memory:",
            "--env",
            "test",
            "--limit",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.database.as_deref(), Some(":memory:"));
        assert_eq!(cli.environment.as_deref(), Some("test"));
        match cli.command {
            Command::ListUsers(args) => {
                assert_eq!(args.limit, Some(2));
                assert_eq!(args.offset, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn previously_unregistered_commands_parse() {
        for name in ["get-class", "update-class", "delete-class", "get-student", "update-staff"] {
            assert!(Cli::try_parse_from(["roster", name]).is_ok(), "{name}");
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["roster", "drop-everything"]).is_err());
    }
}
