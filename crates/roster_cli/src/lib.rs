//! Command-line front end for roster.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod prompt;

pub use app::{execute, run};
pub use cli::{Cli, Command, ListArgs};
pub use error::{catch_panics, classify, from_panic, report, CliError, CliResult, ErrorKind};
pub use prompt::{DialoguerPrompter, Prompter};
