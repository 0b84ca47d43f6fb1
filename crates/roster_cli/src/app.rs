//! Process-level flow: configuration, logging, database lifetime, dispatch.

use crate::cli::{Cli, Command};
use crate::commands::{dispatch, Services};
use crate::error::CliResult;
use crate::prompt::Prompter;
use colored::Colorize;
use log::info;
use roster_core::{
    close_db, default_log_level, init_logging, open_from_config, resolve_config, AppConfig,
};
use std::io::Write;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_DIR: &str = "logs";

/// Resolves configuration, starts logging and runs the parsed command.
pub fn run(cli: &Cli, prompter: &mut impl Prompter, out: &mut impl Write) -> CliResult<()> {
    let config = resolve_config(&cli.overrides(), |key| std::env::var(key).ok())?;
    start_logging(&config);
    execute(&config, &cli.command, prompter, out)
}

/// Opens the configured database, runs `command` and closes the connection.
pub fn execute(
    config: &AppConfig,
    command: &Command,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> CliResult<()> {
    let conn = open_from_config(&config.database)?;
    info!(
        "event=command_start module=cli env={} command={:?}",
        config.environment, command
    );

    let outcome =
        Services::try_new(&conn).and_then(|services| dispatch(command, &services, prompter, out));
    let closed = close_db(conn);

    outcome?;
    closed?;
    info!("event=command_finish module=cli status=ok");
    Ok(())
}

/// Logging failures are reported but never abort the command.
fn start_logging(config: &AppConfig) {
    let level = config.log_level.as_deref().unwrap_or(default_log_level());
    let result = resolve_log_dir(config.log_dir.as_deref())
        .map_err(|err| err.to_string())
        .and_then(|dir| init_logging(level, &dir).map_err(|err| err.to_string()));

    if let Err(message) = result {
        eprintln!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("logging disabled: {message}").yellow()
        );
    }
}

fn resolve_log_dir(configured: Option<&Path>) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match configured {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd.join(DEFAULT_LOG_DIR),
    })
}

#[cfg(test)]
mod tests {
    use super::resolve_log_dir;
    use std::path::Path;

    #[test]
    fn log_dir_defaults_under_working_directory() {
        let dir = resolve_log_dir(None).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("logs"));
    }

    #[test]
    fn relative_log_dir_is_made_absolute() {
        let dir = resolve_log_dir(Some(Path::new("var/log"))).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("var/log"));
    }
}
