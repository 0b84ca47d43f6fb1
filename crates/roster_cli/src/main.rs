//! `roster` executable.
//!
//! # Responsibility
//! - Parse arguments, run one command, map the outcome to an exit code.
//!
//! # Invariants
//! - Every failure, panics included, is reported once and exits with code 1.
//! - The default panic printer is silenced; panics reach stderr only through
//!   `report` and reach the log file through the logging hook.

use clap::Parser;
use roster_cli::{catch_panics, report, run, Cli, DialoguerPrompter};
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let outcome = catch_panics(|| {
        let mut stdout = std::io::stdout().lock();
        run(&cli, &mut DialoguerPrompter, &mut stdout)
    });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(1)
        }
    }
}
