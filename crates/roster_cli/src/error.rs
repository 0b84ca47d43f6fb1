//! Error funnel for the CLI process.
//!
//! # Responsibility
//! - Collect every failure a command can hit into one `CliError`.
//! - Classify failures into the four user-facing kinds and print them.
//!
//! # Invariants
//! - `report` writes exactly one line.
//! - Any reported error ends the process with exit code 1.

use colored::Colorize;
use roster_core::{ConfigError, DbError, ServiceError, ValidationFailure};
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use thiserror::Error;

static SILENCE_DEFAULT_PANIC_OUTPUT: Once = Once::new();

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Input rejected while converting prompt answers, before any service call.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error("{0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Database,
    Cli,
    Unknown,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Validation => "Validation Error:",
            Self::Database => "Database Error:",
            Self::Cli => "CLI Error:",
            Self::Unknown => "Unknown Error:",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify(err: &CliError) -> ErrorKind {
    match err {
        CliError::Service(ServiceError::Validation(_)) | CliError::Validation(_) => {
            ErrorKind::Validation
        }
        CliError::Service(ServiceError::Repository(_)) | CliError::Database(_) => {
            ErrorKind::Database
        }
        CliError::Config(_) | CliError::Prompt(_) | CliError::Io(_) => ErrorKind::Cli,
        CliError::Render(_) | CliError::Unknown(_) => ErrorKind::Unknown,
    }
}

/// Prints `err` as a single colored line on stderr.
pub fn report(err: &CliError) {
    let mut stderr = std::io::stderr().lock();
    // Nothing useful is left to do when stderr itself is gone.
    let _ = report_to(err, &mut stderr);
}

pub fn report_to(err: &CliError, out: &mut impl Write) -> std::io::Result<()> {
    let kind = classify(err);
    log::error!(
        "event=command_failed module=cli status=error kind={:?} error={err}",
        kind
    );
    writeln!(
        out,
        "{} {}",
        kind.label().red().bold(),
        err.to_string().yellow()
    )
}

/// Runs `body`, turning a panic into an `Unknown` error.
///
/// The first call replaces the default panic printer with a silent hook, so
/// `report` is the only stderr line for a panic. Call it before
/// `init_logging`: the logging hook wraps whatever hook is current and still
/// records the panic.
pub fn catch_panics<T>(body: impl FnOnce() -> CliResult<T>) -> CliResult<T> {
    SILENCE_DEFAULT_PANIC_OUTPUT.call_once(|| panic::set_hook(Box::new(|_| {})));
    panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|payload| Err(from_panic(payload)))
}

/// Turns a caught panic payload into an `Unknown` error.
pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> CliError {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    };
    CliError::Unknown(message)
}

#[cfg(test)]
mod tests {
    use super::{classify, from_panic, report_to, CliError, ErrorKind};
    use roster_core::{DbError, ServiceError, ValidationFailure};

    #[test]
    fn validation_failures_classify_as_validation() {
        let failure = ValidationFailure::single("age", "range", "must be between 0 and 25");
        assert_eq!(
            classify(&CliError::Service(ServiceError::Validation(failure.clone()))),
            ErrorKind::Validation
        );
        assert_eq!(
            classify(&CliError::Validation(failure)),
            ErrorKind::Validation
        );
    }

    #[test]
    fn storage_failures_classify_as_database() {
        let err = CliError::Database(DbError::UnsupportedDialect("postgres".to_string()));
        assert_eq!(classify(&err), ErrorKind::Database);
    }

    #[test]
    fn panics_classify_as_unknown() {
        let err = from_panic(Box::new("boom"));
        assert_eq!(classify(&err), ErrorKind::Unknown);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn report_writes_a_single_labeled_line() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let err = CliError::Unknown("socket closed".to_string());

        report_to(&err, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Unknown Error: socket closed\n");
    }
}
