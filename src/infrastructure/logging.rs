use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MARKSHEET_LOG=debug`.
pub const LOG_ENV: &str = "MARKSHEET_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not open log file - {0}")]
    Io(#[from] io::Error),
    #[error("could not install log subscriber - {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync + 'static>),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sends log events to stderr. Used when the terminal is not taken over by
/// the form.
pub fn init_stderr_logging() -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init()
        .map_err(LoggingError::Subscriber)
}

/// Appends log events to `path`. The form owns the terminal, so this is the
/// only way to see its logs.
pub fn init_file_logging(path: &Path) -> Result<(), LoggingError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(LoggingError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();

        let missing_dir = dir.path().join("missing").join("run.log");
        assert!(matches!(init_file_logging(&missing_dir), Err(LoggingError::Io(_))));

        let log_path = dir.path().join("run.log");
        // Only one global subscriber can be installed per process.
        let _ = init_file_logging(&log_path);
        assert!(matches!(
            init_file_logging(&log_path),
            Err(LoggingError::Subscriber(_))
        ));
        assert!(matches!(init_stderr_logging(), Err(LoggingError::Subscriber(_))));
    }
}
