//! File-backed `tracing` setup.
//!
//! The terminal is owned by the TUI for the whole run, so log records go to
//! `$XDG_STATE_HOME/coderev/coderev.log` (or `~/.local/state/coderev/...`).
//! The filter comes from `RUST_LOG`, then the config's `log_level`, then
//! `info`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::xdg_dir;

const DEFAULT_LEVEL: &str = "info";

/// Failures while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory or file could not be created.
    #[error("cannot open log file {path:?}: {source}")]
    Open {
        /// Log file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A global subscriber was already installed.
    #[error("cannot install log subscriber: {0}")]
    Install(String),
}

/// Default log file location.
pub fn log_path() -> PathBuf {
    xdg_dir(
        std::env::var("XDG_STATE_HOME").ok(),
        std::env::var("HOME").ok(),
        ".local/state",
    )
    .join("coderev")
    .join("coderev.log")
}

/// Builds the level filter from `RUST_LOG`, then `configured`, then `info`.
///
/// An invalid directive falls back to `info` rather than failing.
fn build_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global subscriber writing to `path` in append mode.
///
/// # Errors
///
/// Returns [`LoggingError`] if the file cannot be opened or a subscriber is
/// already installed.
pub fn init_logging(path: &Path, configured: Option<&str>) -> Result<(), LoggingError> {
    let open_err = |source| LoggingError::Open {
        path: path.to_owned(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(open_err)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(configured))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("coderev.log");
        // Another test may already own the global subscriber; the file must
        // exist either way.
        let _ = init_logging(&path, Some("debug"));
        assert!(path.exists());
    }

    #[test]
    fn open_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as the log file.
        let err = init_logging(dir.path(), None).unwrap_err();
        assert!(matches!(err, LoggingError::Open { .. }));
        assert!(err.to_string().contains("cannot open log file"));
    }
}
