//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The terminal UI owns stdout and stderr while it runs, so every event is
//! written to a plain-text log file instead.
//!
//! # Log Levels
//!
//! - `warn`: failed reads against the backend
//! - `info`: refreshes issued, configuration fallbacks
//! - `debug`: applied and discarded responses, filter and disclosure changes

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use super::config::LogSettings;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Init(String),
}

/// Opens `path` for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Builds the event filter, falling back to `info` for an unparsable string.
pub fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Call once, before the terminal is taken.
pub fn init_logging(settings: &LogSettings) -> Result<(), LoggingError> {
    let file = open_log_file(&settings.file).map_err(|source| LoggingError::File {
        path: settings.file.display().to_string(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(&settings.filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(file = %settings.file.display(), filter = %settings.filter, "logging initialised");
    Ok(())
}
