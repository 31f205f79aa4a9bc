//! Logging setup.
//!
//! The terminal is owned by the UI, so `tracing` output goes to a single file
//! under the XDG state directory (or `logging.directory`). With file logging
//! disabled no subscriber is installed and events are discarded.

use std::{
    env,
    ffi::OsString,
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::config::LoggingSettings;

const LOG_FILE_NAME: &str = "perpetual.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Neither `XDG_STATE_HOME` nor `HOME` is set.
    #[error("No suitable state directory available for logs")]
    NoStateDir,
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber and return the log file path, if any.
///
/// Subsequent calls are no-ops.
pub fn init(settings: &LoggingSettings) -> Result<Option<PathBuf>, LoggingError> {
    if !settings.file || LOG_GUARD.get().is_some() {
        return Ok(None);
    }

    let log_dir = match &settings.directory {
        Some(dir) => dir.clone(),
        None => default_log_dir().ok_or(LoggingError::NoStateDir)?,
    };
    fs::create_dir_all(&log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.clone(),
        source,
    })?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    ensure_file_exists(&log_path)?;

    let file_appender = rolling::never(&log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(file_writer);
    let subscriber = Registry::default()
        .with(build_env_filter(&settings.filter))
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(Some(log_path))
}

/// `RUST_LOG` wins over the configured directive; a bad directive falls back to `info`.
fn build_env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn ensure_file_exists(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn default_log_dir() -> Option<PathBuf> {
    state_dir_from(env::var_os("XDG_STATE_HOME"), env::var_os("HOME"))
        .map(|dir| dir.join("perpetual"))
}

/// `$XDG_STATE_HOME`, else `~/.local/state`. Empty values count as unset.
pub(crate) fn state_dir_from(xdg: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(xdg) = xdg.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg));
    }
    home.filter(|v| !v.is_empty())
        .map(|home| PathBuf::from(home).join(".local").join("state"))
}
