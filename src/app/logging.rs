//! Global tracing subscriber setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::domain::AppError;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SERPENT_LOG";

/// Log to `path`, appending. The terminal belongs to the game while playing.
pub fn init_file_logging(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new().create(true).append(true).open(path).map_err(|e| {
        AppError::config_error(format!("Failed to open log file {}: {e}", path.display()))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(LevelFilter::INFO))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::config_error(format!("Failed to initialise logging: {e}")))
}

/// Log warnings and errors to stderr, for non-interactive commands.
pub fn init_stderr_logging() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(LevelFilter::WARN))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| AppError::config_error(format!("Failed to initialise logging: {e}")))
}

fn env_filter(default: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(default.into()).with_env_var(LOG_ENV).from_env_lossy()
}
