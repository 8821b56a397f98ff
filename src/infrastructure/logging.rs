use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::domain::{AppError, AppResult};

const DEFAULT_DIRECTIVE: &str = "headlines=info";

/// Installs a file-backed tracing subscriber.
///
/// The terminal UI owns stdout, so logs only go to `log_file`. Without one,
/// no subscriber is installed. `RUST_LOG` overrides the default filter.
pub fn init_logging(log_file: Option<&Path>) -> AppResult<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
