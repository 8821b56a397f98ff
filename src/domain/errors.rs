use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the edges of the application.
///
/// View-state intents never fail; these cover settings, terminal and
/// runtime setup.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings in {}: {source}", path.display())]
    InvalidSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings serialization failed: {0}")]
    SerializeSettings(#[from] serde_json::Error),

    #[error("No async runtime available: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type AppResult<T> = Result<T, AppError>;
