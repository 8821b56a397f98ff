use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::DEFAULT_REFRESH_DELAY;
use crate::domain::{AppError, AppResult, Topic};

/// Runtime settings, read from an optional JSON file.
///
/// Missing fields fall back to their defaults, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long the loader stays up after a refresh
    pub refresh_delay_ms: u64,
    /// Topic selected in the picker at startup
    pub initial_topic: Topic,
    /// Where to write logs; logging is off when unset
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_delay_ms: DEFAULT_REFRESH_DELAY.as_millis() as u64,
            initial_topic: Topic::default(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}

pub struct SettingsRepository;

impl SettingsRepository {
    pub fn save(settings: &Settings, path: &Path) -> AppResult<()> {
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(path, json).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> AppResult<Settings> {
        let content = fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AppError::InvalidSettings {
            path: path.to_path_buf(),
            source,
        })
    }
}
