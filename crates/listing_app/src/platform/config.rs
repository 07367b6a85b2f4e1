use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use listing_core::FileType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_PATH: &str = "file_manager.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Record type the listing is scoped to.
    pub file_type: FileType,
    pub can_upload: bool,
    pub per_page: u32,
    /// Files the in-memory store starts with.
    pub seed_files: usize,
    /// Artificial delay applied to every store call.
    pub latency_ms: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            file_type: FileType::Reads,
            can_upload: true,
            per_page: 25,
            seed_files: 60,
            latency_ms: 0,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

/// Reads the config at `path`; a missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if config.per_page == 0 {
        return Err(ConfigError::Invalid("per_page must be at least 1".into()));
    }
    Ok(config)
}
