//! Configuration discovery, environment overrides and validation.
//!
//! Lookup order: explicit path, then `FERRY_CONFIG`, then the platform
//! configuration directory. A missing file in the platform directory yields the
//! defaults; a missing file that was named explicitly is an error.

use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::defaults::{
    CONFIG_FILE_NAME, ENV_CONFIG_PATH, ENV_ENGINE_URL, ENV_LOG_LEVEL, SCHEDULE_FILE_NAME,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::FerryConfig;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("rs", "ferry", "ferry")
}

/// Configuration file inside the platform configuration directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Schedule file inside the platform data directory.
#[must_use]
pub fn default_schedule_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(SCHEDULE_FILE_NAME))
}

/// Loaded configuration and the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// Validated configuration.
    pub config: FerryConfig,
    /// File that was read, if any.
    pub source: Option<PathBuf>,
}

/// Builder-style configuration loader.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader using the default lookup order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this file instead of searching for one.
    #[must_use]
    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Load using the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or the
    /// resulting configuration fails validation.
    pub fn load(&self) -> ConfigResult<LoadedConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Load using `env` to resolve environment variables.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load`].
    pub fn load_with_env<F>(&self, env: F) -> ConfigResult<LoadedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let named = self
            .explicit
            .clone()
            .or_else(|| env(ENV_CONFIG_PATH).filter(|v| !v.trim().is_empty()).map(PathBuf::from));

        let (mut config, source) = match named {
            Some(path) => (read_config(&path)?, Some(path)),
            None => match default_config_path() {
                Some(path) if path.exists() => (read_config(&path)?, Some(path)),
                _ => (FerryConfig::default(), None),
            },
        };

        if let Some(url) = env(ENV_ENGINE_URL).filter(|v| !v.trim().is_empty()) {
            config.engine.url = url;
        }
        if let Some(level) = env(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            config.logging.level = level;
        }

        config.validate()?;
        debug!(source = ?source, engine = %config.engine.url, "configuration loaded");
        Ok(LoadedConfig { config, source })
    }
}

fn read_config(path: &Path) -> ConfigResult<FerryConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        operation: "config.read",
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(FerryConfig::default());
    }
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl FerryConfig {
    /// Schedule file to use: the configured path or the platform default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when no path is configured and the platform
    /// has no data directory.
    pub fn schedule_path(&self) -> ConfigResult<PathBuf> {
        self.schedule
            .path
            .clone()
            .or_else(default_schedule_path)
            .ok_or_else(|| ConfigError::Io {
                operation: "config.schedule_path",
                path: PathBuf::from(SCHEDULE_FILE_NAME),
                source: io::Error::new(io::ErrorKind::NotFound, "no data directory available"),
            })
    }
}
