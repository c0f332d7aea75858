//! Shared command context and the CLI error type.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use anyhow::anyhow;
use ferry_app::AppError;
use ferry_config::{ConfigError, ConfigLoader, FerryConfig};

use crate::cli::OutputFormat;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<AppError> for CliError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation(err) => Self::Validation(err.to_string()),
            AppError::Config { source, .. } => Self::from(source),
            other => Self::Failure(anyhow::Error::new(other)),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::InvalidField {
                section,
                field,
                value,
                reason,
            } => Self::Validation(match value {
                Some(value) => {
                    format!("invalid configuration value {section}.{field} = '{value}': {reason}")
                }
                None => format!("invalid configuration value {section}.{field}: {reason}"),
            }),
            ConfigError::InvalidOptions { field, reason } => {
                Self::Validation(format!("invalid {field} options: {reason}"))
            }
            ConfigError::Io { path, source, .. } => Self::Failure(anyhow!(
                "failed to read configuration '{}': {source}",
                path.display()
            )),
            ConfigError::Parse { path, source } => Self::Failure(anyhow!(
                "failed to parse configuration '{}': {source}",
                path.display()
            )),
        }
    }
}

/// Application context passed to command handlers.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) config: FerryConfig,
    pub(crate) config_source: Option<PathBuf>,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Load configuration from the explicit path, the environment or the
    /// platform default location.
    pub(crate) fn load(config_file: Option<PathBuf>, output: OutputFormat) -> CliResult<Self> {
        let loaded = ConfigLoader::new().with_path(config_file).load()?;
        Ok(Self {
            config: loaded.config,
            config_source: loaded.source,
            output,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_config(config: FerryConfig, output: OutputFormat) -> Self {
        Self {
            config,
            config_source: None,
            output,
        }
    }
}
