//! # Design
//!
//! - Validation failures keep their user-facing text and abort before dispatch.
//! - Other failures carry an operation identifier and their source error.
//! - Per-group engine failures never appear here; they end up in the batch report.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request failed a pre-dispatch check.
    #[error(transparent)]
    Validation(#[from] ferry_core::ValidationError),
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: ferry_config::ConfigError,
    },
    /// Scheduled-task storage failed.
    #[error("schedule operation failed")]
    Schedule {
        /// Operation identifier.
        operation: &'static str,
        /// Source schedule error.
        source: ferry_schedule::ScheduleError,
    },
    /// The engine client could not be set up.
    #[error("engine setup failed")]
    Engine {
        /// Operation identifier.
        operation: &'static str,
        /// Source engine error.
        source: ferry_core::EngineError,
    },
    /// The configured engine URL did not parse.
    #[error("invalid engine url")]
    EngineUrl {
        /// Offending value.
        value: String,
        /// Parser error.
        source: url::ParseError,
    },
}

impl AppError {
    /// Whether the error is a pre-dispatch validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
