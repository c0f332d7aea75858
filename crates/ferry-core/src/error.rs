//! Error types for request validation and engine interaction.
//!
//! # Design
//! - Validation errors carry the user-facing message; they abort a batch before
//!   any job or schedule entry is created.
//! - Engine errors are recorded per group and rendered into the final report, so
//!   their display text includes the engine's own message.

use std::error::Error;

use thiserror::Error;

/// Fail-fast errors detected before any job is dispatched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No source or no destination was supplied.
    #[error("please select both a source and destination path")]
    MissingPaths,
    /// No source was supplied for a single-path operation.
    #[error("please select a source path")]
    MissingSource,
    /// A local source path does not exist.
    #[error("source path does not exist, {path} is missing")]
    SourceNotFound {
        /// Offending source path.
        path: String,
    },
    /// The local destination path does not exist.
    #[error("destination path does not exist")]
    DestinationNotFound {
        /// Offending destination path.
        path: String,
    },
    /// The destination equals one of the sources.
    #[error("destination {path} is also a source")]
    DestinationIsSource {
        /// Path used as both source and destination.
        path: String,
    },
    /// Checking a local path failed.
    #[error("could not check path {path}: {message}")]
    PathProbe {
        /// Path that could not be checked.
        path: String,
        /// Probe failure detail.
        message: String,
    },
    /// Include rules were combined with more than one source.
    #[error("include rules are not supported with multiple sources")]
    IncludeRulesWithMultipleSources,
    /// A cron schedule was requested for more than one source.
    #[error("cron is not supported for multiple sources, please use a single source")]
    CronWithMultipleSources,
    /// The cron expression did not parse.
    #[error("invalid cron expression")]
    InvalidCron {
        /// Expression supplied by the caller.
        expression: String,
        /// Parser detail.
        reason: String,
    },
}

/// Convenience alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors returned by a transfer engine for a single submission or status query.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request never reached the engine or the connection failed.
    #[error("{operation} request failed: {source}")]
    Transport {
        /// Engine operation identifier.
        operation: &'static str,
        /// Underlying transport failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The engine answered with an error status.
    #[error("{message}")]
    Rejected {
        /// Engine operation identifier.
        operation: &'static str,
        /// HTTP-style status code reported by the engine.
        status: u16,
        /// Engine-provided error message.
        message: String,
    },
    /// The engine answered with a payload that could not be decoded.
    #[error("{operation} returned an unexpected payload: {detail}")]
    Decode {
        /// Engine operation identifier.
        operation: &'static str,
        /// Decoder detail.
        detail: String,
    },
}

impl EngineError {
    /// Wrap a transport failure.
    pub fn transport(
        operation: &'static str,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            operation,
            source: source.into(),
        }
    }

    /// Build a rejection error from an engine status and message.
    pub fn rejected(operation: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            status,
            message: message.into(),
        }
    }
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
