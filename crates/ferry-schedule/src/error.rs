//! # Design
//!
//! - Constant messages; the path and operation travel as fields.
//! - Storage failures surface to the caller because a task that was not
//!   persisted will never run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Result type for schedule store operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors produced by schedule stores.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Reading or writing the store file failed.
    #[error("schedule store io failure")]
    Io {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Store file path.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The store file could not be encoded or decoded.
    #[error("schedule store json failure")]
    Json {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Store file path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// No task with the given identifier exists.
    #[error("scheduled task not found")]
    NotFound {
        /// Requested identifier.
        id: Uuid,
    },
}
