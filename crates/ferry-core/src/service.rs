//! Seams to the outside world: the transfer engine and the local path probe.

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::model::{JobId, JobSpec, JobStatus};

/// Asynchronous transfer engine that accepts jobs and reports their status.
#[async_trait]
pub trait TransferEngine: Send + Sync {
    /// Submit a job; returns as soon as the engine has assigned an identifier.
    async fn submit(&self, job: &JobSpec) -> EngineResult<JobId>;

    /// Query the current status of a previously submitted job.
    async fn job_status(&self, id: JobId) -> EngineResult<JobStatus>;
}

/// Existence check for local paths.
#[async_trait]
pub trait PathProbe: Send + Sync {
    /// Whether the path exists.
    async fn exists(&self, path: &str) -> std::io::Result<bool>;
}
