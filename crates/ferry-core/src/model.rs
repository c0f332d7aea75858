//! Requests, planned groups, engine job payloads, outcomes and scheduled tasks.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Engine option mapping (filter, config or remote options) keyed by option name.
pub type OptionMap = BTreeMap<String, Value>;

/// Filter key holding an explicit list of file names to include.
pub const INCLUDE_RULE_KEY: &str = "IncludeRule";
/// Filter key pointing at a file that lists names to include.
pub const INCLUDE_FROM_KEY: &str = "IncludeFrom";

/// Label prefix used for groups of files sharing a parent directory.
const FILE_GROUP_PREFIX: &str = "[group]";

/// A batch move request: many sources, one destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Ordered source paths; a trailing `/` marks a directory.
    pub sources: Vec<String>,
    /// Destination directory shared by every source.
    pub destination: String,
    /// Recreate empty source directories at the destination.
    pub create_empty_src_dirs: bool,
    /// Remove directories left empty at the destination.
    pub delete_empty_dst_dirs: bool,
    /// Base filter options applied to every job.
    pub filter: OptionMap,
    /// Config options, already merged with move-specific options.
    pub config: OptionMap,
    /// Backend options applied to remote paths.
    pub remote_options: OptionMap,
    /// Optional cron expression for deferred re-execution.
    pub cron: Option<String>,
}

impl TransferRequest {
    /// Build a request with empty option maps and no schedule.
    #[must_use]
    pub fn new(sources: Vec<String>, destination: impl Into<String>) -> Self {
        Self {
            sources,
            destination: destination.into(),
            ..Self::default()
        }
    }
}

/// A single-path delete request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Path whose contents are deleted.
    pub fs: String,
    /// Also remove directories emptied by the delete.
    pub rm_dirs: bool,
    /// Filter options scoping the delete.
    pub filter: OptionMap,
    /// Config options for the job.
    pub config: OptionMap,
    /// Optional cron expression for deferred re-execution.
    pub cron: Option<String>,
}

/// One unit of work derived from the source list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceGroup {
    /// Files sharing a syntactic parent directory.
    Files {
        /// Parent directory used as the job source.
        parent: String,
        /// Base names of the grouped files, in source order.
        names: Vec<String>,
    },
    /// A whole directory.
    Directory {
        /// Directory path as supplied, trailing separator included.
        path: String,
    },
}

impl SourceGroup {
    /// Label used to key failures for this group.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Files { parent, .. } => format!("{FILE_GROUP_PREFIX} {parent}"),
            Self::Directory { path } => path.clone(),
        }
    }

    /// Source path submitted to the engine for this group.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Files { parent, .. } => parent,
            Self::Directory { path } => path,
        }
    }
}

/// Engine-assigned job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl Display for JobId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Payload for an asynchronous move job.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveJob {
    /// Source path.
    pub src_fs: String,
    /// Destination path.
    pub dst_fs: String,
    /// Recreate empty source directories.
    pub create_empty_src_dirs: bool,
    /// Remove emptied destination directories.
    pub delete_empty_dst_dirs: bool,
    /// Config options.
    pub config: OptionMap,
    /// Filter options.
    pub filter: OptionMap,
    /// Backend options for remote paths.
    pub remote_options: OptionMap,
}

/// Payload for an asynchronous delete job.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteJob {
    /// Path whose contents are deleted.
    pub fs: String,
    /// Remove emptied directories.
    pub rm_dirs: bool,
    /// Config options.
    pub config: OptionMap,
    /// Filter options.
    pub filter: OptionMap,
}

/// Job submitted to the transfer engine.
#[derive(Debug, Clone, PartialEq)]
pub enum JobSpec {
    /// Move files from one path to another.
    Move(MoveJob),
    /// Delete files under a path.
    Delete(DeleteJob),
}

impl JobSpec {
    /// Source path of the job.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Move(job) => &job.src_fs,
            Self::Delete(job) => &job.fs,
        }
    }

    /// Short operation name used in logs.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Move(_) => "move",
            Self::Delete(_) => "delete",
        }
    }
}

/// Status snapshot returned by the engine for a job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobStatus {
    /// Whether the job reached a terminal state.
    pub finished: bool,
    /// Whether the job succeeded.
    pub success: bool,
    /// Error message reported by the engine.
    pub error: Option<String>,
}

impl JobStatus {
    /// A job that is still running.
    #[must_use]
    pub const fn running() -> Self {
        Self {
            finished: false,
            success: false,
            error: None,
        }
    }

    /// A job that finished successfully.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            finished: true,
            success: true,
            error: None,
        }
    }

    /// A job that finished with an error.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            finished: true,
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Terminal classification of a group's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum JobOutcome {
    /// The job finished without error.
    Succeeded,
    /// Submission failed or the job finished with an error.
    Failed(String),
    /// No terminal status was observed in time.
    Unknown(String),
}

impl JobOutcome {
    /// Classify a finished status; returns `None` while the job is still running.
    #[must_use]
    pub fn classify(status: &JobStatus) -> Option<Self> {
        if !status.finished {
            return None;
        }
        let error = status
            .error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty());
        Some(match (error, status.success) {
            (Some(message), _) => Self::Failed(message.to_string()),
            (None, true) => Self::Succeeded,
            (None, false) => Self::Failed("job finished without success".to_string()),
        })
    }

    /// Message to record in the failure report, if any.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Failed(message) | Self::Unknown(message) => Some(message),
        }
    }
}

/// Result of processing one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupResult {
    /// Position of the group in plan order.
    pub position: usize,
    /// Failure label of the group.
    pub label: String,
    /// Source path submitted.
    pub source: String,
    /// Resolved destination, empty for deletes.
    pub destination: String,
    /// Engine job identifier when submission succeeded.
    pub job_id: Option<JobId>,
    /// Terminal classification.
    pub outcome: JobOutcome,
}

/// Kind of operation captured by a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Scheduled move.
    Move,
    /// Scheduled delete.
    Delete,
}

impl TaskKind {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Delete => "delete",
        }
    }
}

/// Argument snapshot of a scheduled move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveArgs {
    /// Source path.
    pub src_fs: String,
    /// Destination path.
    pub dst_fs: String,
    /// Recreate empty source directories.
    pub create_empty_src_dirs: bool,
    /// Remove emptied destination directories.
    pub delete_empty_dst_dirs: bool,
    /// Merged config options.
    #[serde(rename = "_config")]
    pub config: OptionMap,
    /// Filter options.
    #[serde(rename = "_filter")]
    pub filter: OptionMap,
}

/// Argument snapshot of a scheduled delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteArgs {
    /// Path whose contents are deleted.
    pub fs: String,
    /// Remove emptied directories.
    pub rm_dirs: bool,
    /// Filter options.
    #[serde(rename = "_filter")]
    pub filter: OptionMap,
    /// Config options.
    #[serde(rename = "_config")]
    pub config: OptionMap,
}

/// Argument snapshot stored with a scheduled task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskArgs {
    /// Move arguments.
    Move(MoveArgs),
    /// Delete arguments.
    Delete(DeleteArgs),
}

/// Persisted description of a deferred operation, executed by an external scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Task identifier.
    pub id: Uuid,
    /// Operation kind.
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Cron expression as supplied.
    pub cron: String,
    /// Argument snapshot taken at registration time.
    pub args: TaskArgs,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl ScheduledTask {
    /// Snapshot a single-source move request.
    #[must_use]
    pub fn for_move(request: &TransferRequest, cron: impl Into<String>) -> Self {
        let src_fs = request.sources.first().cloned().unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            kind: TaskKind::Move,
            cron: cron.into(),
            args: TaskArgs::Move(MoveArgs {
                src_fs,
                dst_fs: request.destination.clone(),
                create_empty_src_dirs: request.create_empty_src_dirs,
                delete_empty_dst_dirs: request.delete_empty_dst_dirs,
                config: request.config.clone(),
                filter: request.filter.clone(),
            }),
            created_at: Utc::now(),
        }
    }

    /// Snapshot a delete request.
    #[must_use]
    pub fn for_delete(request: &DeleteRequest, cron: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: TaskKind::Delete,
            cron: cron.into(),
            args: TaskArgs::Delete(DeleteArgs {
                fs: request.fs.clone(),
                rm_dirs: request.rm_dirs,
                filter: request.filter.clone(),
                config: request.config.clone(),
            }),
            created_at: Utc::now(),
        }
    }
}
