#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Engine-agnostic batch transfer planning, validation, and reporting.
//!
//! Layout: `model.rs` (requests, groups, jobs, outcomes, scheduled tasks),
//! `path.rs` (syntactic path helpers), `plan.rs` (partitioning, filters and
//! destinations), `validate.rs` (fail-fast request checks), `report.rs`
//! (failure aggregation), `service.rs` (engine and path-probe traits).

pub mod error;
pub mod model;
pub mod path;
pub mod plan;
pub mod report;
pub mod service;
pub mod validate;

pub use error::{EngineError, EngineResult, ValidationError, ValidationResult};
pub use model::{
    DeleteArgs, DeleteJob, DeleteRequest, GroupResult, INCLUDE_FROM_KEY, INCLUDE_RULE_KEY, JobId,
    JobOutcome, JobSpec, JobStatus, MoveArgs, MoveJob, OptionMap, ScheduledTask, SourceGroup,
    TaskArgs, TaskKind, TransferRequest,
};
pub use plan::{PlannedJob, partition, plan_delete, plan_move};
pub use report::{BatchOutcome, FailureEntry, FailureReport, aggregate};
pub use service::{PathProbe, TransferEngine};
pub use validate::{validate_delete, validate_move};
