//! Move and delete pipelines.
//!
//! validate, then prepare and register the schedule entry, then plan, then
//! dispatch and poll every group with bounded concurrency, then aggregate.
//! Validation failures stop the pipeline before anything is registered or
//! submitted; per-group failures only ever reach the final report.

use std::sync::Arc;

use ferry_core::{
    BatchOutcome, DeleteRequest, GroupResult, JobOutcome, PathProbe, PlannedJob, ScheduledTask,
    TransferEngine, TransferRequest, aggregate, plan_delete, plan_move, validate_delete,
    validate_move,
};
use ferry_schedule::{ScheduleRegistrar, ScheduleStore};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, instrument};

use crate::dispatcher::JobDispatcher;
use crate::error::{AppError, AppResult};
use crate::poller::{JobStatusPoller, PollPolicy};

/// Result of one invocation: the registered schedule entry, if any, and the
/// outcome of the immediate run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Task registered for deferred execution.
    pub scheduled: Option<ScheduledTask>,
    /// Outcome of the immediate run.
    pub outcome: BatchOutcome,
}

/// Drives requests through validation, scheduling, dispatch, polling and reporting.
#[derive(Clone)]
pub struct Orchestrator {
    dispatcher: JobDispatcher,
    poller: JobStatusPoller,
    registrar: ScheduleRegistrar,
    probe: Arc<dyn PathProbe>,
    max_concurrent_jobs: usize,
}

impl Orchestrator {
    /// Wire an orchestrator from its collaborators.
    #[must_use]
    pub fn new(
        engine: Arc<dyn TransferEngine>,
        store: Arc<dyn ScheduleStore>,
        probe: Arc<dyn PathProbe>,
        policy: PollPolicy,
        max_concurrent_jobs: usize,
    ) -> Self {
        Self {
            dispatcher: JobDispatcher::new(engine.clone()),
            poller: JobStatusPoller::new(engine, policy),
            registrar: ScheduleRegistrar::new(store),
            probe,
            max_concurrent_jobs: max_concurrent_jobs.max(1),
        }
    }

    /// Run a batch move.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for pre-dispatch failures and
    /// [`AppError::Schedule`] when the schedule entry cannot be stored.
    #[instrument(
        name = "orchestrator.move",
        skip_all,
        fields(sources = request.sources.len(), destination = %request.destination)
    )]
    pub async fn run_move(&self, request: &TransferRequest) -> AppResult<RunSummary> {
        validate_move(request, self.probe.as_ref()).await?;
        let task = ScheduleRegistrar::prepare_move(request)?;
        let scheduled = self.register(task).await?;

        let jobs = plan_move(request);
        let outcome = self.execute(jobs).await;
        Ok(RunSummary { scheduled, outcome })
    }

    /// Run a delete.
    ///
    /// # Errors
    ///
    /// See [`Orchestrator::run_move`].
    #[instrument(name = "orchestrator.delete", skip_all, fields(fs = %request.fs))]
    pub async fn run_delete(&self, request: &DeleteRequest) -> AppResult<RunSummary> {
        validate_delete(request, self.probe.as_ref()).await?;
        let task = ScheduleRegistrar::prepare_delete(request)?;
        let scheduled = self.register(task).await?;

        let jobs = plan_delete(request);
        let outcome = self.execute(jobs).await;
        Ok(RunSummary { scheduled, outcome })
    }

    async fn register(&self, task: Option<ScheduledTask>) -> AppResult<Option<ScheduledTask>> {
        let Some(task) = task else {
            return Ok(None);
        };
        let task = self
            .registrar
            .register(task)
            .await
            .map_err(|source| AppError::Schedule {
                operation: "schedule.register",
                source,
            })?;
        Ok(Some(task))
    }

    async fn execute(&self, jobs: Vec<PlannedJob>) -> BatchOutcome {
        let results: Vec<GroupResult> = stream::iter(jobs)
            .map(|job| self.run_group(job))
            .buffer_unordered(self.max_concurrent_jobs)
            .collect()
            .await;

        let outcome = aggregate(results);
        info!(
            started = outcome.started,
            groups = outcome.results.len(),
            failures = outcome.failures.len(),
            "batch finished"
        );
        outcome
    }

    async fn run_group(&self, job: PlannedJob) -> GroupResult {
        let (job_id, outcome) = match self.dispatcher.submit(&job).await {
            Ok(id) => (Some(id), self.poller.await_outcome(id).await),
            Err(err) => (None, JobOutcome::Failed(err.to_string())),
        };
        GroupResult {
            position: job.position,
            label: job.label(),
            source: job.group.source().to_string(),
            destination: job.destination,
            job_id,
            outcome,
        }
    }
}
