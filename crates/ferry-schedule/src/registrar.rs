//! Cron checks and registration of scheduled-task snapshots.

use std::sync::Arc;

use ferry_core::{
    DeleteRequest, ScheduledTask, TransferRequest, ValidationError, ValidationResult,
};
use tracing::info;

use crate::cron::validate_cron;
use crate::error::ScheduleResult;
use crate::store::ScheduleStore;

/// Validates deferred requests and hands their snapshots to a [`ScheduleStore`].
#[derive(Clone)]
pub struct ScheduleRegistrar {
    store: Arc<dyn ScheduleStore>,
}

impl ScheduleRegistrar {
    /// Registrar writing into `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    /// Check the request's cron settings and build the task to register, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CronWithMultipleSources`] or
    /// [`ValidationError::InvalidCron`].
    pub fn prepare_move(request: &TransferRequest) -> ValidationResult<Option<ScheduledTask>> {
        let Some(cron) = cron_of(request.cron.as_deref()) else {
            return Ok(None);
        };
        if request.sources.len() > 1 {
            return Err(ValidationError::CronWithMultipleSources);
        }
        validate_cron(cron)?;
        Ok(Some(ScheduledTask::for_move(request, cron)))
    }

    /// Check a delete request's cron expression and build its task, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCron`].
    pub fn prepare_delete(request: &DeleteRequest) -> ValidationResult<Option<ScheduledTask>> {
        let Some(cron) = cron_of(request.cron.as_deref()) else {
            return Ok(None);
        };
        validate_cron(cron)?;
        Ok(Some(ScheduledTask::for_delete(request, cron)))
    }

    /// Persist a prepared task.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn register(&self, task: ScheduledTask) -> ScheduleResult<ScheduledTask> {
        self.store.add_scheduled_task(task.clone()).await?;
        info!(
            task_id = %task.id,
            kind = task.kind.as_str(),
            cron = %task.cron,
            "scheduled task registered"
        );
        Ok(task)
    }
}

fn cron_of(cron: Option<&str>) -> Option<&str> {
    cron.map(str::trim).filter(|cron| !cron.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryScheduleStore;
    use anyhow::Result;
    use ferry_core::{TaskArgs, TaskKind};

    fn request(sources: &[&str], cron: Option<&str>) -> TransferRequest {
        TransferRequest {
            cron: cron.map(ToString::to_string),
            ..TransferRequest::new(
                sources.iter().map(ToString::to_string).collect(),
                "remote:dst",
            )
        }
    }

    #[test]
    fn requests_without_cron_schedule_nothing() -> Result<()> {
        assert!(ScheduleRegistrar::prepare_move(&request(&["a/", "b/"], None))?.is_none());
        assert!(ScheduleRegistrar::prepare_move(&request(&["a/"], Some("  ")))?.is_none());
        Ok(())
    }

    #[test]
    fn cron_with_multiple_sources_is_rejected_before_parsing() {
        let err =
            ScheduleRegistrar::prepare_move(&request(&["a/", "b/"], Some("garbage"))).unwrap_err();
        assert_eq!(err, ValidationError::CronWithMultipleSources);
    }

    #[test]
    fn invalid_cron_is_rejected() {
        let err = ScheduleRegistrar::prepare_move(&request(&["a/"], Some("99 * * * *"))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCron { .. }));
    }

    #[tokio::test]
    async fn valid_cron_registers_a_move_snapshot() -> Result<()> {
        let store = Arc::new(MemoryScheduleStore::new());
        let registrar = ScheduleRegistrar::new(store.clone());
        let mut req = request(&["remote:src/"], Some("0 3 * * *"));
        req.delete_empty_dst_dirs = true;

        let task = ScheduleRegistrar::prepare_move(&req)?.expect("task expected");
        registrar.register(task).await?;

        let tasks = store.list().await?;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].kind, TaskKind::Move);
        let TaskArgs::Move(args) = &tasks[0].args else {
            panic!("expected move args");
        };
        assert_eq!(args.src_fs, "remote:src/");
        assert_eq!(args.dst_fs, "remote:dst");
        assert!(args.delete_empty_dst_dirs);
        Ok(())
    }

    #[test]
    fn delete_with_cron_builds_delete_task() -> Result<()> {
        let req = DeleteRequest {
            fs: "remote:tmp".into(),
            rm_dirs: true,
            cron: Some("*/10 * * * *".into()),
            ..DeleteRequest::default()
        };
        let task = ScheduleRegistrar::prepare_delete(&req)?.expect("task expected");
        assert_eq!(task.kind, TaskKind::Delete);
        assert_eq!(task.cron, "*/10 * * * *");
        Ok(())
    }
}
