//! Submission of planned jobs to the engine.

use std::sync::Arc;

use ferry_core::{EngineResult, JobId, PlannedJob, TransferEngine};
use tracing::{info, warn};

/// Submits one engine job per planned group.
#[derive(Clone)]
pub struct JobDispatcher {
    engine: Arc<dyn TransferEngine>,
}

impl JobDispatcher {
    /// Dispatcher submitting to `engine`.
    #[must_use]
    pub fn new(engine: Arc<dyn TransferEngine>) -> Self {
        Self { engine }
    }

    /// Submit the job for one group.
    ///
    /// # Errors
    ///
    /// Returns the engine error; callers record it against the group.
    pub async fn submit(&self, job: &PlannedJob) -> EngineResult<JobId> {
        let label = job.label();
        match self.engine.submit(&job.spec).await {
            Ok(id) => {
                info!(
                    group = %label,
                    job_id = %id,
                    operation = job.spec.operation(),
                    destination = %job.destination,
                    "job started"
                );
                Ok(id)
            }
            Err(err) => {
                warn!(group = %label, error = %err, "job submission failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::plan_move;
    use ferry_test_support::fixtures::move_request;
    use ferry_test_support::mocks::ScriptedEngine;

    #[tokio::test]
    async fn submits_every_group_independently() {
        let engine = Arc::new(ScriptedEngine::new().reject_submit("a", "source missing"));
        let dispatcher = JobDispatcher::new(engine.clone());
        let jobs = plan_move(&move_request(&["a/x", "b/"], "remote:d"));

        let first = dispatcher.submit(&jobs[0]).await;
        let second = dispatcher.submit(&jobs[1]).await;

        assert_eq!(first.unwrap_err().to_string(), "source missing");
        assert_eq!(second.expect("second group should start"), JobId(1));
        assert_eq!(engine.submissions().await.len(), 1);
    }
}
