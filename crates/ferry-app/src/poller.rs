//! Status polling with bounded backoff and a per-job deadline.

use std::sync::Arc;
use std::time::Duration;

use ferry_config::PollSettings;
use ferry_core::{JobId, JobOutcome, TransferEngine};
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

/// Timing of status queries for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between submission and the first query.
    pub settle: Duration,
    /// First wait between queries; doubled after each query.
    pub initial_backoff: Duration,
    /// Ceiling for the wait between queries.
    pub max_backoff: Duration,
    /// Deadline for a terminal status, counted from submission.
    pub job_timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from(&PollSettings::default())
    }
}

impl From<&PollSettings> for PollPolicy {
    fn from(settings: &PollSettings) -> Self {
        Self {
            settle: settings.settle(),
            initial_backoff: settings.initial_backoff(),
            max_backoff: settings.max_backoff(),
            job_timeout: settings.job_timeout(),
        }
    }
}

/// Queries the engine until a job reaches a terminal status or its deadline passes.
#[derive(Clone)]
pub struct JobStatusPoller {
    engine: Arc<dyn TransferEngine>,
    policy: PollPolicy,
}

impl JobStatusPoller {
    /// Poller for `engine` using `policy`.
    #[must_use]
    pub fn new(engine: Arc<dyn TransferEngine>, policy: PollPolicy) -> Self {
        Self { engine, policy }
    }

    /// Poll `id` to a classified outcome.
    ///
    /// Failed queries are logged and retried; they never count as success. When
    /// the deadline passes the outcome is [`JobOutcome::Unknown`].
    pub async fn await_outcome(&self, id: JobId) -> JobOutcome {
        let deadline = Instant::now() + self.policy.job_timeout;
        sleep(self.policy.settle.min(self.policy.job_timeout)).await;

        let mut backoff = self.policy.initial_backoff;
        let mut last_error: Option<String> = None;
        loop {
            match self.engine.job_status(id).await {
                Ok(status) => {
                    if let Some(outcome) = JobOutcome::classify(&status) {
                        debug!(job_id = %id, ?outcome, "job reached terminal status");
                        return outcome;
                    }
                    debug!(job_id = %id, "job still running");
                }
                Err(err) => {
                    warn!(job_id = %id, error = %err, "job status query failed");
                    last_error = Some(err.to_string());
                }
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            sleep(backoff.min(deadline - now)).await;
            backoff = backoff.saturating_mul(2).min(self.policy.max_backoff);
        }

        let mut message = format!(
            "job {id} did not finish within {:?}",
            self.policy.job_timeout
        );
        if let Some(error) = last_error {
            message.push_str(&format!(", last error: {error}"));
        }
        warn!(job_id = %id, "{message}");
        JobOutcome::Unknown(message)
    }
}
