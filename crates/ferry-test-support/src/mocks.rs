//! In-memory stand-ins for the transfer engine and the local filesystem.

use std::collections::{HashMap, HashSet, VecDeque};

use async_trait::async_trait;
use ferry_core::{EngineError, EngineResult, JobId, JobSpec, JobStatus, PathProbe, TransferEngine};
use tokio::sync::Mutex;

/// One scripted answer to a status query.
#[derive(Debug, Clone)]
pub enum StatusStep {
    /// Answer with this status.
    Report(JobStatus),
    /// Fail the query with a transport error.
    QueryFails(String),
}

#[derive(Debug, Clone)]
enum Script {
    RejectSubmit(String),
    Statuses(Vec<StatusStep>),
}

#[derive(Debug, Default)]
struct EngineState {
    next_id: u64,
    scripts: HashMap<String, Script>,
    jobs: HashMap<JobId, VecDeque<StatusStep>>,
    submissions: Vec<JobSpec>,
    queries: HashMap<JobId, usize>,
}

/// Transfer engine driven by per-source scripts.
///
/// Jobs without a script finish successfully on the first query. The last
/// scripted step repeats once the script is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    state: Mutex<EngineState>,
}

impl ScriptedEngine {
    /// Engine where every job succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject submissions whose source equals `source`.
    #[must_use]
    pub fn reject_submit(mut self, source: &str, message: &str) -> Self {
        self.state
            .get_mut()
            .scripts
            .insert(source.to_string(), Script::RejectSubmit(message.to_string()));
        self
    }

    /// Answer status queries for jobs from `source` with the given steps.
    #[must_use]
    pub fn with_statuses(mut self, source: &str, steps: Vec<StatusStep>) -> Self {
        self.state
            .get_mut()
            .scripts
            .insert(source.to_string(), Script::Statuses(steps));
        self
    }

    /// Jobs from `source` finish with the given error.
    #[must_use]
    pub fn fail_job(self, source: &str, message: &str) -> Self {
        self.with_statuses(source, vec![StatusStep::Report(JobStatus::failed(message))])
    }

    /// Jobs from `source` never finish.
    #[must_use]
    pub fn never_finish(self, source: &str) -> Self {
        self.with_statuses(source, vec![StatusStep::Report(JobStatus::running())])
    }

    /// Jobs accepted so far, in submission order.
    pub async fn submissions(&self) -> Vec<JobSpec> {
        self.state.lock().await.submissions.clone()
    }

    /// Number of status queries made for a job.
    pub async fn status_queries(&self, id: JobId) -> usize {
        self.state
            .lock()
            .await
            .queries
            .get(&id)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl TransferEngine for ScriptedEngine {
    async fn submit(&self, job: &JobSpec) -> EngineResult<JobId> {
        let mut state = self.state.lock().await;
        let steps = match state.scripts.get(job.source()) {
            Some(Script::RejectSubmit(message)) => {
                return Err(EngineError::rejected("submit", 500, message.clone()));
            }
            Some(Script::Statuses(steps)) => steps.iter().cloned().collect(),
            None => VecDeque::from([StatusStep::Report(JobStatus::succeeded())]),
        };
        state.next_id += 1;
        let id = JobId(state.next_id);
        state.jobs.insert(id, steps);
        state.submissions.push(job.clone());
        Ok(id)
    }

    async fn job_status(&self, id: JobId) -> EngineResult<JobStatus> {
        let mut state = self.state.lock().await;
        *state.queries.entry(id).or_default() += 1;
        let Some(steps) = state.jobs.get_mut(&id) else {
            return Err(EngineError::rejected("job/status", 404, "job not found"));
        };
        let step = if steps.len() > 1 {
            steps.pop_front()
        } else {
            steps.front().cloned()
        };
        match step {
            Some(StatusStep::Report(status)) => Ok(status),
            Some(StatusStep::QueryFails(message)) => Err(EngineError::transport(
                "job/status",
                std::io::Error::other(message),
            )),
            None => Ok(JobStatus::running()),
        }
    }
}

/// Path probe backed by a fixed set of existing paths.
#[derive(Debug, Default, Clone)]
pub struct StaticProbe {
    existing: HashSet<String>,
    everything: bool,
}

impl StaticProbe {
    /// Probe where only the listed paths exist.
    #[must_use]
    pub fn with_paths(paths: &[&str]) -> Self {
        Self {
            existing: paths.iter().map(ToString::to_string).collect(),
            everything: false,
        }
    }

    /// Probe where every path exists.
    #[must_use]
    pub fn everything() -> Self {
        Self {
            existing: HashSet::new(),
            everything: true,
        }
    }
}

#[async_trait]
impl PathProbe for StaticProbe {
    async fn exists(&self, path: &str) -> std::io::Result<bool> {
        Ok(self.everything || self.existing.contains(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::{DeleteJob, OptionMap};

    fn delete(fs: &str) -> JobSpec {
        JobSpec::Delete(DeleteJob {
            fs: fs.to_string(),
            rm_dirs: false,
            config: OptionMap::new(),
            filter: OptionMap::new(),
        })
    }

    #[tokio::test]
    async fn unscripted_jobs_succeed_and_are_recorded() {
        let engine = ScriptedEngine::new();
        let id = engine.submit(&delete("a")).await.expect("submit should succeed");
        assert_eq!(id, JobId(1));
        let status = engine.job_status(id).await.expect("status should resolve");
        assert_eq!(status, JobStatus::succeeded());
        assert_eq!(engine.submissions().await.len(), 1);
        assert_eq!(engine.status_queries(id).await, 1);
    }

    #[tokio::test]
    async fn scripted_steps_play_in_order_and_last_repeats() {
        let engine = ScriptedEngine::new().with_statuses(
            "a",
            vec![
                StatusStep::QueryFails("refused".into()),
                StatusStep::Report(JobStatus::running()),
            ],
        );
        let id = engine.submit(&delete("a")).await.expect("submit should succeed");
        assert!(engine.job_status(id).await.is_err());
        for _ in 0..3 {
            let status = engine.job_status(id).await.expect("status should resolve");
            assert!(!status.finished);
        }
    }

    #[tokio::test]
    async fn rejected_sources_fail_submission() {
        let engine = ScriptedEngine::new().reject_submit("a", "directory not found");
        let err = engine.submit(&delete("a")).await.unwrap_err();
        assert_eq!(err.to_string(), "directory not found");
        assert!(engine.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn static_probe_reports_listed_paths() {
        let probe = StaticProbe::with_paths(&["/data"]);
        assert!(probe.exists("/data").await.expect("probe"));
        assert!(!probe.exists("/other").await.expect("probe"));
        assert!(StaticProbe::everything().exists("/x").await.expect("probe"));
    }
}
