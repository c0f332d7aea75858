//! [`TransferEngine`] implementation over the rc HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use ferry_core::{EngineError, EngineResult, JobId, JobSpec, JobStatus, TransferEngine};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::remote::apply_remote_options;
use crate::wire::{
    DELETE_PATH, DeleteBody, ErrorBody, JobHandle, MOVE_PATH, MoveBody, STATUS_PATH, StatusBody,
    StatusQuery,
};

/// Basic-auth credentials for an rc server started with `--rc-user`/`--rc-pass`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcCredentials {
    /// User name.
    pub user: String,
    /// Password.
    pub password: String,
}

/// HTTP client for the engine's remote-control endpoints.
#[derive(Debug, Clone)]
pub struct RcEngine {
    client: Client,
    base_url: Url,
    credentials: Option<RcCredentials>,
}

impl RcEngine {
    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: Client, base_url: Url, credentials: Option<RcCredentials>) -> Self {
        Self {
            client,
            base_url: with_trailing_slash(base_url),
            credentials,
        }
    }

    /// Build a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Transport`] when the HTTP client cannot be built.
    pub fn connect(
        base_url: Url,
        credentials: Option<RcCredentials>,
        timeout: Duration,
    ) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| EngineError::transport("client", err))?;
        Ok(Self::new(client, base_url, credentials))
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn call<B, R>(&self, operation: &'static str, body: &B) -> EngineResult<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(operation)
            .map_err(|err| EngineError::transport(operation, err))?;
        let mut request = self.client.post(url).json(body);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .map_err(|err| EngineError::transport(operation, err))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| EngineError::transport(operation, err))?;

        if !status.is_success() {
            return Err(classify_rejection(operation, status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|err| EngineError::Decode {
            operation,
            detail: err.to_string(),
        })
    }
}

#[async_trait]
impl TransferEngine for RcEngine {
    async fn submit(&self, job: &JobSpec) -> EngineResult<JobId> {
        let handle: JobHandle = match job {
            JobSpec::Move(job) => {
                let body = MoveBody {
                    src_fs: apply_remote_options(&job.src_fs, &job.remote_options),
                    dst_fs: apply_remote_options(&job.dst_fs, &job.remote_options),
                    create_empty_src_dirs: job.create_empty_src_dirs,
                    delete_empty_dst_dirs: job.delete_empty_dst_dirs,
                    config: &job.config,
                    filter: &job.filter,
                    run_async: true,
                };
                self.call(MOVE_PATH, &body).await?
            }
            JobSpec::Delete(job) => {
                let body = DeleteBody {
                    fs: &job.fs,
                    rm_dirs: job.rm_dirs,
                    config: &job.config,
                    filter: &job.filter,
                    run_async: true,
                };
                self.call(DELETE_PATH, &body).await?
            }
        };
        let id = JobId(handle.jobid);
        tracing::debug!(operation = job.operation(), source = job.source(), job_id = %id, "job submitted");
        Ok(id)
    }

    async fn job_status(&self, id: JobId) -> EngineResult<JobStatus> {
        let body: StatusBody = self.call(STATUS_PATH, &StatusQuery { jobid: id.0 }).await?;
        Ok(JobStatus {
            finished: body.finished,
            success: body.success,
            error: body.error.filter(|message| !message.trim().is_empty()),
        })
    }
}

fn classify_rejection(operation: &'static str, status: StatusCode, bytes: &[u8]) -> EngineError {
    let body_text = String::from_utf8_lossy(bytes).trim().to_string();
    let message = serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.is_empty())
        .or_else(|| (!body_text.is_empty()).then_some(body_text))
        .unwrap_or_else(|| format!("{operation} failed with status {status}"));
    EngineError::rejected(operation, status.as_u16(), message)
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use ferry_core::{DeleteJob, MoveJob, OptionMap};
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::json;

    fn engine(server: &MockServer, credentials: Option<RcCredentials>) -> Result<RcEngine> {
        let base_url = server.base_url().parse()?;
        Ok(RcEngine::new(Client::new(), base_url, credentials))
    }

    fn move_job() -> MoveJob {
        MoveJob {
            src_fs: "/data/a".into(),
            dst_fs: "remote:backup".into(),
            create_empty_src_dirs: true,
            delete_empty_dst_dirs: false,
            config: OptionMap::from([("Transfers".to_string(), json!(8))]),
            filter: OptionMap::from([("IncludeRule".to_string(), json!(["x.txt"]))]),
            remote_options: OptionMap::new(),
        }
    }

    #[tokio::test]
    async fn submit_move_posts_async_job_and_returns_id() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/sync/move").json_body(json!({
                "srcFs": "/data/a",
                "dstFs": "remote:backup",
                "createEmptySrcDirs": true,
                "deleteEmptyDstDirs": false,
                "_config": {"Transfers": 8},
                "_filter": {"IncludeRule": ["x.txt"]},
                "_async": true
            }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"jobid": 42}));
        });

        let id = engine(&server, None)?
            .submit(&JobSpec::Move(move_job()))
            .await?;
        assert_eq!(id, JobId(42));
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn submit_move_applies_remote_options_to_remote_paths() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/sync/move").json_body(json!({
                "srcFs": "/data/a",
                "dstFs": "remote,chunk_size=64M:backup",
                "createEmptySrcDirs": false,
                "deleteEmptyDstDirs": false,
                "_config": {},
                "_filter": {},
                "_async": true
            }));
            then.status(200).json_body(json!({"jobid": 1}));
        });

        let job = MoveJob {
            create_empty_src_dirs: false,
            config: OptionMap::new(),
            filter: OptionMap::new(),
            remote_options: OptionMap::from([("chunk_size".to_string(), json!("64M"))]),
            ..move_job()
        };
        engine(&server, None)?.submit(&JobSpec::Move(job)).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn submit_delete_sends_basic_auth() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/operations/delete")
                .header("authorization", "Basic dXNlcjpwYXNz")
                .json_body(json!({
                    "fs": "remote:tmp",
                    "rmDirs": true,
                    "_config": {},
                    "_filter": {},
                    "_async": true
                }));
            then.status(200).json_body(json!({"jobid": 5}));
        });

        let credentials = RcCredentials {
            user: "user".into(),
            password: "pass".into(),
        };
        let job = JobSpec::Delete(DeleteJob {
            fs: "remote:tmp".into(),
            rm_dirs: true,
            config: OptionMap::new(),
            filter: OptionMap::new(),
        });
        let id = engine(&server, Some(credentials))?.submit(&job).await?;
        assert_eq!(id, JobId(5));
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn rejected_submission_surfaces_engine_error_message() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/sync/move");
            then.status(500).json_body(json!({
                "error": "directory not found",
                "input": {},
                "path": "sync/move",
                "status": 500
            }));
        });

        let err = engine(&server, None)?
            .submit(&JobSpec::Move(move_job()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "directory not found");
        assert!(matches!(err, EngineError::Rejected { status: 500, .. }));
        Ok(())
    }

    #[tokio::test]
    async fn job_status_normalises_empty_error() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/job/status")
                .json_body(json!({"jobid": 9}));
            then.status(200).json_body(json!({
                "finished": true,
                "success": true,
                "error": "",
                "id": 9,
                "duration": 1.5
            }));
        });

        let status = engine(&server, None)?.job_status(JobId(9)).await?;
        assert_eq!(status, JobStatus::succeeded());
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_payload_is_reported() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/sync/move");
            then.status(200).body("not json");
        });

        let err = engine(&server, None)?
            .submit(&JobSpec::Move(move_job()))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Decode { operation: "sync/move", .. }));
        Ok(())
    }

    #[test]
    fn base_url_gains_trailing_slash() -> Result<()> {
        let engine = RcEngine::new(Client::new(), "http://localhost:5572/rc".parse()?, None);
        assert_eq!(engine.base_url().as_str(), "http://localhost:5572/rc/");
        Ok(())
    }
}
