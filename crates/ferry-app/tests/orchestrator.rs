use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ferry_app::{AppError, Orchestrator, PollPolicy};
use ferry_core::{
    INCLUDE_RULE_KEY, JobOutcome, JobSpec, TaskArgs, TaskKind, ValidationError,
};
use ferry_schedule::{MemoryScheduleStore, ScheduleStore};
use ferry_test_support::fixtures::{delete_request, move_request, scheduled_move};
use ferry_test_support::mocks::{ScriptedEngine, StaticProbe};
use serde_json::json;

fn policy() -> PollPolicy {
    PollPolicy {
        settle: Duration::from_millis(500),
        initial_backoff: Duration::from_millis(250),
        max_backoff: Duration::from_secs(2),
        job_timeout: Duration::from_secs(30),
    }
}

struct Harness {
    engine: Arc<ScriptedEngine>,
    store: Arc<MemoryScheduleStore>,
    orchestrator: Orchestrator,
}

fn harness(engine: ScriptedEngine, max_concurrent_jobs: usize) -> Harness {
    let engine = Arc::new(engine);
    let store = Arc::new(MemoryScheduleStore::new());
    let orchestrator = Orchestrator::new(
        engine.clone(),
        store.clone(),
        Arc::new(StaticProbe::everything()),
        policy(),
        max_concurrent_jobs,
    );
    Harness {
        engine,
        store,
        orchestrator,
    }
}

#[tokio::test(start_paused = true)]
async fn mixed_sources_dispatch_one_job_per_group() -> Result<()> {
    let h = harness(ScriptedEngine::new(), 4);
    let summary = h
        .orchestrator
        .run_move(&move_request(&["a/x.txt", "a/y.txt", "b/"], "d"))
        .await?;

    assert!(summary.outcome.started);
    assert_eq!(summary.outcome.report, None);

    let mut submissions: Vec<_> = h
        .engine
        .submissions()
        .await
        .into_iter()
        .filter_map(|job| match job {
            JobSpec::Move(job) => Some(job),
            JobSpec::Delete(_) => None,
        })
        .collect();
    submissions.sort_by(|a, b| a.src_fs.cmp(&b.src_fs));
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0].src_fs, "a");
    assert_eq!(submissions[0].dst_fs, "d");
    assert_eq!(
        submissions[0].filter[INCLUDE_RULE_KEY],
        json!(["x.txt", "y.txt"])
    );
    assert_eq!(submissions[1].src_fs, "b/");
    assert_eq!(submissions[1].dst_fs, "d/b");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn include_rule_with_multiple_sources_is_rejected_before_dispatch() -> Result<()> {
    let h = harness(ScriptedEngine::new(), 4);
    let mut request = move_request(&["a/x.txt", "b/"], "d");
    request
        .filter
        .insert(INCLUDE_RULE_KEY.to_string(), json!(["x.txt"]));

    let err = h.orchestrator.run_move(&request).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::IncludeRulesWithMultipleSources)
    ));
    assert!(h.engine.submissions().await.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn cron_with_single_source_registers_task_even_when_dispatch_fails() -> Result<()> {
    let h = harness(
        ScriptedEngine::new().reject_submit("remote:src/", "engine offline"),
        4,
    );
    let summary = h
        .orchestrator
        .run_move(&scheduled_move(&["remote:src/"], "remote:dst", "0 3 * * *"))
        .await?;

    assert!(!summary.outcome.started);
    assert_eq!(summary.outcome.report.as_deref(), Some("engine offline"));

    let tasks = h.store.list().await?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].kind, TaskKind::Move);
    assert_eq!(tasks[0].cron, "0 3 * * *");
    assert!(matches!(&tasks[0].args, TaskArgs::Move(args) if args.src_fs == "remote:src/"));
    assert_eq!(summary.scheduled.as_ref().map(|t| t.id), Some(tasks[0].id));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn invalid_cron_aborts_before_registration_and_dispatch() -> Result<()> {
    let h = harness(ScriptedEngine::new(), 4);
    let err = h
        .orchestrator
        .run_move(&scheduled_move(&["remote:src/"], "remote:dst", "every day"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::InvalidCron { .. })
    ));
    assert!(h.store.list().await?.is_empty());
    assert!(h.engine.submissions().await.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn two_groups_both_failing_report_first_error_and_do_not_start() -> Result<()> {
    let engine = ScriptedEngine::new()
        .reject_submit("a", "first failure")
        .reject_submit("b/", "second failure");
    let h = harness(engine, 4);

    let summary = h
        .orchestrator
        .run_move(&move_request(&["a/x.txt", "b/"], "d"))
        .await?;
    assert!(!summary.outcome.started);
    assert_eq!(summary.outcome.report.as_deref(), Some("first failure"));
    assert_eq!(summary.outcome.failures.len(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn one_failing_group_lists_labelled_failures_and_starts() -> Result<()> {
    let engine = ScriptedEngine::new().fail_job("b/", "directory not found");
    let h = harness(engine, 4);

    let summary = h
        .orchestrator
        .run_move(&move_request(&["a/x.txt", "b/"], "d"))
        .await?;
    assert!(summary.outcome.started);
    assert_eq!(
        summary.outcome.report.as_deref(),
        Some("b/ directory not found")
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn timed_out_group_is_unknown_not_success() -> Result<()> {
    let engine = ScriptedEngine::new().never_finish("b/");
    let h = harness(engine, 4);

    let summary = h
        .orchestrator
        .run_move(&move_request(&["a/x.txt", "b/"], "d"))
        .await?;
    assert!(summary.outcome.started);
    let stalled = &summary.outcome.results[1];
    assert_eq!(stalled.label, "b/");
    assert!(matches!(stalled.outcome, JobOutcome::Unknown(_)));
    let report = summary.outcome.report.unwrap_or_default();
    assert!(report.starts_with("b/ job "), "{report}");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn report_order_follows_plan_not_completion() -> Result<()> {
    // The file group finishes last but is still reported first.
    let engine = ScriptedEngine::new()
        .with_statuses(
            "a",
            vec![
                ferry_test_support::mocks::StatusStep::Report(ferry_core::JobStatus::running()),
                ferry_test_support::mocks::StatusStep::Report(ferry_core::JobStatus::running()),
                ferry_test_support::mocks::StatusStep::Report(ferry_core::JobStatus::failed(
                    "late",
                )),
            ],
        )
        .fail_job("b/", "early")
        .fail_job("c/", "early too");
    let h = harness(engine, 4);

    let summary = h
        .orchestrator
        .run_move(&move_request(&["b/", "a/x.txt", "c/", "z/ok/"], "d"))
        .await?;
    assert_eq!(
        summary.outcome.report.as_deref(),
        Some("[group] a late, b/ early, c/ early too")
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn sequential_dispatch_processes_groups_in_plan_order() -> Result<()> {
    let h = harness(ScriptedEngine::new(), 1);
    h.orchestrator
        .run_move(&move_request(&["z/", "a/x", "m/"], "d"))
        .await?;
    let sources: Vec<String> = h
        .engine
        .submissions()
        .await
        .iter()
        .map(|job| job.source().to_string())
        .collect();
    assert_eq!(sources, ["a", "z/", "m/"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn delete_runs_one_job_and_registers_cron() -> Result<()> {
    let h = harness(ScriptedEngine::new(), 4);
    let mut request = delete_request("remote:tmp");
    request.rm_dirs = true;
    request.cron = Some("*/30 * * * *".into());

    let summary = h.orchestrator.run_delete(&request).await?;
    assert!(summary.outcome.started);

    let submissions = h.engine.submissions().await;
    assert_eq!(submissions.len(), 1);
    assert!(matches!(&submissions[0], JobSpec::Delete(job) if job.rm_dirs && job.fs == "remote:tmp"));

    let tasks = h.store.list().await?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].kind, TaskKind::Delete);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn missing_local_source_is_rejected() -> Result<()> {
    let engine = Arc::new(ScriptedEngine::new());
    let orchestrator = Orchestrator::new(
        engine.clone(),
        Arc::new(MemoryScheduleStore::new()),
        Arc::new(StaticProbe::with_paths(&["/backup"])),
        policy(),
        4,
    );
    let err = orchestrator
        .run_move(&move_request(&["/data/missing.txt"], "/backup"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "source path does not exist, /data/missing.txt is missing"
    );
    assert!(engine.submissions().await.is_empty());
    Ok(())
}
