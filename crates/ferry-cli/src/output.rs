//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use ferry_app::RunSummary;
use ferry_core::{GroupResult, JobOutcome, ScheduledTask, TaskArgs};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

pub(crate) fn render_run_summary(summary: &RunSummary, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(summary)?,
        OutputFormat::Table => print!("{}", summary_table(summary)),
    }
    Ok(())
}

pub(crate) fn render_task_list(tasks: &[ScheduledTask], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&tasks)?,
        OutputFormat::Table => print!("{}", task_table(tasks)),
    }
    Ok(())
}

pub(crate) fn render_removed_task(task: &ScheduledTask, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(task)?,
        OutputFormat::Table => println!("removed {} task {}", task.kind.as_str(), task.id),
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn summary_table(summary: &RunSummary) -> String {
    let mut out = String::new();
    if let Some(task) = &summary.scheduled {
        let _ = writeln!(out, "scheduled: {} ({})", task.id, task.cron);
    }
    let _ = writeln!(out, "{:<32} {:>6} {:<10} DESTINATION", "GROUP", "JOB", "OUTCOME");
    for result in &summary.outcome.results {
        let _ = writeln!(out, "{}", group_row(result));
    }
    let _ = writeln!(out, "started: {}", summary.outcome.started);
    if let Some(report) = &summary.outcome.report {
        let _ = writeln!(out, "report: {report}");
    }
    out
}

fn group_row(result: &GroupResult) -> String {
    let job = result
        .job_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let destination = if result.destination.is_empty() {
        "-"
    } else {
        result.destination.as_str()
    };
    format!(
        "{:<32} {:>6} {:<10} {}",
        result.label,
        job,
        outcome_to_str(&result.outcome),
        destination
    )
}

const fn outcome_to_str(outcome: &JobOutcome) -> &'static str {
    match outcome {
        JobOutcome::Succeeded => "succeeded",
        JobOutcome::Failed(_) => "failed",
        JobOutcome::Unknown(_) => "unknown",
    }
}

pub(crate) fn task_table(tasks: &[ScheduledTask]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36} {:<6} {:<16} {:<25} SOURCE",
        "ID", "TYPE", "CRON", "CREATED"
    );
    for task in tasks {
        let source = match &task.args {
            TaskArgs::Move(args) => format!("{} -> {}", args.src_fs, args.dst_fs),
            TaskArgs::Delete(args) => args.fs.clone(),
        };
        let _ = writeln!(
            out,
            "{:<36} {:<6} {:<16} {:<25} {}",
            task.id,
            task.kind.as_str(),
            task.cron,
            task.created_at.format("%Y-%m-%dT%H:%M:%SZ"),
            source
        );
    }
    if tasks.is_empty() {
        out.push_str("no scheduled tasks\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_core::{BatchOutcome, DeleteRequest, JobId, aggregate};

    fn result(position: usize, label: &str, outcome: JobOutcome) -> GroupResult {
        GroupResult {
            position,
            label: label.to_string(),
            source: label.to_string(),
            destination: "d".to_string(),
            job_id: Some(JobId(position as u64 + 1)),
            outcome,
        }
    }

    #[test]
    fn summary_table_lists_groups_and_report() {
        let summary = RunSummary {
            scheduled: None,
            outcome: aggregate(vec![
                result(0, "[group] a", JobOutcome::Succeeded),
                result(1, "b/", JobOutcome::Failed("not found".into())),
            ]),
        };
        let table = summary_table(&summary);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("GROUP"));
        assert!(lines[1].starts_with("[group] a"));
        assert!(lines[1].contains("succeeded"));
        assert!(lines[2].contains("failed"));
        assert_eq!(lines[3], "started: true");
        assert_eq!(lines[4], "report: b/ not found");
    }

    #[test]
    fn empty_summary_has_header_only() {
        let summary = RunSummary {
            scheduled: None,
            outcome: BatchOutcome::empty(),
        };
        let table = summary_table(&summary);
        assert_eq!(table.lines().count(), 2);
    }

    #[test]
    fn task_table_shows_delete_source() {
        let request = DeleteRequest {
            fs: "remote:tmp".into(),
            rm_dirs: true,
            filter: ferry_core::OptionMap::new(),
            config: ferry_core::OptionMap::new(),
            cron: None,
        };
        let task = ScheduledTask::for_delete(&request, "*/5 * * * *");
        let table = task_table(std::slice::from_ref(&task));
        assert!(table.contains(&task.id.to_string()));
        assert!(table.contains("delete"));
        assert!(table.trim_end().ends_with("remote:tmp"));
        assert_eq!(task_table(&[]).lines().last(), Some("no scheduled tasks"));
    }
}
