use ferry_app::bootstrap::build_schedule_store;
use ferry_schedule::{ScheduleError, ScheduleStore};
use tracing::info;

use crate::cli::ScheduleRemoveArgs;
use crate::context::{AppContext, CliError, CliResult};
use crate::output::{render_removed_task, render_task_list};

pub(crate) async fn handle_schedule_list(ctx: &AppContext) -> CliResult<()> {
    let store = build_schedule_store(&ctx.config)?;
    let tasks = store.list().await.map_err(schedule_failure)?;
    render_task_list(&tasks, ctx.output)
}

pub(crate) async fn handle_schedule_remove(
    ctx: &AppContext,
    args: ScheduleRemoveArgs,
) -> CliResult<()> {
    let store = build_schedule_store(&ctx.config)?;
    let removed = store.remove(args.id).await.map_err(schedule_failure)?;
    info!(task_id = %removed.id, kind = removed.kind.as_str(), "scheduled task removed");
    render_removed_task(&removed, ctx.output)
}

fn schedule_failure(error: ScheduleError) -> CliError {
    match error {
        ScheduleError::NotFound { id } => {
            CliError::validation(format!("no scheduled task with id {id}"))
        }
        other => CliError::failure(other),
    }
}
