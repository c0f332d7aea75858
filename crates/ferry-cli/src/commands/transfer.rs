use anyhow::anyhow;
use ferry_app::{
    DeleteInput, MoveInput, RunSummary, build_delete_request, build_move_request,
    build_orchestrator,
};
use tracing::warn;

use crate::cli::{DeleteArgs, MoveArgs};
use crate::context::{AppContext, CliError, CliResult};
use crate::options::read_option_document;
use crate::output::render_run_summary;

pub(crate) async fn handle_move(ctx: &AppContext, args: MoveArgs) -> CliResult<()> {
    let input = move_input(args)?;
    let request = build_move_request(&ctx.config, input);
    let orchestrator = build_orchestrator(&ctx.config)?;
    let summary = orchestrator.run_move(&request).await?;
    finish(&summary, ctx)
}

pub(crate) async fn handle_delete(ctx: &AppContext, args: DeleteArgs) -> CliResult<()> {
    let input = delete_input(args)?;
    let request = build_delete_request(&ctx.config, input);
    let orchestrator = build_orchestrator(&ctx.config)?;
    let summary = orchestrator.run_delete(&request).await?;
    finish(&summary, ctx)
}

fn move_input(args: MoveArgs) -> CliResult<MoveInput> {
    let (sources, destination) = args.split_paths()?;
    Ok(MoveInput {
        sources,
        destination,
        create_empty_src_dirs: args.create_empty_src_dirs,
        delete_empty_dst_dirs: args.delete_empty_dst_dirs,
        move_options: read_option_document("move", args.move_options.as_deref())?,
        filter: read_option_document("filter", args.filter.as_deref())?,
        config: read_option_document("config", args.config.as_deref())?,
        remote_options: read_option_document("remote", args.remote_options.as_deref())?
            .unwrap_or_default(),
        cron: args.cron,
    })
}

fn delete_input(args: DeleteArgs) -> CliResult<DeleteInput> {
    Ok(DeleteInput {
        fs: args.fs,
        rm_dirs: args.rm_dirs,
        filter: read_option_document("filter", args.filter.as_deref())?,
        config: read_option_document("config", args.config.as_deref())?,
        cron: args.cron,
    })
}

/// Render the summary. Only a batch where no group started is an error;
/// partial failures are reported as a warning.
fn finish(summary: &RunSummary, ctx: &AppContext) -> CliResult<()> {
    render_run_summary(summary, ctx.output)?;
    match &summary.outcome.report {
        None => Ok(()),
        Some(report) if summary.outcome.started => {
            warn!(failures = summary.outcome.failures.len(), "some groups failed");
            eprintln!("warning: some groups failed: {report}");
            Ok(())
        }
        Some(report) => Err(CliError::failure(anyhow!("{report}"))),
    }
}
