//! Argument parsing, logging setup and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ferry_config::{FerryConfig, LogFormatSetting};
use ferry_telemetry::{LogFormat, LoggingConfig, build_sha, init_logging, process_span};
use tracing::{Instrument, debug};
use uuid::Uuid;

use crate::commands::schedule::{handle_schedule_list, handle_schedule_remove};
use crate::commands::transfer::{handle_delete, handle_move};
use crate::context::{AppContext, CliError, CliResult};

/// Parses CLI arguments, executes the requested command and reports the
/// outcome. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let command_name = command_label(&cli.command);

    let ctx = match AppContext::load(cli.config_file.clone(), cli.output) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            return err.exit_code();
        }
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| ctx.config.logging.level.clone());
    let logging = LoggingConfig {
        level: &log_level,
        format: log_format(&ctx.config),
        build_sha: build_sha(),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: logging disabled: {err}");
    }

    let span = process_span(command_name);
    span.in_scope(|| debug!(config = ?ctx.config_source, "configuration loaded"));
    let result = dispatch(cli.command, &ctx).instrument(span).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(command: Command, ctx: &AppContext) -> CliResult<()> {
    match command {
        Command::Move(args) => handle_move(ctx, args).await,
        Command::Delete(args) => handle_delete(ctx, args).await,
        Command::Schedule(schedule) => match schedule {
            ScheduleCommand::List => handle_schedule_list(ctx).await,
            ScheduleCommand::Remove(args) => handle_schedule_remove(ctx, args).await,
        },
    }
}

fn log_format(config: &FerryConfig) -> LogFormat {
    match config.logging.format {
        Some(LogFormatSetting::Json) => LogFormat::Json,
        Some(LogFormatSetting::Pretty) => LogFormat::Pretty,
        None => LogFormat::infer(),
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Move(_) => "move",
        Command::Delete(_) => "delete",
        Command::Schedule(ScheduleCommand::List) => "schedule_list",
        Command::Schedule(ScheduleCommand::Remove(_)) => "schedule_remove",
    }
}

#[derive(Parser)]
#[command(
    name = "ferry",
    version,
    about = "Batch move and delete orchestration for an rclone rc engine",
    after_help = "Exit status: 0 when the batch started (failed groups are printed as warnings), \
                  2 for invalid input, 3 when no group started or an operation failed."
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        help = "Configuration file (defaults to FERRY_CONFIG, then the platform config dir)"
    )]
    config_file: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[arg(long, global = true, help = "Log level or filter directive")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move sources into a destination, one engine job per source group.
    Move(MoveArgs),
    /// Delete the contents of a path.
    Delete(DeleteArgs),
    /// Inspect or prune scheduled tasks.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
}

#[derive(Subcommand)]
pub(crate) enum ScheduleCommand {
    /// List registered tasks.
    List,
    /// Remove a registered task.
    Remove(ScheduleRemoveArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct MoveArgs {
    #[arg(
        value_name = "PATHS",
        num_args = 2..,
        required = true,
        help = "Source paths followed by the destination"
    )]
    pub(crate) paths: Vec<String>,
    #[arg(long, help = "Recreate empty source directories at the destination")]
    pub(crate) create_empty_src_dirs: bool,
    #[arg(long, help = "Remove destination directories left empty")]
    pub(crate) delete_empty_dst_dirs: bool,
    #[arg(long, value_name = "JSON|@FILE")]
    pub(crate) filter: Option<String>,
    #[arg(long, value_name = "JSON|@FILE")]
    pub(crate) config: Option<String>,
    #[arg(long, value_name = "JSON|@FILE", help = "Move options merged over config")]
    pub(crate) move_options: Option<String>,
    #[arg(
        long,
        value_name = "JSON|@FILE",
        help = "Backend options applied to remote paths"
    )]
    pub(crate) remote_options: Option<String>,
    #[arg(long, help = "Also register the move for deferred execution")]
    pub(crate) cron: Option<String>,
}

impl MoveArgs {
    /// Split positional paths into sources and destination.
    pub(crate) fn split_paths(&self) -> CliResult<(Vec<String>, String)> {
        match self.paths.split_last() {
            Some((destination, sources)) if !sources.is_empty() => {
                Ok((sources.to_vec(), destination.clone()))
            }
            _ => Err(CliError::validation(
                "at least one source and a destination are required",
            )),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct DeleteArgs {
    #[arg(value_name = "FS")]
    pub(crate) fs: String,
    #[arg(long, help = "Remove directories left empty")]
    pub(crate) rm_dirs: bool,
    #[arg(long, value_name = "JSON|@FILE")]
    pub(crate) filter: Option<String>,
    #[arg(long, value_name = "JSON|@FILE")]
    pub(crate) config: Option<String>,
    #[arg(long, help = "Also register the delete for deferred execution")]
    pub(crate) cron: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ScheduleRemoveArgs {
    pub(crate) id: Uuid,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}
