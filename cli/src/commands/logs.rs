//! `deployctl logs`: show compose logs for the local stack.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::{ComposeArgs, passthrough};
use crate::domain::plan;

/// Arguments shared by local and remote logs.
#[derive(Args, Debug, Default, Clone)]
pub struct LogsArgs {
    /// Only show logs for this service (repeatable)
    #[arg(short, long = "service", value_name = "SERVICE")]
    pub services: Vec<String>,

    /// Number of lines to show from the end of each log
    #[arg(long, value_name = "N")]
    pub tail: Option<u32>,

    /// Stream logs in real time
    #[arg(short, long)]
    pub follow: bool,
}

impl LogsArgs {
    #[must_use]
    pub fn compose_args(&self) -> Vec<String> {
        plan::logs_args(self.tail, self.follow, &self.services)
    }
}

#[derive(Args, Debug, Default)]
pub struct LocalLogsArgs {
    #[command(flatten)]
    pub logs: LogsArgs,

    #[command(flatten)]
    pub compose: ComposeArgs,
}

/// Run the logs command.
///
/// # Errors
///
/// Returns an error if compose cannot be found or exits non-zero.
pub async fn run(app: &AppContext, args: &LocalLogsArgs) -> Result<ExitCode> {
    let config = app.config()?;
    let compose = args.compose.resolve_local(app, &config).await?;
    let inv = plan::local_logs(&config.project, compose, &args.logs.compose_args());
    passthrough(app, "logs", "Container logs", inv).await?;
    Ok(ExitCode::SUCCESS)
}
