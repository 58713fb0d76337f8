//! `deployctl up`: rebuild and start the local stack.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy;
use crate::application::services::plan_runner::ensure_succeeded;
use crate::commands::ComposeArgs;

/// Arguments for the up command.
#[derive(Args, Debug, Default)]
pub struct UpArgs {
    #[command(flatten)]
    pub compose: ComposeArgs,

    /// Seconds to wait for services before listing containers
    #[arg(long, value_name = "SECS")]
    pub wait: Option<u64>,

    /// Keep running later steps after a step fails
    #[arg(long)]
    pub keep_going: bool,
}

/// Run the up command.
///
/// # Errors
///
/// Returns an error if compose cannot be found, a step cannot be spawned,
/// or a step exits non-zero.
pub async fn run(app: &AppContext, args: &UpArgs) -> Result<ExitCode> {
    let config = app.config()?;
    let compose = args.compose.resolve_local(app, &config).await?;
    let wait = Duration::from_secs(args.wait.unwrap_or(config.startup.wait_secs));

    let report = deploy::deploy_local(
        &app.runner,
        &app.reporter(),
        &config,
        compose,
        wait,
        app.run_options(args.keep_going),
    )
    .await?;

    app.renderer().render_report(&report)?;
    ensure_succeeded(&report)?;
    Ok(ExitCode::SUCCESS)
}
